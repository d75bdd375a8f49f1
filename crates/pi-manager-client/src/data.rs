//! Payloads exchanged with the pi-manager backend.
//!
//! The endpoint bindings return untyped [`crate::ApiResponse`] values; these types are the
//! typed view a caller can decode into with [`crate::ApiResponse::json`]. Every field has a
//! default because the backend omits or nulls fields freely.

use serde::{Deserialize, Deserializer, Serialize};

/// Accept `null` where a collection or string is expected.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lifecycle state of a managed project.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectStatus {
    #[default]
    Idle,
    Booting,
    Active,
    Running,
    Failed,
    #[serde(other)]
    Unknown,
}

/// One command of a project's start pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct PipelineStep {
    pub name: String,
    pub cmd: String,
}

/// A project managed through the UI.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Project {
    pub id: String,
    pub description: String,
    /// Command used to check whether the project is up.
    pub check_cmd: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pipeline: Vec<PipelineStep>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    pub status: ProjectStatus,
    pub last_log: String,
    pub current_step: String,
    /// Percentage, 0-100.
    pub progress: i32,
    pub port: String,
}

impl Project {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// Reply of the start and stop actions, e.g. `{"status": "started"}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ActionStatus {
    pub status: String,
}

/// Backend liveness.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Health {
    pub ok: bool,
    /// RFC 3339 timestamp.
    pub last_check: String,
    pub tailscale_name: String,
}

/// One point of the host's resource history.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct PiHealthSample {
    pub time: String,
    pub cpu_usage: f64,
    pub memory_percent: f64,
    pub temperature: f64,
    pub disk_percent: f64,
}

/// Current resource usage of the host, with its recorded history.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct PiHealth {
    pub hostname: String,
    pub tailscale_name: String,
    pub cpu_usage: f64,
    pub memory_total: u64,
    pub memory_used: u64,
    pub memory_percent: f64,
    /// Degrees Celsius.
    pub temperature: f64,
    pub disk_total: u64,
    pub disk_used: u64,
    pub disk_percent: f64,
    pub load_avg_1: f64,
    pub load_avg_5: f64,
    pub load_avg_15: f64,
    pub uptime: String,
    #[serde(deserialize_with = "null_as_default")]
    pub history: Vec<PiHealthSample>,
}

/// A directory entry of the file browser.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct FsEntry {
    pub name: String,
    /// Relative to the backend's browsing root; feed back into `get_files`.
    pub path: String,
    pub abs_path: String,
    pub is_dir: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct FsListing {
    pub current_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub entries: Vec<FsEntry>,
}

/// Name and version of the backend service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub uptime_s: i64,
}

/// Why the host last rebooted, as far as the backend can tell.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct BootInfo {
    pub boot_id: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
