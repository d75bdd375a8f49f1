//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::api::API_BASE_PATH;

/// Where the backend listens during local development (the dev proxy target).
pub const DEV_BACKEND_ORIGIN: &str = "http://127.0.0.1:2001";

/// Settings for [`crate::HttpApiClient`].
///
/// `origin` is scheme, host and port without a path. An empty origin yields root-relative
/// URLs (`/api/v1/...`), which is what a bundle served by the backend itself wants. Native
/// transports need an absolute origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub origin: String,
}

impl ClientConfig {
    /// Same-origin configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Points at the backend on its local development port.
    pub fn dev() -> Self {
        Self::with_origin(DEV_BACKEND_ORIGIN)
    }

    pub fn with_origin(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    /// The URL every relative request path is appended to.
    pub fn api_root(&self) -> String {
        format!("{}{}", self.origin.trim_end_matches('/'), API_BASE_PATH)
    }
}
