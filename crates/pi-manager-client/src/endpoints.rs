use serde::Serialize;

use crate::api::{ApiError, ApiResponse, ApiResult, HttpApiClient, RequestOptions};
use crate::config::ClientConfig;
use crate::encoding::encode_component;
use crate::transport::{DefaultTransport, Transport};

/// The named operations of the pi-manager backend.
///
/// Each method maps to one fixed path and method and returns the executor's outcome
/// unchanged. Identifiers are percent-encoded but otherwise passed through; the backend
/// rejects malformed ones.
#[derive(Debug, Clone)]
pub struct Api<T = DefaultTransport> {
    client: HttpApiClient<T>,
}

impl Api<DefaultTransport> {
    pub fn new(config: &ClientConfig) -> Self {
        Api {
            client: HttpApiClient::new(config),
        }
    }
}

impl<T: Transport> Api<T> {
    pub fn from_client(client: HttpApiClient<T>) -> Self {
        Api { client }
    }

    pub fn client(&self) -> &HttpApiClient<T> {
        &self.client
    }

    pub async fn get_health(&self) -> ApiResult<ApiResponse, T::Error> {
        self.client.call("/health", RequestOptions::get()).await
    }

    pub async fn get_projects(&self) -> ApiResult<ApiResponse, T::Error> {
        self.client.call("/projects", RequestOptions::get()).await
    }

    /// `project` is serialized as the JSON request body; nothing is sent if that fails.
    pub async fn create_project<B>(&self, project: &B) -> ApiResult<ApiResponse, T::Error>
    where
        B: Serialize + ?Sized,
    {
        let options = RequestOptions::post().json(project).map_err(ApiError::Serialize)?;
        self.client.call("/projects", options).await
    }

    pub async fn get_project(&self, id: &str) -> ApiResult<ApiResponse, T::Error> {
        let path = format!("/projects/{}", encode_component(id));
        self.client.call(&path, RequestOptions::get()).await
    }

    pub async fn delete_project(&self, id: &str) -> ApiResult<ApiResponse, T::Error> {
        let path = format!("/projects/{}", encode_component(id));
        self.client.call(&path, RequestOptions::delete()).await
    }

    pub async fn start_project(&self, id: &str) -> ApiResult<ApiResponse, T::Error> {
        let path = format!("/projects/{}/start", encode_component(id));
        self.client.call(&path, RequestOptions::post()).await
    }

    pub async fn stop_project(&self, id: &str) -> ApiResult<ApiResponse, T::Error> {
        let path = format!("/projects/{}/stop", encode_component(id));
        self.client.call(&path, RequestOptions::post()).await
    }

    /// List directories below `path`, relative to the backend's browsing root.
    /// An empty path lists the root itself.
    pub async fn get_files(&self, path: &str) -> ApiResult<ApiResponse, T::Error> {
        let path = format!("/fs?path={}", encode_component(path));
        self.client.call(&path, RequestOptions::get()).await
    }

    pub async fn get_pi_health(&self) -> ApiResult<ApiResponse, T::Error> {
        self.client.call("/pi-health", RequestOptions::get()).await
    }

    pub async fn get_service_info(&self) -> ApiResult<ApiResponse, T::Error> {
        self.client.call("/", RequestOptions::get()).await
    }

    pub async fn get_last_boot(&self) -> ApiResult<ApiResponse, T::Error> {
        self.client.call("/boots/last", RequestOptions::get()).await
    }
}

/// Create a client for a bundle served by the backend itself (same origin).
///
/// Browser use only: the URLs are root-relative, which `fetch` resolves against the page
/// but the native transport rejects with a network error. Native callers use
/// [`Api::new`] with an absolute origin such as [`ClientConfig::dev`].
pub fn create() -> Api {
    Api::new(&ClientConfig::default())
}
