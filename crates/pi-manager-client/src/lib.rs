//! Client library for the pi-manager backend.
//!
//! Every call the frontend makes to the backend goes through a single request executor
//! ([`api::HttpApiClient::call`]) which applies the default headers, decodes the response
//! according to its content type and turns failures into one uniform [`api::ApiError`].
//! The named operations (projects, files, health) live in [`endpoints`].

pub mod api;
pub mod config;
pub mod data;
pub mod encoding;
pub mod endpoints;
pub mod errors;
pub mod log;
pub mod transport;

pub use api::{ApiError, ApiHeaders, ApiResponse, ApiResult, HttpApiClient, HttpMethod, RequestOptions};
pub use config::ClientConfig;
pub use endpoints::Api;
pub use transport::{DefaultTransport, HttpRequest, HttpResponse, Transport, TransportError};

pub use serde;
pub use serde_json;
pub use tracing;
