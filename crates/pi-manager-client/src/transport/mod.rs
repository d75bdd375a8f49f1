//! The network seam of the client.
//!
//! [`HttpRequest`] and [`HttpResponse`] describe one exchange as plain data. The executor
//! builds the request and interprets the response; a [`Transport`] only moves bytes.
//! Natively this is `reqwest`, in the browser it is `fetch` through `gloo-net`.

use crate::api::{ApiHeaders, HttpMethod};

#[cfg(target_arch = "wasm32")]
mod fetch;
#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(test)]
pub(crate) mod recording;

#[cfg(target_arch = "wasm32")]
pub use fetch::FetchTransport;
#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport;

#[cfg(target_arch = "wasm32")]
pub type DefaultTransport = FetchTransport;
#[cfg(not(target_arch = "wasm32"))]
pub type DefaultTransport = ReqwestTransport;

/// Error type of the transport for the current target.
pub type TransportError = <DefaultTransport as Transport>::Error;

/// A fully built request, ready to send.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: ApiHeaders,
    pub body: Option<String>,
}

/// A response whose body has been read to the end as text.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// First value of the header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Sends one request and reads the whole response body.
///
/// Futures are not required to be `Send`: in the browser they are driven by the
/// single-threaded event loop.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    type Error: std::error::Error + 'static;

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error>;
}
