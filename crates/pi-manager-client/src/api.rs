use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::log;
use crate::transport::{DefaultTransport, HttpRequest, HttpResponse, Transport, TransportError};

/// Fixed prefix every relative request path is appended to.
pub const API_BASE_PATH: &str = "/api/v1";

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by a single call through [`HttpApiClient::call`].
///
/// `E` is the transport's own error type. It is carried as-is so callers can
/// inspect the underlying network failure (`reqwest::Error` natively, `gloo_net::Error`
/// in the browser).
#[derive(Debug, thiserror::Error)]
pub enum ApiError<E = TransportError> {
    #[error(transparent)]
    Network(E),
    #[error("{status} {status_text} - {body}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub type ApiResult<T, E = TransportError> = Result<T, ApiError<E>>;

/// Header map with case-insensitive names. Names are stored lowercased, so a later
/// `content-type` replaces an earlier `Content-Type`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiHeaders(HashMap<String, String>);

impl ApiHeaders {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into().to_ascii_lowercase(), value.into());
    }

    pub fn delete(&mut self, key: &str) {
        self.0.remove(&key.to_ascii_lowercase());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    /// Copy every header of `other` into `self`, replacing existing values.
    pub fn merge(&mut self, other: &ApiHeaders) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ApiHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = ApiHeaders::new();
        for (key, value) in iter {
            headers.insert(key, value);
        }
        headers
    }
}

/// Per-call options. Everything is optional: the default is a bodiless `GET`
/// with no extra headers.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: ApiHeaders,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::default().method(HttpMethod::Post)
    }

    pub fn delete() -> Self {
        Self::default().method(HttpMethod::Delete)
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Attach an already serialized payload.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn json<B>(self, body: &B) -> Result<Self, serde_json::Error>
    where
        B: Serialize + ?Sized,
    {
        Ok(self.body(serde_json::to_string(body)?))
    }
}

/// A successfully decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// The response declared `application/json` and parsed cleanly.
    Json(serde_json::Value),
    /// Any other content type, returned verbatim.
    Text(String),
}

impl ApiResponse {
    /// Decode into a typed value. A text response is parsed as JSON first.
    pub fn json<T>(self) -> Result<T, serde_json::Error>
    where
        T: DeserializeOwned,
    {
        match self {
            ApiResponse::Json(value) => serde_json::from_value(value),
            ApiResponse::Text(text) => serde_json::from_str(&text),
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ApiResponse::Json(value) => Some(value),
            ApiResponse::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ApiResponse::Json(_) => None,
            ApiResponse::Text(text) => Some(text),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ApiResponse::Json(value) => value.to_string(),
            ApiResponse::Text(text) => text,
        }
    }
}

/// Turn a raw response into the call outcome.
///
/// The error path always reads the body as plain text, whatever content type the
/// server declared.
fn handle_response<E>(response: HttpResponse) -> ApiResult<ApiResponse, E> {
    if !response.is_success() {
        return Err(ApiError::Http {
            status: response.status,
            status_text: response.status_text,
            body: response.body,
        });
    }

    let is_json = response
        .header("content-type")
        .is_some_and(|content_type| content_type.contains(JSON_CONTENT_TYPE));

    if is_json {
        serde_json::from_str(&response.body)
            .map(ApiResponse::Json)
            .map_err(ApiError::Parse)
    } else {
        Ok(ApiResponse::Text(response.body))
    }
}

/// The request executor shared by every endpoint binding.
///
/// Holds no state that changes between calls: the API root, the client-wide headers
/// and the transport are fixed at construction.
#[derive(Debug, Clone)]
pub struct HttpApiClient<T = DefaultTransport> {
    root_url: String,
    headers: ApiHeaders,
    transport: T,
}

impl HttpApiClient<DefaultTransport> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, DefaultTransport::default())
    }
}

impl<T: Transport> HttpApiClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            root_url: config.api_root(),
            headers: ApiHeaders::new(),
            transport,
        }
    }

    /// Origin plus [`API_BASE_PATH`]; relative paths are appended to this verbatim.
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Set a header sent with every call. Per-call headers still take precedence.
    pub fn set_header(&mut self, key: String, value: String) {
        self.headers.insert(key, value);
    }

    pub fn set_headers(&mut self, headers: Vec<(String, String)>) {
        for (key, value) in headers {
            self.headers.insert(key, value);
        }
    }

    /// Build the request for `path` without sending it.
    ///
    /// Headers are layered: `Content-Type: application/json` first, then the
    /// client-wide headers, then the per-call headers.
    pub fn build_request(&self, path: &str, options: RequestOptions) -> HttpRequest {
        let mut headers = ApiHeaders::new();
        headers.insert("Content-Type", JSON_CONTENT_TYPE);
        headers.merge(&self.headers);
        headers.merge(&options.headers);

        HttpRequest {
            method: options.method,
            url: format!("{}{}", self.root_url, path),
            headers,
            body: options.body,
        }
    }

    /// Send exactly one request and normalize its outcome.
    pub async fn call(&self, path: &str, options: RequestOptions) -> ApiResult<ApiResponse, T::Error> {
        let request = self.build_request(path, options);
        let method = request.method;
        let url = request.url.clone();

        log::debug!("{} {}", method, url);
        let response = self.transport.send(request).await.map_err(ApiError::Network)?;
        log::debug!("{} {} -> {}", method, url, response.status);

        let outcome = handle_response(response);
        if let Err(ApiError::Http { status, .. }) = &outcome {
            log::warn!("{} {} failed with status {}", method, url, status);
        }
        outcome
    }
}
