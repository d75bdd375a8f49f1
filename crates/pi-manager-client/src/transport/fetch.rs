use gloo_net::http::Request;

use crate::api::HttpMethod;

use super::{HttpRequest, HttpResponse, Transport};

/// Transport backed by the browser's `fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    type Error = gloo_net::Error;

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, gloo_net::Error> {
        let url = request.url.as_str();
        let mut builder = match request.method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
            HttpMethod::Patch => Request::patch(url),
            HttpMethod::Delete => Request::delete(url),
        };
        for (key, value) in request.headers.iter() {
            builder = builder.header(key, value);
        }

        let response = match request.body {
            Some(body) => builder.body(body)?.send().await?,
            None => builder.send().await?,
        };

        let status = response.status();
        let status_text = response.status_text();
        let headers = response.headers().entries().collect();
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            status_text,
            headers,
            body,
        })
    }
}
