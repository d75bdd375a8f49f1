//! In-memory transport for unit tests: records every request and replays one canned reply.

use std::cell::RefCell;
use std::io;

use super::{HttpRequest, HttpResponse, Transport};

enum Reply {
    Respond(HttpResponse),
    Refuse,
}

pub(crate) struct RecordingTransport {
    reply: Reply,
    requests: RefCell<Vec<HttpRequest>>,
}

impl RecordingTransport {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn bare(status: u16, status_text: &str, body: &str) -> Self {
        Self::new(Reply::Respond(HttpResponse {
            status,
            status_text: status_text.to_string(),
            headers: Vec::new(),
            body: body.to_string(),
        }))
    }

    pub(crate) fn with_content_type(status: u16, status_text: &str, content_type: &str, body: &str) -> Self {
        Self::new(Reply::Respond(HttpResponse {
            status,
            status_text: status_text.to_string(),
            headers: vec![("content-type".to_string(), content_type.to_string())],
            body: body.to_string(),
        }))
    }

    pub(crate) fn json(status: u16, status_text: &str, body: &str) -> Self {
        Self::with_content_type(status, status_text, "application/json", body)
    }

    pub(crate) fn text(status: u16, status_text: &str, body: &str) -> Self {
        Self::with_content_type(status, status_text, "text/plain; charset=utf-8", body)
    }

    pub(crate) fn refused() -> Self {
        Self::new(Reply::Refuse)
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for RecordingTransport {
    type Error = io::Error;

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, io::Error> {
        self.requests.borrow_mut().push(request);
        match &self.reply {
            Reply::Respond(response) => Ok(response.clone()),
            Reply::Refuse => Err(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused")),
        }
    }
}
