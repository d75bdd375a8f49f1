//! In-process stand-in for the pi-manager backend.
//!
//! Every request is recorded verbatim (method, raw URI, headers, body) before it is
//! answered, so tests can assert on exactly what went over the wire.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{Json, Router};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

#[derive(Debug, Clone)]
pub struct Received {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: String,
}

#[derive(Default)]
struct ServerState {
    received: Mutex<Vec<Received>>,
    projects: Mutex<Vec<Value>>,
}

pub struct TestServer {
    pub origin: String,
    state: Arc<ServerState>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let state = Arc::new(ServerState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestServer {
            origin: format!("http://{addr}"),
            state,
        }
    }

    pub fn received(&self) -> Vec<Received> {
        self.state.received.lock().unwrap().clone()
    }

    pub fn last(&self) -> Received {
        self.received().pop().expect("server received no request")
    }
}

async fn handle(
    State(state): State<Arc<ServerState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> Response {
    state.received.lock().unwrap().push(Received {
        method: method.clone(),
        uri: uri.to_string(),
        headers: headers.clone(),
        body: body.clone(),
    });

    let path = uri.path().strip_prefix("/api/v1").unwrap_or(uri.path());
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", [""]) => Json(json!({"name": "pi-manager", "version": "0.1", "uptime_s": 42})).into_response(),
        ("GET", ["health"]) => Json(json!({
            "ok": true,
            "last_check": "2026-10-15T08:00:00Z",
            "tailscale_name": "pi.tailnet.ts.net"
        }))
        .into_response(),
        ("GET", ["pi-health"]) => Json(json!({
            "hostname": "raspberrypi",
            "cpu_usage": 7.5,
            "memory_total": 4096,
            "memory_used": 1024,
            "memory_percent": 25.0,
            "uptime": "2d 3h",
            "history": []
        }))
        .into_response(),
        ("GET", ["boots", "last"]) => Json(json!({"boot_id": "unknown", "reason": "unknown"})).into_response(),
        ("GET", ["fs"]) => {
            let requested = query.get("path").cloned().unwrap_or_default();
            Json(json!({"current_path": format!("/home/pi/{requested}"), "entries": []})).into_response()
        }
        ("GET", ["projects"]) => Json(Value::Array(state.projects.lock().unwrap().clone())).into_response(),
        ("POST", ["projects"]) => {
            let Ok(Value::Object(mut project)) = serde_json::from_str::<Value>(&body) else {
                return (StatusCode::BAD_REQUEST, Json(json!({"error": "invalid json"}))).into_response();
            };
            let mut projects = state.projects.lock().unwrap();
            if !project.contains_key("id") {
                project.insert("id".to_string(), json!((projects.len() + 1).to_string()));
            }
            let project = Value::Object(project);
            projects.push(project.clone());
            (StatusCode::CREATED, Json(project)).into_response()
        }
        ("DELETE", ["projects", id]) => {
            let mut projects = state.projects.lock().unwrap();
            let before = projects.len();
            projects.retain(|p| p["id"] != *id);
            if projects.len() == before {
                (StatusCode::NOT_FOUND, "not found").into_response()
            } else {
                StatusCode::NO_CONTENT.into_response()
            }
        }
        ("POST", ["projects", _, "start"]) => Json(json!({"status": "started"})).into_response(),
        ("POST", ["projects", _, "stop"]) => Json(json!({"status": "stopped"})).into_response(),
        ("GET", ["text"]) => "plain body".into_response(),
        ("GET", ["broken-json"]) => ([(header::CONTENT_TYPE, "application/json")], "{\"ok\": tru").into_response(),
        ("GET", ["forbidden"]) => (
            StatusCode::FORBIDDEN,
            [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
            "{\n  \"error\": \"actions disabled\"\n}\n",
        )
            .into_response(),
        _ => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

/// Serve every connection with the same hand-written HTTP/1.1 reply, so the status line
/// reaches the client exactly as given (axum would normalize the reason phrase).
pub async fn spawn_raw(status_line: &'static str, body: &'static str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let reply = format!(
                "{status_line}\r\ncontent-type: text/plain\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(reply.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    format!("http://{addr}")
}
