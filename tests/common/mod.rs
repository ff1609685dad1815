//! Test helpers for integration tests.
//!
//! Provides a mock Distributed backend served by axum on a local port. Each
//! endpoint answers with a configured status and body, optionally after a
//! delay, and every request is recorded for inspection.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;

use distributed::config::ApiConfig;
use distributed::{ApiClient, Application, SessionStore};

/// Default timeout for test operations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A request received by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub endpoint: String,
    pub content_type: String,
    pub body: Value,
}

#[derive(Debug, Clone)]
struct MockResponse {
    status: u16,
    body: String,
    delay: Duration,
}

#[derive(Debug, Default)]
struct MockState {
    responses: Mutex<HashMap<String, MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Mock backend listening on 127.0.0.1.
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockBackend {
    /// Start the backend on an ephemeral port.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/api/:endpoint", post(handle))
            .with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock backend");
        });
        Self { addr, state }
    }

    /// Base URL of the backend.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// API configuration pointing at this backend.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url(),
            prefix: "/api/".to_string(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Client for this backend.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.api_config()).expect("create client")
    }

    /// Application talking to this backend with an in-memory session.
    pub fn app(&self) -> Application {
        Application::new(self.client(), SessionStore::in_memory("sess"))
    }

    /// Answer `endpoint` with `status` and a JSON body.
    pub fn respond(&self, endpoint: &str, status: u16, body: Value) {
        self.respond_raw(endpoint, status, &body.to_string());
    }

    /// Answer `endpoint` with `status` and a raw body.
    pub fn respond_raw(&self, endpoint: &str, status: u16, body: &str) {
        self.respond_after(endpoint, Duration::ZERO, status, body);
    }

    /// Answer `endpoint` after `delay`.
    pub fn respond_after(&self, endpoint: &str, delay: Duration, status: u16, body: &str) {
        self.state.responses.lock().unwrap().insert(
            endpoint.to_string(),
            MockResponse {
                status,
                body: body.to_string(),
                delay,
            },
        );
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Requests received for `endpoint`.
    pub fn requests_to(&self, endpoint: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.endpoint == endpoint)
            .collect()
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    Path(endpoint): Path<String>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body_json = serde_json::from_str(&body).unwrap_or(Value::String(body));
    state.requests.lock().unwrap().push(RecordedRequest {
        endpoint: endpoint.clone(),
        content_type,
        body: body_json,
    });

    let response = state.responses.lock().unwrap().get(&endpoint).cloned();
    let json = [(header::CONTENT_TYPE, "application/json")];
    match response {
        Some(r) => {
            if !r.delay.is_zero() {
                tokio::time::sleep(r.delay).await;
            }
            let status = StatusCode::from_u16(r.status).unwrap_or(StatusCode::OK);
            (status, json, r.body)
        }
        None => (StatusCode::NOT_FOUND, json, String::new()),
    }
}

/// A post record as the backend returns it.
pub fn post_record(id: &str, title: &str, board: &str) -> Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "userId": "u1",
        "userName": "alice",
        "content": "",
        "url": "",
        "board": board,
        "created": "2024-01-01T00:00:00Z",
        "upvotes": 1,
        "downvotes": 0,
        "score": 1,
        "commentCount": 0
    })
}

/// A session response expiring an hour from now.
pub fn session_response(id: &str) -> Value {
    let now = chrono::Utc::now().timestamp();
    serde_json::json!({
        "session": {
            "id": id,
            "userId": "u1",
            "created": now,
            "expires": now + 3600
        }
    })
}

/// Log lines captured from the current thread's tracing events.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Capture events until the returned guard is dropped.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let logs = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Everything captured so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
