//! Mock Bert-VITS Gradio backend for integration tests
//!
//! Serves the `/run/predict` contract under a per-speaker path segment
//! and records what the gateway actually sent

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

const DEFAULT_FILE_NAME: &str = "audio/tmpq8x1w2.wav";

/// How the mock answers predict calls
enum Behavior {
    /// Well-formed response carrying this generated file name
    File(String),
    /// Response whose `data` lacks the file-name element
    Malformed,
    /// Plain error status
    Fail(u16),
}

/// A running mock Gradio space
pub struct MockSpace {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockSpaceState>,
}

struct MockSpaceState {
    behavior: Behavior,
    request_count: AtomicU32,
    last_version: Mutex<Option<String>>,
    last_query: Mutex<Option<String>>,
    last_payload: Mutex<Option<Value>>,
}

impl MockSpace {
    /// Start a mock answering with the default file name
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(Behavior::File(DEFAULT_FILE_NAME.to_owned())).await
    }

    /// Start a mock answering with a specific generated file name
    pub async fn start_with_file_name(file_name: &str) -> anyhow::Result<Self> {
        Self::start_inner(Behavior::File(file_name.to_owned())).await
    }

    /// Start a mock whose responses are missing `data[1].name`
    pub async fn start_malformed() -> anyhow::Result<Self> {
        Self::start_inner(Behavior::Malformed).await
    }

    /// Start a mock that fails every call with the given status
    pub async fn start_failing(status: u16) -> anyhow::Result<Self> {
        Self::start_inner(Behavior::Fail(status)).await
    }

    async fn start_inner(behavior: Behavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockSpaceState {
            behavior,
            request_count: AtomicU32::new(0),
            last_version: Mutex::new(None),
            last_query: Mutex::new(None),
            last_payload: Mutex::new(None),
        });

        let app = Router::new()
            .route("/{version}/run/predict", routing::post(handle_predict))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base-URL template for this mock, version placeholder included
    pub fn base_url_template(&self) -> String {
        format!("http://{}/{{version}}", self.addr)
    }

    /// Endpoint base the gateway should have derived for a version
    pub fn endpoint_base(&self, version: &str) -> String {
        format!("http://{}/{version}", self.addr)
    }

    /// Number of predict calls received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::SeqCst)
    }

    /// Version path segment of the last predict call
    pub fn last_version(&self) -> Option<String> {
        self.state.last_version.lock().unwrap().clone()
    }

    /// Raw query string of the last predict call
    pub fn last_query(&self) -> Option<String> {
        self.state.last_query.lock().unwrap().clone()
    }

    /// JSON body of the last predict call
    pub fn last_payload(&self) -> Option<Value> {
        self.state.last_payload.lock().unwrap().clone()
    }
}

impl Drop for MockSpace {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_predict(
    State(state): State<Arc<MockSpaceState>>,
    Path(version): Path<String>,
    RawQuery(query): RawQuery,
    Json(payload): Json<Value>,
) -> axum::response::Response {
    state.request_count.fetch_add(1, Ordering::SeqCst);
    *state.last_version.lock().unwrap() = Some(version);
    *state.last_query.lock().unwrap() = query;
    *state.last_payload.lock().unwrap() = Some(payload);

    match &state.behavior {
        Behavior::File(file_name) => Json(json!({
            "data": [null, { "name": file_name, "is_file": true }],
            "is_generating": false,
            "duration": 0.42,
            "average_duration": 0.42,
        }))
        .into_response(),
        Behavior::Malformed => Json(json!({ "data": [null] })).into_response(),
        Behavior::Fail(status) => (
            StatusCode::from_u16(*status).expect("valid status"),
            "mock failure",
        )
            .into_response(),
    }
}
