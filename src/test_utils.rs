//! Shared test utilities: a mock upstream host standing in for the GitHub
//! and Groq APIs.
//!
//! The mock binds a real listener on an ephemeral port and records every
//! request it serves, so tests can assert exactly which upstream calls a
//! pipeline made and with what bodies.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::config::Config;

/// One request observed by the mock host.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Value,
}

/// A mock upstream host serving the diff, completion, and comment endpoints.
pub struct MockHost {
    /// Base URL (`http://127.0.0.1:<port>`), usable as both API bases.
    pub base: String,
    /// Requests observed so far, in arrival order.
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    diff_status: StatusCode,
    diff_body: String,
    completion_body: Value,
    comment_status: StatusCode,
}

/// Canned upstream responses for a [`MockHost`].
#[derive(Debug, Clone)]
pub struct MockResponses {
    pub diff_status: StatusCode,
    pub diff_body: String,
    pub completion_body: Value,
    pub comment_status: StatusCode,
}

impl MockResponses {
    /// All three endpoints succeed; the completion's first choice carries
    /// `review`.
    pub fn ok(diff_body: &str, review: &str) -> MockResponses {
        MockResponses {
            diff_status: StatusCode::OK,
            diff_body: diff_body.to_string(),
            completion_body: json!({
                "choices": [
                    { "message": { "role": "assistant", "content": review } }
                ]
            }),
            comment_status: StatusCode::CREATED,
        }
    }
}

impl MockHost {
    /// Starts a mock host where every endpoint succeeds.
    pub async fn start(diff_body: &str, review: &str) -> MockHost {
        Self::start_with(MockResponses::ok(diff_body, review)).await
    }

    /// Starts a mock host with full control over the canned responses.
    pub async fn start_with(responses: MockResponses) -> MockHost {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: Arc::clone(&requests),
            diff_status: responses.diff_status,
            diff_body: responses.diff_body,
            completion_body: responses.completion_body,
            comment_status: responses.comment_status,
        };

        let app = Router::new()
            .route("/repos/{owner}/{repo}/pulls/{number}", get(serve_diff))
            .route("/openai/v1/chat/completions", post(serve_completion))
            .route(
                "/repos/{owner}/{repo}/issues/{number}/comments",
                post(serve_comment),
            )
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockHost {
            base: format!("http://{}", addr),
            requests,
        }
    }

    /// A config pointing both API bases at this mock host.
    pub fn config(&self, webhook_secret: &str) -> Config {
        Config {
            github_token: "test-token".to_string(),
            groq_api_key: "test-key".to_string(),
            webhook_secret: webhook_secret.to_string(),
            model: "test-model".to_string(),
            github_api_base: self.base.clone(),
            groq_api_base: self.base.clone(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
        }
    }

    /// Snapshot of the requests observed so far.
    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Waits until the mock host has observed at least `count` requests.
    ///
    /// Panics after a couple of seconds so a pipeline that never reaches
    /// the host fails the test instead of hanging it.
    pub async fn wait_for_requests(&self, count: usize) {
        for _ in 0..200 {
            if self.requests.lock().unwrap().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("timed out waiting for {count} upstream requests");
    }
}

async fn serve_diff(State(state): State<MockState>, uri: Uri) -> (StatusCode, String) {
    record(&state, "GET", &uri, Value::Null);
    (state.diff_status, state.diff_body.clone())
}

async fn serve_completion(
    State(state): State<MockState>,
    uri: Uri,
    Json(body): Json<Value>,
) -> Json<Value> {
    record(&state, "POST", &uri, body);
    Json(state.completion_body.clone())
}

async fn serve_comment(
    State(state): State<MockState>,
    uri: Uri,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    record(&state, "POST", &uri, body);
    (state.comment_status, Json(json!({ "id": 1 })))
}

fn record(state: &MockState, method: &str, uri: &Uri, body: Value) {
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        body,
    });
}
