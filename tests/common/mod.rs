//! Fake OpenAI and Anthropic endpoints served on an ephemeral local port.

#![allow(dead_code)]

use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures::stream;
use serde_json::{json, Value};

pub const GOOD_KEY: &str = "sk-good";

/// Bytes per network write when streaming; small enough to split events.
const WRITE_SIZE: usize = 7;

#[derive(Clone, Default)]
pub struct FakeState {
    /// Text the fake model answers with.
    pub reply: Arc<Mutex<String>>,
    /// JSON bodies of every completion request received.
    pub requests: Arc<Mutex<Vec<Value>>>,
    /// Completion requests still to be answered with 503.
    pub outages: Arc<Mutex<u32>>,
    /// Completion requests answered with 503 so far.
    pub rejected: Arc<Mutex<u32>>,
}

impl FakeState {
    pub fn new(reply: &str) -> Self {
        let state = Self::default();
        state.set_reply(reply);
        state
    }

    pub fn set_reply(&self, reply: &str) {
        *self.reply.lock().unwrap() = reply.to_string();
    }

    /// Answers the next `count` completion requests with 503.
    pub fn fail_next(&self, count: u32) {
        *self.outages.lock().unwrap() = count;
    }

    pub fn rejected_count(&self) -> u32 {
        *self.rejected.lock().unwrap()
    }

    /// Consumes one pending outage, if any.
    fn take_outage(&self) -> bool {
        let mut outages = self.outages.lock().unwrap();
        if *outages == 0 {
            return false;
        }
        *outages -= 1;
        *self.rejected.lock().unwrap() += 1;
        true
    }

    pub fn last_request(&self) -> Value {
        self.requests.lock().unwrap().last().cloned().unwrap_or(Value::Null)
    }

    fn record(&self, body: Value) -> String {
        self.requests.lock().unwrap().push(body);
        self.reply.lock().unwrap().clone()
    }
}

/// Starts `app` on 127.0.0.1 and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn sse_response(payload: String) -> Response {
    let chunks: Vec<Result<Bytes, Infallible>> = payload
        .into_bytes()
        .chunks(WRITE_SIZE)
        .map(|c| Ok(Bytes::copy_from_slice(c)))
        .collect();
    (
        [(header::CONTENT_TYPE, "text/event-stream")],
        Body::from_stream(stream::iter(chunks)),
    )
        .into_response()
}

fn split_reply(reply: &str) -> Vec<String> {
    let chars: Vec<char> = reply.chars().collect();
    chars.chunks(5).map(|c| c.iter().collect()).collect()
}

fn overloaded() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({"error": {"message": "The server is overloaded", "type": "server_error"}})),
    )
        .into_response()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}})),
    )
        .into_response()
}

// ─── OpenAI ────────────────────────────────────────────────────────────────

pub fn openai_app(state: FakeState) -> Router {
    Router::new()
        .route("/v1/chat/completions", post(openai_completions))
        .route("/v1/models", get(openai_models))
        .with_state(state)
}

fn openai_authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(format!("Bearer {}", GOOD_KEY).as_str())
}

async fn openai_completions(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !openai_authorized(&headers) {
        return unauthorized();
    }
    if state.take_outage() {
        return overloaded();
    }
    let streaming = body["stream"] == json!(true);
    let reply = state.record(body);

    if !streaming {
        return Json(json!({
            "model": "gpt-4o",
            "choices": [{"message": {"role": "assistant", "content": reply}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 34}
        }))
        .into_response();
    }

    let mut payload = String::new();
    for piece in split_reply(&reply) {
        let event = json!({"choices": [{"delta": {"content": piece}, "finish_reason": null}]});
        payload.push_str(&format!("data: {}\n\n", event));
    }
    payload.push_str("data: {\"choices\":[{\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n");
    payload.push_str("data: {\"choices\":[],\"usage\":{\"prompt_tokens\":12,\"completion_tokens\":34}}\n\n");
    payload.push_str("data: [DONE]\n\n");
    sse_response(payload)
}

async fn openai_models(headers: HeaderMap) -> Response {
    if !openai_authorized(&headers) {
        return unauthorized();
    }
    Json(json!({"data": [
        {"id": "gpt-4o-mini"},
        {"id": "whisper-1"},
        {"id": "gpt-4o"},
        {"id": "text-embedding-3-small"}
    ]}))
    .into_response()
}

// ─── Anthropic ─────────────────────────────────────────────────────────────

pub fn anthropic_app(state: FakeState) -> Router {
    Router::new()
        .route("/v1/messages", post(anthropic_messages))
        .route("/v1/models", get(anthropic_models))
        .with_state(state)
}

fn anthropic_authorized(headers: &HeaderMap) -> bool {
    headers.get("x-api-key").and_then(|v| v.to_str().ok()) == Some(GOOD_KEY)
        && headers.get("anthropic-version").is_some()
}

async fn anthropic_messages(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !anthropic_authorized(&headers) {
        return unauthorized();
    }
    if state.take_outage() {
        return overloaded();
    }
    let streaming = body["stream"] == json!(true);
    let reply = state.record(body);

    if !streaming {
        return Json(json!({
            "model": "claude-sonnet-4-20250514",
            "content": [{"type": "text", "text": reply}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 12, "output_tokens": 34}
        }))
        .into_response();
    }

    let mut payload = String::from(
        "event: message_start\ndata: {\"type\":\"message_start\",\"message\":{}}\n\n",
    );
    payload.push_str("event: ping\ndata: {\"type\":\"ping\"}\n\n");
    for piece in split_reply(&reply) {
        let event = json!({"type": "content_block_delta", "index": 0, "delta": {"type": "text_delta", "text": piece}});
        payload.push_str(&format!("event: content_block_delta\ndata: {}\n\n", event));
    }
    payload.push_str(
        "event: message_delta\ndata: {\"type\":\"message_delta\",\"delta\":{\"stop_reason\":\"end_turn\"},\"usage\":{\"output_tokens\":34}}\n\n",
    );
    payload.push_str("event: message_stop\ndata: {\"type\":\"message_stop\"}\n\n");
    sse_response(payload)
}

async fn anthropic_models(headers: HeaderMap) -> Response {
    if !anthropic_authorized(&headers) {
        return unauthorized();
    }
    Json(json!({"data": [
        {"id": "claude-sonnet-4-20250514"},
        {"id": "claude-3-5-haiku-20241022"}
    ]}))
    .into_response()
}
