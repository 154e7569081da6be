//! Shared test infrastructure: a local HTTP server standing in for Chatwoot
//! and Rasa, recording every call it receives.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{Request, StatusCode},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::net::TcpListener;

use chatwoot_rasa::config::AppConfig;

/// One call received by the fake upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub path: String,
    pub body: Value,
}

#[derive(Default)]
pub struct Recorder {
    pub calls: Mutex<Vec<RecordedCall>>,
    pub labels: Mutex<Vec<String>>,
    pub canned: Mutex<Value>,
    pub domain: Mutex<Value>,
    /// Message text for which Chatwoot answers 500.
    pub failing_message: Mutex<Option<String>>,
}

impl Recorder {
    fn record(&self, path: String, body: Value) {
        self.calls.lock().unwrap().push(RecordedCall { path, body });
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, suffix: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.path.ends_with(suffix))
            .collect()
    }
}

pub struct FakeUpstream {
    pub base_url: String,
    pub recorder: Arc<Recorder>,
}

type Shared = State<Arc<Recorder>>;

async fn conversation_post(
    State(rec): Shared,
    Path((account, conversation, action)): Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> StatusCode {
    let failing = rec.failing_message.lock().unwrap().clone();
    let fail = action == "messages" && failing.is_some_and(|text| body["content"] == json!(text));
    if action == "labels" {
        if let Some(labels) = body["labels"].as_array() {
            *rec.labels.lock().unwrap() = labels
                .iter()
                .filter_map(|l| l.as_str().map(str::to_string))
                .collect();
        }
    }
    rec.record(
        format!("/api/v1/accounts/{}/conversations/{}/{}", account, conversation, action),
        body,
    );
    if fail {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    }
}

async fn get_labels(State(rec): Shared) -> Json<Value> {
    Json(json!({ "payload": *rec.labels.lock().unwrap() }))
}

async fn canned_responses(State(rec): Shared, Path(account): Path<String>) -> Json<Value> {
    rec.record(format!("/api/v1/accounts/{}/canned_responses", account), Value::Null);
    Json(rec.canned.lock().unwrap().clone())
}

async fn domain(State(rec): Shared) -> Json<Value> {
    rec.record("/domain".to_string(), Value::Null);
    Json(rec.domain.lock().unwrap().clone())
}

/// Rasa REST channel: answers depending on the message text.
async fn rasa_webhook(
    State(rec): Shared,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut recorded = body.clone();
    if let Some(token) = query.get("token") {
        recorded["token"] = json!(token);
    }
    rec.record("/webhooks/rest/webhook".to_string(), recorded);

    let replies = match body["message"].as_str().unwrap_or_default() {
        "/restart" => json!([]),
        "/start" => json!([{"recipient_id": body["sender"], "text": "Welcome!"}]),
        "buttons" => json!([{
            "recipient_id": body["sender"],
            "text": "Pick one",
            "buttons": [
                {"title": "Yes", "payload": "/affirm"},
                {"title": "No", "payload": "/deny"}
            ]
        }]),
        "location" => json!([{
            "recipient_id": body["sender"],
            "custom": {"latitude": 52.5, "longitude": 13.4}
        }]),
        "unknown custom" => json!([{
            "recipient_id": body["sender"],
            "custom": {"foo": "bar"}
        }]),
        text => json!([{"recipient_id": body["sender"], "text": format!("First\n\nYou said: {}", text)}]),
    };
    Json(replies)
}

async fn not_found(request: Request<Body>) -> Response {
    let mut response = Response::new(Body::from(format!("no route for {}", request.uri())));
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

impl FakeUpstream {
    pub async fn start() -> Self {
        let recorder = Arc::new(Recorder::default());
        *recorder.canned.lock().unwrap() = json!([]);
        *recorder.domain.lock().unwrap() = json!({});

        let app = Router::new()
            .route(
                "/api/v1/accounts/:account/conversations/:conversation/:action",
                get(get_labels).post(conversation_post),
            )
            .route("/api/v1/accounts/:account/canned_responses", get(canned_responses))
            .route("/domain", get(domain))
            .route("/webhooks/rest/webhook", post(rasa_webhook))
            .fallback(not_found)
            .with_state(recorder.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            recorder,
        }
    }

    /// Configuration pointing both Chatwoot and Rasa at this server.
    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::default();
        config.chatwoot.url = self.base_url.clone();
        config.chatwoot.api_key = Some("cw-token".to_string());
        config.chatwoot.timeout_secs = 5;
        config.rasa.url = self.base_url.clone();
        config.rasa.timeout_secs = 5;
        config.rasa.max_retries = 0;
        config
    }
}

/// An upstream that accepts connections and never answers.
pub struct StuckUpstream {
    pub base_url: String,
}

impl StuckUpstream {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        Self {
            base_url: format!("http://{}", addr),
        }
    }
}

/// Reads a response body as a string.
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Reads a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
