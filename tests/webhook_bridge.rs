//! End-to-end tests of the webhook bridge against a fake Chatwoot and Rasa.

mod common;

use axum::{body::Body, http::Request, http::StatusCode, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

use chatwoot_rasa::config::Service;
use chatwoot_rasa::server::build_router;
use common::{body_string, FakeUpstream, StuckUpstream};

fn event(content: &str) -> Value {
    json!({
        "message_type": "incoming",
        "event": "message_created",
        "content": content,
        "sender": {"id": 42, "name": "Ada"},
        "conversation": {"id": 7, "status": "pending"},
        "account": {"id": 1}
    })
}

async fn webhook(upstream: &FakeUpstream) -> Router {
    let mut config = upstream.config();
    config.rasa.token = Some("rasa-token".to_string());
    build_router(Service::Webhook, &config).await.unwrap()
}

async fn post(app: Router, body: Value) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_string(response).await)
}

fn sent_contents(upstream: &FakeUpstream) -> Vec<Value> {
    upstream
        .recorder
        .calls_to("/messages")
        .into_iter()
        .map(|c| c.body["content"].clone())
        .collect()
}

#[tokio::test]
async fn text_reply_is_split_into_paragraph_messages() {
    let upstream = FakeUpstream::start().await;
    let (status, body) = post(webhook(&upstream).await, event("hello")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "success");

    let dispatched = upstream.recorder.calls_to("/webhooks/rest/webhook");
    assert_eq!(dispatched.len(), 1);
    assert_eq!(dispatched[0].body["sender"], "42");
    assert_eq!(dispatched[0].body["message"], "hello");
    assert_eq!(dispatched[0].body["input_channel"], "chatwoot");
    assert_eq!(dispatched[0].body["token"], "rasa-token");
    assert_eq!(dispatched[0].body["metadata"]["conversation"]["id"], 7);

    assert_eq!(sent_contents(&upstream), vec![json!("First"), json!("You said: hello")]);
    let calls = upstream.recorder.calls_to("/messages");
    assert_eq!(calls[0].path, "/api/v1/accounts/1/conversations/7/messages");
}

#[tokio::test]
async fn restart_dispatches_restart_then_start() {
    let upstream = FakeUpstream::start().await;
    let (status, _) = post(webhook(&upstream).await, event("/restart")).await;
    assert_eq!(status, StatusCode::OK);

    let dispatched = upstream.recorder.calls_to("/webhooks/rest/webhook");
    let texts: Vec<_> = dispatched.iter().map(|c| c.body["message"].clone()).collect();
    assert_eq!(texts, vec![json!("/restart"), json!("/start")]);
    assert_eq!(dispatched[0].body["sender"], dispatched[1].body["sender"]);
    assert_eq!(dispatched[0].body["metadata"], dispatched[1].body["metadata"]);

    assert_eq!(sent_contents(&upstream), vec![json!("Welcome!")]);
}

#[tokio::test]
async fn buttons_become_input_select() {
    let upstream = FakeUpstream::start().await;
    post(webhook(&upstream).await, event("buttons")).await;

    let calls = upstream.recorder.calls_to("/messages");
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].body,
        json!({
            "content": "Pick one",
            "content_type": "input_select",
            "content_attributes": {"items": [
                {"title": "Yes", "value": "/affirm"},
                {"title": "No", "value": "/deny"}
            ]},
            "private": false
        })
    );
}

#[tokio::test]
async fn custom_location_is_relayed_and_unknown_custom_dropped() {
    let upstream = FakeUpstream::start().await;
    post(webhook(&upstream).await, event("location")).await;
    assert_eq!(sent_contents(&upstream), vec![json!("52.5, 13.4")]);

    let upstream = FakeUpstream::start().await;
    let (status, body) = post(webhook(&upstream).await, event("unknown custom")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "success");
    assert!(upstream.recorder.calls_to("/messages").is_empty());
}

#[tokio::test]
async fn relay_continues_after_a_failed_message() {
    let upstream = FakeUpstream::start().await;
    *upstream.recorder.failing_message.lock().unwrap() = Some("First".to_string());

    let (status, _) = post(webhook(&upstream).await, event("hello")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(sent_contents(&upstream), vec![json!("First"), json!("You said: hello")]);
}

#[tokio::test]
async fn invalid_events_are_skipped_without_dispatch() {
    let upstream = FakeUpstream::start().await;
    let app = webhook(&upstream).await;

    let mut outgoing = event("hello");
    outgoing["message_type"] = json!("outgoing");
    let mut resolved = event("hello");
    resolved["conversation"]["status"] = json!("open");
    let mut partial = event("hello");
    partial.as_object_mut().unwrap().remove("account");
    let mut updated = event("hello");
    updated["event"] = json!("message_updated");

    for body in [outgoing, resolved, partial, updated] {
        let (status, text) = post(app.clone(), body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "Skipped invalid event");
    }

    assert!(upstream.recorder.calls().is_empty());
}

#[tokio::test]
async fn unreachable_engine_still_acknowledges() {
    let upstream = FakeUpstream::start().await;
    let mut config = upstream.config();
    config.rasa.url = "http://127.0.0.1:9".to_string();
    let app = build_router(Service::Webhook, &config).await.unwrap();

    let (status, body) = post(app, event("hello")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "success");
    assert!(upstream.recorder.calls_to("/messages").is_empty());
}

#[tokio::test]
async fn slow_chatwoot_still_gets_acknowledgment_after_full_relay() {
    let upstream = FakeUpstream::start().await;
    let chatwoot = StuckUpstream::start().await;
    let mut config = upstream.config();
    config.chatwoot.url = chatwoot.base_url.clone();
    config.chatwoot.timeout_secs = 1;
    config.server.request_timeout_secs = 1;
    let app = build_router(Service::Webhook, &config).await.unwrap();

    // Two relay messages, each waiting out the client timeout.
    let (status, body) = post(app, event("hello")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "success");
    assert_eq!(upstream.recorder.calls_to("/webhooks/rest/webhook").len(), 1);
}
