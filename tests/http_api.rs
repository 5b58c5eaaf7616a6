//! HTTP surface: routing, validation, status codes, and response bodies.

#![allow(clippy::panic)]

mod common;

use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use chrono::Utc;
use serde_json::{Value, json};
use tower::ServiceExt;

use campus_notifier::api::build_router;
use campus_notifier::domain::{EventId, UserId};
use common::{Harness, event_starting_at, profile};

fn app(h: &Harness) -> Router {
    build_router().with_state(h.app_state(16))
}

async fn call(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = body.map_or_else(Body::empty, |b| Body::from(b.to_string()));
    let Ok(request) = Request::builder().method(method).uri(uri).body(body) else {
        panic!("request must build");
    };
    let response = app.oneshot(request).await.unwrap_or_else(|never| match never {});
    let status = response.status();
    let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
        panic!("body must be readable");
    };
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn unknown_type_is_rejected_before_dispatch() {
    let h = Harness::new();
    let body = json!({
        "type": "explode",
        "event_id": EventId::new().to_string(),
        "actor_id": UserId::new().to_string(),
    });

    let (status, json) = call(app(&h), Method::POST, "/api/v1/notify", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], 1002);
    assert!(h.gateway.batches().is_empty());
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let h = Harness::new();
    let body = json!({ "type": "join", "event_id": EventId::new().to_string() });

    let (status, json) = call(app(&h), Method::POST, "/api/v1/notify", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], 1001);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let h = Harness::new();
    let Ok(request) = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/notify")
        .body(Body::from("{not json"))
    else {
        panic!("request must build");
    };
    let response = app(&h)
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {});
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_uuid_ids_are_rejected() {
    let h = Harness::new();
    let body = json!({ "type": "update", "event_id": "42", "actor_id": UserId::new().to_string() });

    let (status, json) = call(app(&h), Method::POST, "/api/v1/notify", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], 1001);
}

#[tokio::test]
async fn unknown_event_is_not_found() {
    let h = Harness::new();
    let body = json!({
        "type": "cancel",
        "event_id": EventId::new().to_string(),
        "actor_id": UserId::new().to_string(),
    });

    let (status, json) = call(app(&h), Method::POST, "/api/v1/notify", Some(body)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], 2001);
}

#[tokio::test]
async fn cancel_reports_sent_count() {
    let h = Harness::new();
    let host = UserId::new();
    let member = UserId::new();
    let event = event_starting_at(host, "Book club", Utc::now() + chrono::Duration::days(2));
    let event_id = event.id;
    h.store.insert_event(event).await;
    h.store.add_member(event_id, member).await;
    h.store.insert_profile(profile(member, None, Some("tok-m"))).await;

    let body = json!({
        "type": "cancel",
        "event_id": event_id.to_string(),
        "actor_id": host.to_string(),
    });
    let (status, json) = call(app(&h), Method::POST, "/api/v1/notify", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "sent": 1 }));
}

#[tokio::test]
async fn get_on_notify_is_method_not_allowed() {
    let h = Harness::new();
    let (status, json) = call(app(&h), Method::GET, "/api/v1/notify", None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json["error"]["code"], 1003);
}

#[tokio::test]
async fn sweep_accepts_get_and_post() {
    let h = Harness::new();
    let member = UserId::new();
    let event = event_starting_at(
        UserId::new(),
        "Pickup soccer",
        Utc::now() + chrono::Duration::minutes(15),
    );
    let event_id = event.id;
    h.store.insert_event(event).await;
    h.store.add_member(event_id, member).await;
    h.store.insert_profile(profile(member, None, Some("tok-s"))).await;

    let (status, json) = call(app(&h), Method::POST, "/api/v1/reminders/sweep", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "processed": 1, "sent": 1 }));

    let (status, json) = call(app(&h), Method::GET, "/api/v1/reminders/sweep", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "processed": 0, "sent": 0 }));
}

#[tokio::test]
async fn sweep_rejects_other_methods() {
    let h = Harness::new();
    let (status, _) = call(app(&h), Method::DELETE, "/api/v1/reminders/sweep", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn sweep_surfaces_candidate_fetch_failure() {
    let h = Harness::new();
    h.store.fail_candidate_reads();

    let (status, json) = call(app(&h), Method::POST, "/api/v1/reminders/sweep", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], 3001);
}

#[tokio::test]
async fn health_is_ok() {
    let h = Harness::new();
    let (status, json) = call(app(&h), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["notify_queue_remaining"], 16);
}

#[tokio::test]
async fn async_notify_is_accepted_and_delivered_later() {
    let h = Harness::new();
    let host = UserId::new();
    let joiner = UserId::new();
    let event = event_starting_at(host, "Board games", Utc::now() + chrono::Duration::hours(4));
    let event_id = event.id;
    h.store.insert_event(event).await;
    h.store.add_member(event_id, host).await;
    h.store.insert_profile(profile(host, None, Some("tok-host"))).await;

    let body = json!({
        "type": "join",
        "event_id": event_id.to_string(),
        "actor_id": joiner.to_string(),
    });
    let (status, json) = call(app(&h), Method::POST, "/api/v1/notify/async", Some(body)).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json, json!({ "queued": true }));

    let delivered = tokio::time::timeout(Duration::from_secs(2), async {
        while h.gateway.batches().is_empty() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(delivered.is_ok(), "queued notification never dispatched");
    assert_eq!(h.gateway.tokens(), vec!["tok-host"]);
}

#[tokio::test]
async fn async_notify_validates_synchronously() {
    let h = Harness::new();
    let body = json!({ "type": "explode", "event_id": "x", "actor_id": "y" });

    let (status, _) = call(app(&h), Method::POST, "/api/v1/notify/async", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
