use std::time::Duration;

use medifind_integration::harness::TestHarness;
use reqwest::{Method, StatusCode};
use serde_json::json;

const QUIET: Duration = Duration::from_millis(300);

/// Dolo 650 starts at 45. Dropping to 38 crosses a 40 target once; moving
/// further down stays below it and fires nothing new.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn price_drop_notifies_subscriber_once() {
    let h = TestHarness::setup().await;
    let mut sub = h.subscriber().await;
    h.create_alert(1, 40.0, "patient@example.com").await;

    assert_eq!(h.set_price(1, 1, 38.0).await, 1);
    let event = sub.recv_event().await;
    assert_eq!(event["type"], "price_alert");
    assert_eq!(event["medicine"], "Dolo 650");
    assert_eq!(event["current_price"], 38.0);
    assert_eq!(event["target_price"], 40.0);
    assert!(event["message"].as_str().unwrap().contains("₹38"));

    assert_eq!(h.set_price(1, 1, 35.0).await, 0);
    assert!(sub.stays_quiet(QUIET).await);
}

/// Two connected clients both receive the same alert.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn every_subscriber_receives_alert() {
    let h = TestHarness::setup().await;
    let mut first = h.subscriber().await;
    let mut second = h.subscriber().await;
    h.create_alert(1, 40.0, "a@example.com").await;

    h.set_price(1, 1, 39.0).await;
    assert_eq!(first.recv_event().await["current_price"], 39.0);
    assert_eq!(second.recv_event().await["current_price"], 39.0);
}

/// A client connected at `/` gets the same events as one on `/ws`.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn root_socket_receives_alert() {
    let h = TestHarness::setup().await;
    let mut root = h.root_subscriber().await;
    let mut ws = h.subscriber().await;
    h.create_alert(1, 40.0, "a@example.com").await;

    assert_eq!(h.set_price(2, 1, 36.0).await, 1);
    let event = root.recv_event().await;
    assert_eq!(event["type"], "price_alert");
    assert_eq!(event["medicine"], "Dolo 650");
    assert_eq!(ws.recv_event().await["current_price"], 36.0);
}

/// Rising back above the target re-arms the alert.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn alert_fires_again_after_rearming() {
    let h = TestHarness::setup().await;
    let mut sub = h.subscriber().await;
    h.create_alert(1, 40.0, "a@example.com").await;

    assert_eq!(h.set_price(1, 1, 38.0).await, 1);
    sub.recv_event().await;
    assert_eq!(h.set_price(1, 1, 50.0).await, 0);
    assert_eq!(h.set_price(1, 1, 40.0).await, 1);
    assert_eq!(sub.recv_event().await["current_price"], 40.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn deactivated_alert_stays_silent() {
    let h = TestHarness::setup().await;
    let mut sub = h.subscriber().await;
    let id = h.create_alert(1, 40.0, "a@example.com").await;

    let (status, body) = h
        .send(Method::DELETE, &format!("/api/alerts/price/{id}"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["alert"]["active"], false);

    assert_eq!(h.set_price(1, 1, 30.0).await, 0);
    assert!(sub.stays_quiet(QUIET).await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn alert_for_unknown_medicine_is_rejected() {
    let h = TestHarness::setup().await;
    let (status, body) = h
        .send(
            Method::POST,
            "/api/alerts/price",
            json!({ "medicine_id": 999, "max_price": 10.0, "email": "a@example.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Medicine not found");

    let (_, body) = h.get("/api/alerts/price").await;
    assert_eq!(body["total"], 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn alert_missing_fields_is_bad_request() {
    let h = TestHarness::setup().await;
    let (status, body) = h
        .send(Method::POST, "/api/alerts/price", json!({ "medicine_id": 1 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Medicine ID, max price, and email are required");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn health_counts_connected_subscribers() {
    let h = TestHarness::setup().await;
    let _sub = h.subscriber().await;
    let (status, body) = h.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subscribers"], 1);
}
