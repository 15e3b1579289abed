//! End-to-end tests for `/info/{uid}`, `/health` and `/`.

use std::time::Duration;

use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_info_passes_document_through() {
    let info = common::start_programmable_upstream(|head| async move {
        assert!(head.starts_with("GET /get?uid=abc123 "), "{}", head);
        (200, r#"{"AccountInfo": {"AccountName": "Raw"}, "extra": [1, 2, {"nested": null}]}"#.to_string())
    })
    .await;
    let ban = common::unused_addr().await;
    let (addr, shutdown) = common::start_service(common::service_config(info, ban)).await;

    // No numeric validation on this route.
    let res = common::client()
        .get(format!("http://{}/info/abc123", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "application/json");
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({"AccountInfo": {"AccountName": "Raw"}, "extra": [1, 2, {"nested": null}]})
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_info_relays_upstream_status() {
    let info = common::start_mock_upstream(404, r#"{"detail": "unknown uid"}"#).await;
    let ban = common::unused_addr().await;
    let (addr, shutdown) = common::start_service(common::service_config(info, ban)).await;

    let res = common::client()
        .get(format!("http://{}/info/1", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["⚠️ error"], "Failed to fetch account info");
    assert_eq!(body["status_code"], 404);

    shutdown.trigger();
}

#[tokio::test]
async fn test_info_internal_error_on_timeout() {
    let info = common::start_programmable_upstream(|_| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, "{}".to_string())
    })
    .await;
    let ban = common::unused_addr().await;
    let mut config = common::service_config(info, ban);
    config.upstream.info_timeout_ms = 200;
    let (addr, shutdown) = common::start_service(config).await;

    let res = common::client()
        .get(format!("http://{}/info/1", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"💥 exception": "Internal server error", "status_code": 500}));

    shutdown.trigger();
}

#[tokio::test]
async fn test_health_ignores_upstream_state() {
    let info = common::unused_addr().await;
    let ban = common::unused_addr().await;
    let (addr, shutdown) = common::start_service(common::service_config(info, ban)).await;

    let res = common::client()
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["service"], "Free Fire Ban Check API");
    assert_eq!(
        body["features"],
        json!(["Ban Check", "Account Info", "Guild Info", "Rank Info"])
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_dashboard_page() {
    let info = common::unused_addr().await;
    let ban = common::unused_addr().await;
    let (addr, shutdown) = common::start_service(common::service_config(info, ban)).await;

    let res = common::client()
        .get(format!("http://{}/", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let html = res.text().await.unwrap();
    assert!(html.contains("<form id=\"check-form\">"));

    shutdown.trigger();
}
