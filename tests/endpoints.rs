//! Endpoint contract tests for the demo service.

use std::time::Instant;

use serde_json::Value;

mod common;

#[tokio::test]
async fn health_is_always_ok() {
    let (addr, _shutdown) = common::start_service(common::test_config()).await;
    let client = reqwest::Client::new();

    // Exercise the failing endpoint first; health must not care.
    let _ = client.get(format!("http://{addr}/error")).send().await;

    let res = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn error_endpoint_honors_the_contract() {
    let (addr, _shutdown) = common::start_service(common::test_config()).await;
    let client = reqwest::Client::new();

    for _ in 0..10 {
        let res = client
            .get(format!("http://{addr}/error"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 500);

        let header_id = res
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .expect("response carries x-request-id");

        let body: Value = res.json().await.unwrap();
        let error = body["error"].as_str().unwrap();
        assert!(!error.is_empty());
        let error_type = body["error_type"].as_str().unwrap();
        assert!(["ValueError", "RuntimeError", "KeyError"].contains(&error_type));

        // The body's request id is the same id the lifecycle hook attached.
        assert_eq!(body["request_id"].as_str().unwrap(), header_id);
    }
}

#[tokio::test]
async fn slow_endpoint_reports_its_real_delay() {
    let (addr, _shutdown) = common::start_service(common::test_config()).await;
    let client = reqwest::Client::new();

    let started = Instant::now();
    let res = client
        .get(format!("http://{addr}/api/slow"))
        .send()
        .await
        .unwrap();
    let elapsed = started.elapsed().as_secs_f64();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    let delay = body["delay_seconds"].as_f64().unwrap();
    assert!((0.5..=2.0).contains(&delay), "delay out of range: {delay}");
    assert!(elapsed >= delay, "elapsed {elapsed} < reported delay {delay}");
}

#[tokio::test]
async fn users_and_orders_return_rows() {
    let (addr, _shutdown) = common::start_service(common::test_config()).await;
    let client = reqwest::Client::new();

    let users: Value = client
        .get(format!("http://{addr}/api/users"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(users["users"].as_array().unwrap().len(), 3);
    assert_eq!(users["users"][0]["name"], "Alice");

    let orders: Value = client
        .get(format!("http://{addr}/api/orders"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(orders["orders"].as_array().unwrap().len(), 2);
    assert_eq!(orders["orders"][0]["status"], "shipped");
}

#[tokio::test]
async fn home_lists_endpoints_or_serves_dashboard() {
    let (addr, _shutdown) = common::start_service(common::test_config()).await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("http://{addr}/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let endpoints = body["endpoints"].as_array().unwrap();
    assert!(endpoints.iter().any(|e| e == "/api/users"));

    let mut config = common::test_config();
    config.dashboard_enabled = true;
    let (addr, _shutdown) = common::start_service(config).await;
    let res = client.get(format!("http://{addr}/")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let html = res.text().await.unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("/api/orders"));
}

#[tokio::test]
async fn every_response_carries_a_fresh_request_id() {
    let (addr, _shutdown) = common::start_service(common::test_config()).await;
    let client = reqwest::Client::new();

    let mut seen = std::collections::HashSet::new();
    for path in ["/health", "/api/users", "/", "/health"] {
        let res = client
            .get(format!("http://{addr}{path}"))
            .send()
            .await
            .unwrap();
        let id = res
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .expect("x-request-id present");
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(seen.insert(id), "request ids must be unique per request");
    }
}
