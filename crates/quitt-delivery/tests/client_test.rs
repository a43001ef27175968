//! Vendor client retry behavior against a mock HTTP server.

// The nested fixture in `common` expands past the default macro
// recursion limit.
#![recursion_limit = "256"]

mod common;

use std::time::Duration;

use quitt_delivery::{ClientConfig, DeliveryError, VendorClient};
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

use common::sample_transaction;

fn fast_config(base_url: String, max_retries: u32) -> ClientConfig {
    ClientConfig {
        base_url,
        api_key: "test_api_key".to_string(),
        max_retries,
        base_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(100),
        jitter_factor: 0.0,
        timeout: Duration::from_secs(5),
    }
}

fn success_body() -> serde_json::Value {
    serde_json::json!({
        "status": "success",
        "transaction_id": "TRX-fashionco-order-1",
        "message": "Transaction processed successfully"
    })
}

#[tokio::test]
async fn successful_delivery_on_first_attempt() {
    let server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/events/v2/transaction/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = VendorClient::new(fast_config(server.uri(), 3)).unwrap();
    let receipt = client.deliver(&sample_transaction("order-1")).await.unwrap();

    assert_eq!(receipt.status, "success");
    assert_eq!(receipt.transaction_id, "TRX-fashionco-order-1");
    assert_eq!(receipt.attempts, 1);
}

#[tokio::test]
async fn bearer_token_sent_with_request() {
    let server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/events/v2/transaction/"))
        .and(matchers::header("authorization", "Bearer test_api_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = VendorClient::new(fast_config(server.uri(), 0)).unwrap();
    assert!(client.deliver(&sample_transaction("order-1")).await.is_ok());
}

#[tokio::test]
async fn transient_server_errors_retried_until_success() {
    let server = MockServer::start().await;

    // Two failures, then success: with max_retries=3 the delivery
    // succeeds on the third attempt.
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/events/v2/transaction/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/events/v2/transaction/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = VendorClient::new(fast_config(server.uri(), 3)).unwrap();
    let receipt = client.deliver(&sample_transaction("order-1")).await.unwrap();

    assert_eq!(receipt.attempts, 3);
}

#[tokio::test]
async fn persistent_failures_exhaust_retry_budget() {
    let server = MockServer::start().await;

    // max_retries=1 means exactly two attempts: initial + one retry.
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/events/v2/transaction/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(2)
        .mount(&server)
        .await;

    let client = VendorClient::new(fast_config(server.uri(), 1)).unwrap();
    let err = client.deliver(&sample_transaction("order-1")).await.unwrap_err();

    match err {
        DeliveryError::RetriesExhausted { max_retries } => assert_eq!(max_retries, 1),
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn timeout_retried_then_success() {
    let server = MockServer::start().await;

    // First attempt stalls past the client timeout; the retry gets a
    // fast success.
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/events/v2/transaction/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(success_body()),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/events/v2/transaction/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = fast_config(server.uri(), 3);
    config.timeout = Duration::from_millis(100);
    let client = VendorClient::new(config).unwrap();

    let receipt = client.deliver(&sample_transaction("order-1")).await.unwrap();
    assert_eq!(receipt.attempts, 2);
}

#[tokio::test]
async fn client_error_is_terminal_without_retry() {
    let server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/events/v2/transaction/"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad transaction"))
        .expect(1)
        .mount(&server)
        .await;

    let client = VendorClient::new(fast_config(server.uri(), 3)).unwrap();
    let err = client.deliver(&sample_transaction("order-1")).await.unwrap_err();

    match err {
        DeliveryError::ClientError { status_code, body } => {
            assert_eq!(status_code, 400);
            assert_eq!(body, "bad transaction");
        },
        other => panic!("expected ClientError, got {other:?}"),
    }
}

#[tokio::test]
async fn connection_failure_retried_then_exhausted() {
    // Nothing listens on this port; every attempt is a connect error.
    let config = fast_config("http://127.0.0.1:1".to_string(), 1);
    let client = VendorClient::new(config).unwrap();

    let err = client.deliver(&sample_transaction("order-1")).await.unwrap_err();
    assert!(matches!(err, DeliveryError::RetriesExhausted { max_retries: 1 }));
}

#[tokio::test]
async fn mock_mode_returns_synthetic_success() {
    let client = VendorClient::with_defaults().unwrap();
    let receipt = client.deliver(&sample_transaction("order-7")).await.unwrap();

    assert_eq!(receipt.status, "success");
    assert_eq!(receipt.transaction_id, "TRX-fashionco-order-7");
    assert_eq!(receipt.attempts, 1);
}
