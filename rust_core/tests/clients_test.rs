//! Client integration tests
//!
//! Runs the real reqwest clients against a local wiremock server.

use homework_rust_core::clients::{FetchError, NotifyError, PracticumClient, TelegramClient};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STATUSES_PATH: &str = "/api/user_api/homework_statuses/";

fn practicum(server: &MockServer) -> PracticumClient {
    PracticumClient::new(
        format!("{}{}", server.uri(), STATUSES_PATH),
        "practicum-token".to_string(),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn telegram(server: &MockServer) -> TelegramClient {
    TelegramClient::new(server.uri(), "tg-token".to_string(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_sends_auth_header_and_cursor() {
    let server = MockServer::start().await;
    let payload = json!({
        "homeworks": [{"homework_name": "hw1", "status": "approved"}],
        "current_date": 1700000600
    });

    Mock::given(method("GET"))
        .and(path(STATUSES_PATH))
        .and(header("Authorization", "OAuth practicum-token"))
        .and(query_param("from_date", "1700000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let body = practicum(&server).fetch(1_700_000_000).await.unwrap();
    assert_eq!(body, payload);
}

#[tokio::test]
async fn test_fetch_non_200_is_bad_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATUSES_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = practicum(&server).fetch(0).await.unwrap_err();
    assert!(matches!(err, FetchError::BadStatus { code: 503 }));
}

#[tokio::test]
async fn test_fetch_other_2xx_is_bad_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATUSES_PATH))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let err = practicum(&server).fetch(0).await.unwrap_err();
    assert!(matches!(err, FetchError::BadStatus { code: 204 }));
}

#[tokio::test]
async fn test_fetch_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATUSES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = practicum(&server).fetch(0).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_fetch_connection_refused_is_transport_error() {
    let client = PracticumClient::new(
        "http://127.0.0.1:1/api/user_api/homework_statuses/".to_string(),
        "practicum-token".to_string(),
        Duration::from_secs(5),
    )
    .unwrap();

    let err = client.fetch(0).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }));
}

#[tokio::test]
async fn test_send_message_posts_chat_id_and_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bottg-token/sendMessage"))
        .and(body_json(json!({"chat_id": "42", "text": "hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {}})))
        .expect(1)
        .mount(&server)
        .await;

    telegram(&server).send_message("42", "hello").await.unwrap();
}

#[tokio::test]
async fn test_send_message_api_rejection_is_delivery_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bottg-token/sendMessage"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .mount(&server)
        .await;

    let err = telegram(&server).send_message("42", "hello").await.unwrap_err();
    let NotifyError::DeliveryFailed { reason } = err;
    assert!(reason.contains("chat not found"));
}

#[tokio::test]
async fn test_send_message_ok_false_is_delivery_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bottg-token/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "description": "Forbidden: bot was blocked by the user"
        })))
        .mount(&server)
        .await;

    let err = telegram(&server).send_message("42", "hello").await.unwrap_err();
    assert!(err.to_string().contains("blocked"));
}

#[tokio::test]
async fn test_send_message_long_error_body_is_truncated() {
    let server = MockServer::start().await;
    let page = format!("<html>{}</html>", "x".repeat(10_000));
    Mock::given(method("POST"))
        .and(path("/bottg-token/sendMessage"))
        .respond_with(ResponseTemplate::new(502).set_body_string(page))
        .mount(&server)
        .await;

    let err = telegram(&server).send_message("42", "hello").await.unwrap_err();
    let NotifyError::DeliveryFailed { reason } = err;
    assert!(reason.starts_with("HTTP 502"));
    assert!(reason.ends_with("..."));
    assert!(reason.len() < 300);
}
