//! Inbound API server tests
//!
//! Boots the axum router on an ephemeral port with the bot pointed at a
//! mock Telegram API, then drives it over HTTP like a sibling service would.

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use QuizPal::api::{router, ApiState};
use QuizPal::services::NotificationService;

fn telegram_message_body() -> Value {
    json!({
        "ok": true,
        "result": {
            "message_id": 1,
            "date": 1640995200,
            "chat": { "id": 100, "first_name": "Ada", "type": "private" },
            "text": "hello"
        }
    })
}

/// Spin up the API over a bot that talks to the given mock Telegram server
async fn start_api(telegram: &MockServer, auth_token: Option<String>) -> SocketAddr {
    let bot = Bot::new("TEST_TOKEN")
        .set_api_url(reqwest::Url::parse(&telegram.uri()).unwrap());
    let state = Arc::new(ApiState {
        notification: NotificationService::new(bot),
        auth_token,
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn send_message_returns_ok_when_telegram_accepts() {
    let telegram = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex("(?i)^/bot.*/sendmessage$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(telegram_message_body()))
        .expect(1)
        .mount(&telegram)
        .await;

    let addr = start_api(&telegram, None).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{}/v1/messages", addr))
        .json(&json!({ "telegram_id": 100, "text": "hello" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["ok"], json!(true));
}

#[tokio::test]
async fn send_sticker_returns_ok_when_telegram_accepts() {
    let telegram = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex("(?i)^/bot.*/sendsticker$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(telegram_message_body()))
        .expect(1)
        .mount(&telegram)
        .await;

    let addr = start_api(&telegram, None).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{}/v1/stickers", addr))
        .json(&json!({ "telegram_id": 100, "sticker_id": "CAACAgIAAxkBAAIB" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["ok"], json!(true));
}

#[tokio::test]
async fn telegram_failure_maps_to_bad_gateway() {
    let telegram = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex("(?i)^/bot.*/sendmessage$"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .mount(&telegram)
        .await;

    let addr = start_api(&telegram, None).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{}/v1/messages", addr))
        .json(&json!({ "telegram_id": 100, "text": "hello" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 502);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["ok"], json!(false));
}

#[tokio::test]
async fn bearer_token_is_enforced_when_configured() {
    let telegram = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex("(?i)^/bot.*/sendmessage$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(telegram_message_body()))
        .mount(&telegram)
        .await;

    let addr = start_api(&telegram, Some("secret".to_string())).await;
    let client = reqwest::Client::new();

    let denied = client
        .post(format!("http://{}/v1/messages", addr))
        .json(&json!({ "telegram_id": 100, "text": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(denied.status(), 401);

    let allowed = client
        .post(format!("http://{}/v1/messages", addr))
        .header("Authorization", "Bearer secret")
        .json(&json!({ "telegram_id": 100, "text": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(allowed.status(), 200);
}
