//! Update handler tests
//!
//! Drives the inline query handler and the place card sender against a
//! mock gateway and a mock Telegram API.

use serde_json::{json, Value};
use teloxide::types::{ChatId, InlineQuery};
use teloxide::Bot;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use QuizPal::config::Settings;
use QuizPal::facades::FacadeFactory;
use QuizPal::handlers::callbacks::games::send_place_card;
use QuizPal::handlers::inline::handle_inline_query;
use QuizPal::i18n::I18n;
use QuizPal::models::Place;

fn user_body(telegram_id: i64, banned: bool) -> Value {
    json!({
        "id": 1,
        "telegram_id": telegram_id,
        "first_name": "Ada",
        "last_name": null,
        "username": "ada",
        "email": null,
        "phone": null,
        "language_code": "en",
        "banned": banned
    })
}

fn telegram_message_body() -> Value {
    json!({
        "ok": true,
        "result": {
            "message_id": 1,
            "date": 1640995200,
            "chat": { "id": 100, "first_name": "Ada", "type": "private" },
            "text": "ok"
        }
    })
}

fn inline_query(user_id: i64, text: &str) -> InlineQuery {
    serde_json::from_value(json!({
        "id": "query-1",
        "from": {
            "id": user_id,
            "is_bot": false,
            "first_name": "Ada",
            "language_code": "en"
        },
        "query": text,
        "offset": ""
    }))
    .expect("inline query fixture")
}

/// Bot pointed at the mock Telegram API plus facades over the mock gateway
fn wire_up(gateway: &MockServer, telegram: &MockServer) -> (Bot, FacadeFactory, I18n) {
    let bot = Bot::new("TEST_TOKEN")
        .set_api_url(reqwest::Url::parse(&telegram.uri()).unwrap());

    let mut settings = Settings::default();
    settings.backend.base_url = gateway.uri();

    let facades = FacadeFactory::new(bot.clone(), &settings).expect("facades build");
    let i18n = I18n::new(&settings.i18n);
    (bot, facades, i18n)
}

#[tokio::test]
async fn banned_user_gets_an_empty_inline_answer() {
    let gateway = MockServer::start().await;
    let telegram = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/by-telegram-id/555"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body(555, true)))
        .expect(1)
        .mount(&gateway)
        .await;
    // No game routes are mounted: a banned user must never reach them
    Mock::given(method("POST"))
        .and(path_regex("(?i)^/bot.*/answerinlinequery$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": true })),
        )
        .expect(1)
        .mount(&telegram)
        .await;

    let (bot, facades, i18n) = wire_up(&gateway, &telegram);

    handle_inline_query(bot, inline_query(555, "league"), facades, i18n)
        .await
        .unwrap();
}

#[tokio::test]
async fn first_inline_contact_registers_the_user() {
    let gateway = MockServer::start().await;
    let telegram = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/by-telegram-id/556"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 404,
            "reason": "user_not_found",
            "message": "no such user"
        })))
        .mount(&gateway)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body(556, false)))
        .expect(1)
        .mount(&gateway)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/games"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "games": [], "total": 0 })),
        )
        .mount(&gateway)
        .await;
    Mock::given(method("POST"))
        .and(path_regex("(?i)^/bot.*/answerinlinequery$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": true })),
        )
        .expect(1)
        .mount(&telegram)
        .await;

    let (bot, facades, i18n) = wire_up(&gateway, &telegram);

    handle_inline_query(bot, inline_query(556, ""), facades, i18n)
        .await
        .unwrap();
}

#[tokio::test]
async fn place_card_text_accompanies_the_map_pin() {
    let telegram = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex("(?i)^/bot.*/sendmessage$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(telegram_message_body()))
        .expect(1)
        .mount(&telegram)
        .await;
    Mock::given(method("POST"))
        .and(path_regex("(?i)^/bot.*/sendvenue$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(telegram_message_body()))
        .expect(1)
        .mount(&telegram)
        .await;

    let bot = Bot::new("TEST_TOKEN")
        .set_api_url(reqwest::Url::parse(&telegram.uri()).unwrap());
    let i18n = I18n::new(&Settings::default().i18n);
    let place = Place {
        id: 7,
        name: "Pub on the Corner".to_string(),
        address: "1 Quiz Street".to_string(),
        latitude: Some(59.93),
        longitude: Some(30.31),
    };

    send_place_card(&bot, ChatId(100), &i18n, "en", &place)
        .await
        .unwrap();
}

#[tokio::test]
async fn place_without_coordinates_gets_card_only() {
    let telegram = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex("(?i)^/bot.*/sendmessage$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(telegram_message_body()))
        .expect(1)
        .mount(&telegram)
        .await;
    Mock::given(method("POST"))
        .and(path_regex("(?i)^/bot.*/sendvenue$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(telegram_message_body()))
        .expect(0)
        .mount(&telegram)
        .await;

    let bot = Bot::new("TEST_TOKEN")
        .set_api_url(reqwest::Url::parse(&telegram.uri()).unwrap());
    let i18n = I18n::new(&Settings::default().i18n);
    let place = Place {
        id: 8,
        name: "Pop-up Hall".to_string(),
        address: "Somewhere without a pin".to_string(),
        latitude: None,
        longitude: None,
    };

    send_place_card(&bot, ChatId(100), &i18n, "en", &place)
        .await
        .unwrap();
}
