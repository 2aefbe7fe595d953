//! Facade integration tests against a mock gateway

mod helpers;

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_json_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use QuizPal::facades::{
    GamePlayersFacade, GamesFacade, LeaguesFacade, PhotosFacade, UsersFacade,
};
use QuizPal::models::{CreateUserRequest, Degree};
use QuizPal::utils::errors::QuizPalError;

use helpers::{gateway_client, mock_get_json, mock_rejection};

#[tokio::test]
async fn lists_upcoming_games_with_pagination_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/games"))
        .and(query_param("status", "upcoming"))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "games": [{
                "id": 7, "league_id": 2, "place_id": 3, "number": "42.1",
                "title": "Anniversary special", "starts_at": "2030-06-01T19:30:00Z",
                "price": 400, "is_registered": false, "free_slots": null
            }],
            "total": 6
        })))
        .mount(&server)
        .await;

    let facade = GamesFacade::new(gateway_client(&server));
    let page = facade.list_upcoming(1, 5).await.unwrap();

    assert_eq!(page.total, 6);
    assert_eq!(page.games.len(), 1);
    assert_eq!(page.games[0].name.as_deref(), Some("Anniversary special"));
    assert!(!page.games[0].has_passed());
}

#[tokio::test]
async fn translates_game_not_found_rejection() {
    let server = MockServer::start().await;
    mock_rejection(&server, "GET", "/v1/games/99", 404, "game_not_found", "no such game").await;

    let facade = GamesFacade::new(gateway_client(&server));
    let err = facade.get(99).await.unwrap_err();

    assert_matches!(err, QuizPalError::GameNotFound { game_id: 99 });
}

#[tokio::test]
async fn team_registration_roundtrip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/games/7/registration"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/games/7/registration"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let facade = GamesFacade::new(gateway_client(&server));
    facade.register(7).await.unwrap();
    facade.unregister(7).await.unwrap();
}

#[tokio::test]
async fn user_not_found_maps_to_none() {
    let server = MockServer::start().await;
    mock_rejection(
        &server,
        "GET",
        "/v1/users/by-telegram-id/555",
        404,
        "user_not_found",
        "unknown telegram id",
    )
    .await;

    let facade = UsersFacade::new(gateway_client(&server));
    let user = facade.get_by_telegram_id(555).await.unwrap();

    assert!(user.is_none());
}

#[tokio::test]
async fn creates_user_on_first_contact() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1, "telegram_id": 555, "first_name": "Ada",
            "last_name": null, "username": "ada", "email": null,
            "phone": null, "language_code": "en", "banned": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let facade = UsersFacade::new(gateway_client(&server));
    let user = facade
        .create(CreateUserRequest {
            telegram_id: 555,
            first_name: "Ada".to_string(),
            last_name: None,
            username: Some("ada".to_string()),
            language_code: Some("en".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(user.telegram_id, 555);
    assert!(!user.is_banned);
}

#[tokio::test]
async fn player_signup_sends_degree_and_translates_full_team() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/games/7/players"))
        .and(body_json_string(r#"{"user_id": 12, "degree": "unlikely"}"#))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": 409, "reason": "no_free_slot", "message": "team is full"
        })))
        .mount(&server)
        .await;

    let facade = GamePlayersFacade::new(gateway_client(&server));
    let err = facade.register(7, 12, Degree::Unlikely).await.unwrap_err();

    assert_matches!(err, QuizPalError::NoFreeSlot { game_id: 7 });
}

#[tokio::test]
async fn empty_photo_album_is_a_sentinel() {
    let server = MockServer::start().await;
    mock_get_json(&server, "/v1/games/7/photos", json!({ "urls": [] })).await;

    let facade = PhotosFacade::new(gateway_client(&server));
    let err = facade.list_by_game(7).await.unwrap_err();

    assert_matches!(err, QuizPalError::PhotosNotFound { game_id: 7 });
}

#[tokio::test]
async fn league_lookup_is_memoized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/leagues/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2, "name": "Main League", "short_name": "ML"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let facade = LeaguesFacade::new(gateway_client(&server));
    let first = facade.get(2).await.unwrap();
    let second = facade.get(2).await.unwrap();

    assert_eq!(first.name, "Main League");
    assert_eq!(second.name, first.name);
}

#[tokio::test]
async fn gateway_outage_is_not_a_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/games/7"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let facade = GamesFacade::new(gateway_client(&server));
    let err = facade.get(7).await.unwrap_err();

    assert_matches!(err, QuizPalError::Backend(_));
}
