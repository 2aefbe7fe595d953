//! Shared test helpers
//!
//! Spins up a wiremock gateway and builds clients pointed at it.

use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use QuizPal::backend::BackendClient;
use QuizPal::config::BackendConfig;

/// Build a gateway client talking to the mock server
pub fn gateway_client(server: &MockServer) -> BackendClient {
    let config = BackendConfig {
        base_url: server.uri(),
        timeout_seconds: 2,
    };
    BackendClient::new(&config).expect("client build")
}

/// Mount a 200 JSON response for a GET path
pub async fn mock_get_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a structured gateway rejection for any method on a path
pub async fn mock_rejection(
    server: &MockServer,
    http_method: &str,
    route: &str,
    status: u16,
    reason: &str,
    message: &str,
) {
    Mock::given(method(http_method))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "code": status,
            "reason": reason,
            "message": message,
        })))
        .mount(server)
        .await;
}
