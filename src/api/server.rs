//! Inbound API server
//!
//! Exposes SendMessage and SendSticker to sibling services. Both endpoints
//! answer 200 with `{"ok": true}` once Telegram accepted the send, and 502
//! when it did not.

use std::sync::Arc;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::config::ApiConfig;
use crate::services::NotificationService;
use crate::utils::errors::{QuizPalError, Result};

#[derive(Clone)]
pub struct ApiState {
    pub notification: NotificationService,
    pub auth_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SendMessageBody {
    telegram_id: i64,
    text: String,
}

#[derive(Debug, Deserialize)]
struct SendStickerBody {
    telegram_id: i64,
    sticker_id: String,
}

#[derive(Debug, Serialize)]
struct SendReply {
    ok: bool,
}

/// Assemble the API routes over the given state
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/v1/messages", post(send_message))
        .route("/v1/stickers", post(send_sticker))
        .with_state(state)
}

/// Bind and serve the API until the shutdown signal flips
pub async fn run_api_server(
    config: &ApiConfig,
    notification: NotificationService,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let state = Arc::new(ApiState {
        notification,
        auth_token: config.auth_token.clone(),
    });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            while shutdown.changed().await.is_ok() {
                if *shutdown.borrow() {
                    break;
                }
            }
            info!("API server shutting down");
        })
        .await?;

    Ok(())
}

async fn send_message(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(body): Json<SendMessageBody>,
) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    match state
        .notification
        .send_text(body.telegram_id, &body.text)
        .await
    {
        Ok(_) => (StatusCode::OK, Json(SendReply { ok: true })).into_response(),
        Err(e) => send_failure(body.telegram_id, e),
    }
}

async fn send_sticker(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(body): Json<SendStickerBody>,
) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    match state
        .notification
        .send_sticker(body.telegram_id, &body.sticker_id)
        .await
    {
        Ok(_) => (StatusCode::OK, Json(SendReply { ok: true })).into_response(),
        Err(e) => send_failure(body.telegram_id, e),
    }
}

/// Bearer-token check, skipped when no token is configured
fn authorize(state: &ApiState, headers: &HeaderMap) -> std::result::Result<(), Response> {
    let Some(expected) = &state.auth_token else {
        return Ok(());
    };

    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if presented == Some(expected.as_str()) {
        Ok(())
    } else {
        warn!("API request rejected: bad or missing bearer token");
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"ok": false, "error": "unauthorized"})),
        )
            .into_response())
    }
}

fn send_failure(telegram_id: i64, error: QuizPalError) -> Response {
    warn!(telegram_id = telegram_id, error = %error, "API send failed");
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({"ok": false, "error": error.to_string()})),
    )
        .into_response()
}
