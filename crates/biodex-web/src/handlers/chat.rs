//! Species chatbot: page plus the JSON proxy to the AI provider.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use biodex_common::ApiError;
use minijinja::context;
use serde_json::{json, Value};

use crate::state::SharedState;

pub const INVALID_MESSAGE: &str = "Invalid or missing message in request body.";
pub const PROVIDER_FAILURE: &str = "Failed to get response from AI provider.";

pub async fn chat_page(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    state.pages.render("chatbot.html", context! { nav => "chatbot" })
}

/// Pull the trimmed `message` out of a raw request body.
fn extract_message(body: &[u8]) -> Option<String> {
    let payload: Value = serde_json::from_slice(body).ok()?;
    let message = payload.as_object()?.get("message")?.as_str()?.trim();
    (!message.is_empty()).then(|| message.to_string())
}

/// POST /api/chat
///
/// Provider failures still answer 200 with an apology the page can show;
/// only a malformed body or an internal fault is an HTTP error.
pub async fn chat_submit(State(state): State<SharedState>, body: Bytes) -> Response {
    let Some(message) = extract_message(&body) else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": INVALID_MESSAGE }))).into_response();
    };

    match state.chat.respond(&message).await {
        Ok(reply) => Json(json!({ "response": reply })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "chat request could not be sent");
            (StatusCode::BAD_GATEWAY, Json(json!({ "error": PROVIDER_FAILURE }))).into_response()
        }
    }
}
