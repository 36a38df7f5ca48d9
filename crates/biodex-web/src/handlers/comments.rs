//! Comments on species records.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use biodex_common::{ApiError, CommentWithAuthor, NewComment};
use biodex_db::CommentRepository;
use serde::Deserialize;
use uuid::Uuid;

use crate::handlers::species::{json_body, reader};
use crate::session::{MaybeSession, Session};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub content: Option<String>,
}

/// GET /api/species/{id}/comments
pub async fn api_list(
    State(state): State<SharedState>,
    MaybeSession(session): MaybeSession,
    Path(species_id): Path<i64>,
) -> Result<Json<Vec<CommentWithAuthor>>, ApiError> {
    let comments = CommentRepository::new(reader(&state, &session)).list_for_species(species_id).await?;
    Ok(Json(comments))
}

/// POST /api/species/{id}/comments
pub async fn api_create(
    State(state): State<SharedState>,
    session: Session,
    Path(species_id): Path<i64>,
    body: Result<Json<CommentForm>, JsonRejection>,
) -> Result<Response, ApiError> {
    let form = json_body(body)?;
    let content = form.content.as_deref().map(str::trim).unwrap_or("");
    if content.is_empty() {
        return Err(ApiError::BadRequest("Comment cannot be empty".to_string()));
    }

    let comment = CommentRepository::new(session.backend(&state))
        .insert(&NewComment { species_id, author: session.user.id, content: content.to_string() })
        .await?;
    Ok((StatusCode::CREATED, Json(comment)).into_response())
}

/// DELETE /api/comments/{id}
pub async fn api_delete(
    State(state): State<SharedState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    CommentRepository::new(session.backend(&state))
        .delete(id, session.user.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
