//! Registered users directory.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use biodex_common::{ApiError, Profile};
use biodex_db::ProfileRepository;
use minijinja::context;
use uuid::Uuid;

use crate::session::{MaybeSession, Session};
use crate::state::SharedState;

/// GET /users
pub async fn users_page(
    State(state): State<SharedState>,
    MaybeSession(session): MaybeSession,
) -> Result<Response, ApiError> {
    let Some(session) = session else {
        return Ok(Redirect::to("/").into_response());
    };

    let profiles = ProfileRepository::new(session.backend(&state)).list().await?;
    let html: Html<String> = state.pages.render("users.html", context! {
        nav => "users",
        profiles => profiles,
    })?;
    Ok(html.into_response())
}

/// GET /api/profiles
pub async fn api_profiles(
    State(state): State<SharedState>,
    session: Session,
) -> Result<Json<Vec<Profile>>, ApiError> {
    let profiles = ProfileRepository::new(session.backend(&state)).list().await?;
    Ok(Json(profiles))
}

/// GET /api/profiles/{id}
pub async fn api_profile(
    State(state): State<SharedState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<Profile>, ApiError> {
    ProfileRepository::new(session.backend(&state))
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("profile {} not found", id)))
}
