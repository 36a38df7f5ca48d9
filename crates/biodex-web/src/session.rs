//! Signed-in user extraction.
//!
//! The browser holds the hosted auth provider's session. Its access token
//! reaches us either as `Authorization: Bearer <token>` (API calls made from
//! page scripts) or as the `sb-access-token` cookie (page loads).

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use biodex_common::ApiError;
use biodex_db::{AuthUser, BackendClient};

use crate::state::SharedState;

pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";

/// A request made by a signed-in user. Rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: AuthUser,
    access_token: String,
}

impl Session {
    /// Backend client acting as this user, so row-level security applies.
    pub fn backend(&self, state: &SharedState) -> BackendClient {
        state.backend.as_user(&self.access_token)
    }
}

/// Like [`Session`] but never rejects a missing or expired session.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<Session>);

async fn access_token(parts: &mut Parts, state: &SharedState) -> Option<String> {
    if let Ok(TypedHeader(Authorization(bearer))) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
    {
        return Some(bearer.token().to_string());
    }
    CookieJar::from_headers(&parts.headers)
        .get(ACCESS_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

async fn resolve(parts: &mut Parts, state: &SharedState) -> Result<Option<Session>, ApiError> {
    let Some(token) = access_token(parts, state).await else {
        return Ok(None);
    };
    let user = state.backend.get_user(&token).await.map_err(|e| {
        tracing::error!(error = %e, "session lookup failed");
        ApiError::Upstream("Could not verify your session".to_string())
    })?;
    Ok(user.map(|user| Session { user, access_token: token }))
}

impl FromRequestParts<SharedState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &SharedState) -> Result<Self, Self::Rejection> {
        resolve(parts, state)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("You must be signed in".to_string()))
    }
}

impl FromRequestParts<SharedState> for MaybeSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &SharedState) -> Result<Self, Self::Rejection> {
        resolve(parts, state).await.map(MaybeSession)
    }
}
