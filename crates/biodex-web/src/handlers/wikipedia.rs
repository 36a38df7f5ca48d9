//! Wikipedia lookup used by the add-species form's autofill button.

use axum::{
    extract::{Query, State},
    Json,
};
use biodex_common::ApiError;
use serde::Deserialize;

use crate::state::SharedState;
use crate::wikipedia::{Autofill, WikiError};

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// GET /api/wikipedia?q=
pub async fn lookup(
    State(state): State<SharedState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<Autofill>, ApiError> {
    let query = params.q.as_deref().map(str::trim).unwrap_or("");
    if query.is_empty() {
        return Err(ApiError::BadRequest("Enter a scientific name to look up".to_string()));
    }

    match state.wikipedia.autofill(query).await {
        Ok(fill) => Ok(Json(fill)),
        Err(WikiError::NotFound(_)) => Err(ApiError::NotFound("No Wikipedia article found".to_string())),
        Err(WikiError::Http(e)) => {
            tracing::error!(error = %e, query, "Wikipedia request failed");
            Err(ApiError::Upstream("Could not reach Wikipedia".to_string()))
        }
        Err(e @ WikiError::InvalidUrl(_)) => Err(ApiError::Internal(e.to_string())),
    }
}
