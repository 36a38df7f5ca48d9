//! Species records: JSON API plus the signed-in catalogue page.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use biodex_common::{filter_species, ApiError, Kingdom, NewSpecies, Species, SpeciesForm};
use biodex_db::{BackendClient, SpeciesRepository};
use minijinja::context;
use serde::{Deserialize, Serialize};

use crate::session::{MaybeSession, Session};
use crate::state::SharedState;

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

impl SearchParams {
    fn query(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }
}

/// One card on the species page.
#[derive(Debug, Serialize)]
struct SpeciesCard<'a> {
    #[serde(flatten)]
    species: &'a Species,
    population_label: String,
    is_author: bool,
}

/// Reads go out as the signed-in user when there is one.
pub(crate) fn reader(state: &SharedState, session: &Option<Session>) -> BackendClient {
    match session {
        Some(s) => s.backend(state),
        None => state.backend.clone(),
    }
}

/// Turn a JSON body rejection into the uniform `{ "error": ... }` shape.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(v)| v).map_err(|e| ApiError::BadRequest(e.body_text()))
}

/// GET /api/species?q=
pub async fn api_list(
    State(state): State<SharedState>,
    MaybeSession(session): MaybeSession,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Species>>, ApiError> {
    let all = SpeciesRepository::new(reader(&state, &session)).list().await?;
    let matched: Vec<Species> = filter_species(&all, params.query()).into_iter().cloned().collect();
    tracing::debug!(total = all.len(), matched = matched.len(), "species search");
    Ok(Json(matched))
}

/// GET /api/species/{id}
pub async fn api_detail(
    State(state): State<SharedState>,
    MaybeSession(session): MaybeSession,
    Path(id): Path<i64>,
) -> Result<Json<Species>, ApiError> {
    SpeciesRepository::new(reader(&state, &session))
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("species {} not found", id)))
}

/// POST /api/species
pub async fn api_create(
    State(state): State<SharedState>,
    session: Session,
    body: Result<Json<SpeciesForm>, JsonRejection>,
) -> Result<Response, ApiError> {
    let form = json_body(body)?;
    let fields = form.validate().map_err(ApiError::Validation)?;

    let created = SpeciesRepository::new(session.backend(&state))
        .insert(&NewSpecies { author: session.user.id, fields })
        .await?;
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// PATCH /api/species/{id}
pub async fn api_update(
    State(state): State<SharedState>,
    session: Session,
    Path(id): Path<i64>,
    body: Result<Json<SpeciesForm>, JsonRejection>,
) -> Result<Json<Species>, ApiError> {
    let form = json_body(body)?;
    let fields = form.validate().map_err(ApiError::Validation)?;

    let updated = SpeciesRepository::new(session.backend(&state))
        .update(id, session.user.id, &fields)
        .await?;
    tracing::info!(id, "species updated");
    Ok(Json(updated))
}

/// DELETE /api/species/{id}
pub async fn api_delete(
    State(state): State<SharedState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    SpeciesRepository::new(session.backend(&state))
        .delete(id, session.user.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /species?q=
pub async fn species_page(
    State(state): State<SharedState>,
    MaybeSession(session): MaybeSession,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let Some(session) = session else {
        return Ok(Redirect::to("/").into_response());
    };

    let all = SpeciesRepository::new(session.backend(&state)).list().await?;
    let cards: Vec<SpeciesCard> = filter_species(&all, params.query())
        .into_iter()
        .map(|species| SpeciesCard {
            population_label: species.population_label(),
            is_author: species.is_authored_by(session.user.id),
            species,
        })
        .collect();
    let kingdoms: Vec<&str> = Kingdom::ALL.iter().map(Kingdom::as_str).collect();

    let html: Html<String> = state.pages.render("species.html", context! {
        nav => "species",
        query => params.query(),
        total => all.len(),
        species => cards,
        kingdoms => kingdoms,
        user_id => session.user.id.to_string(),
    })?;
    Ok(html.into_response())
}
