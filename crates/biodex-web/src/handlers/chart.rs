//! Animal speed chart page and its data endpoint.

use axum::{extract::State, response::Html, Json};
use biodex_chart::{load_top_animals, render_svg, AnimalDatum};
use biodex_common::ApiError;
use minijinja::{context, Value};

use crate::state::SharedState;

/// The CSV is read fresh on every call. A missing or broken file yields no data.
async fn load(state: &SharedState) -> Vec<AnimalDatum> {
    let chart = &state.config.chart;
    match load_top_animals(&chart.csv_path, chart.top_n).await {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(path = %chart.csv_path, error = %e, "could not load animal speeds");
            Vec::new()
        }
    }
}

/// GET /species-speed
pub async fn speed_page(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    let data = load(&state).await;
    let svg = render_svg(&data, state.config.chart.width);
    state.pages.render("speed.html", context! {
        nav => "speed",
        chart => Value::from_safe_string(svg),
        animals => data,
    })
}

/// GET /api/species-speed
pub async fn api_speed(State(state): State<SharedState>) -> Json<Vec<AnimalDatum>> {
    Json(load(&state).await)
}
