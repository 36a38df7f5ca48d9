//! Axum router — maps all URL paths to handlers.

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::{
    services::ServeDir,
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    home::home,
    chat::{chat_page, chat_submit},
    species::{species_page, api_list, api_detail, api_create, api_update, api_delete},
    comments,
    users::{users_page, api_profiles, api_profile},
    chart::{speed_page, api_speed},
    wikipedia::lookup,
};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",                get(home))
        .route("/species",         get(species_page))
        .route("/users",           get(users_page))
        .route("/species-chatbot", get(chat_page))
        .route("/species-speed",   get(speed_page))

        // API endpoints
        .route("/api/chat",                    post(chat_submit))
        .route("/api/species",                 get(api_list).post(api_create))
        .route("/api/species/{id}",            get(api_detail).patch(api_update).delete(api_delete))
        .route("/api/species/{id}/comments",   get(comments::api_list).post(comments::api_create))
        .route("/api/comments/{id}",           delete(comments::api_delete))
        .route("/api/profiles",                get(api_profiles))
        .route("/api/profiles/{id}",           get(api_profile))
        .route("/api/species-speed",           get(api_speed))
        .route("/api/wikipedia",               get(lookup))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
