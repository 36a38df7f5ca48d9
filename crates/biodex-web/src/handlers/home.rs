//! Landing page.

use axum::{extract::State, response::Html};
use biodex_common::ApiError;
use minijinja::context;

use crate::session::MaybeSession;
use crate::state::SharedState;

pub async fn home(
    State(state): State<SharedState>,
    MaybeSession(session): MaybeSession,
) -> Result<Html<String>, ApiError> {
    state.pages.render("home.html", context! {
        nav => "home",
        signed_in => session.is_some(),
        email => session.and_then(|s| s.user.email),
    })
}
