//! Server-rendered HTML pages.
//!
//! Templates are compiled into the binary and rendered with minijinja;
//! `.html` templates are auto-escaped.

use axum::response::Html;
use biodex_common::ApiError;
use minijinja::Environment;
use serde::Serialize;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html",   include_str!("../templates/layout.html")),
    ("home.html",     include_str!("../templates/home.html")),
    ("species.html",  include_str!("../templates/species.html")),
    ("users.html",    include_str!("../templates/users.html")),
    ("chatbot.html",  include_str!("../templates/chatbot.html")),
    ("speed.html",    include_str!("../templates/speed.html")),
];

pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, ApiError> {
        self.env
            .get_template(name)
            .and_then(|t| t.render(ctx))
            .map(Html)
            .map_err(|e| {
                tracing::error!(template = name, error = %e, "template rendering failed");
                ApiError::Internal("Failed to render page".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_every_template_compiles() {
        let pages = Pages::new().unwrap();
        let html = pages.render("home.html", context! { nav => "home" }).unwrap();
        assert!(html.0.contains("Biodex"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let pages = Pages::new().unwrap();
        let profiles = vec![serde_json::json!({
            "id": "x", "display_name": "<b>Mallory</b>", "email": "m@example.org", "biography": null
        })];
        let html = pages.render("users.html", context! { nav => "users", profiles }).unwrap();
        assert!(html.0.contains("&lt;b&gt;Mallory&lt;/b&gt;"));
        assert!(html.0.contains("—"));
    }
}
