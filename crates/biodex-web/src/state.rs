//! Shared application state for the web server.

use std::sync::Arc;

use biodex_config::Config;
use biodex_db::BackendClient;
use biodex_llm::SpeciesChat;

use crate::pages::Pages;
use crate::wikipedia::WikipediaClient;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub config: Config,
    /// Anonymous hosted-backend client; handlers derive per-user clients from it.
    pub backend: BackendClient,
    pub chat: SpeciesChat,
    pub wikipedia: WikipediaClient,
    pub pages: Pages,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let backend = BackendClient::from_config(&config.backend);
        let chat = SpeciesChat::from_config(&config.llm);
        if !chat.is_configured() {
            tracing::warn!("GEMINI_API_KEY is not set; the chatbot will answer with a setup notice");
        }
        let wikipedia = WikipediaClient::new(config.wikipedia.base_url.clone());
        let pages = Pages::new()?;

        Ok(Self { config, backend, chat, wikipedia, pages })
    }

    /// Swap the chat service (tests use a stub backend).
    pub fn with_chat(mut self, chat: SpeciesChat) -> Self {
        self.chat = chat;
        self
    }
}

pub type SharedState = Arc<AppState>;
