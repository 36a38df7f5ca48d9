//! Species chatbot service.
//!
//! Wraps an [`LlmBackend`] with a fixed, species-only system instruction.
//! Provider failures are turned into canned replies so the caller always has
//! something to show; only failures that happen before the request leaves the
//! process are returned as errors.

use std::sync::Arc;

use biodex_config::LlmConfig;
use secrecy::ExposeSecret;

use crate::backend::{GeminiBackend, LlmBackend, LlmError, LlmRequest, Message};

pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant that specializes in answering questions about animals and species. \
You can discuss topics like habitat, diet, conservation status, taxonomy, physical characteristics, \
behavior, and other animal/species-related facts. \
If a user asks something unrelated to animals or species, politely let them know that you can only \
help with species-related queries and suggest they ask an animal-related question instead. \
Keep your responses concise but informative, and use markdown formatting when helpful.";

pub const NOT_CONFIGURED: &str =
    "The chatbot is not configured yet. Please add a GEMINI_API_KEY to your .env file.";
pub const UPSTREAM_ERROR: &str =
    "Sorry, I encountered an error while processing your request. Please try again later.";
pub const NO_TEXT: &str = "Sorry, I was unable to generate a response. Please try again.";

pub struct SpeciesChat {
    backend: Option<Arc<dyn LlmBackend>>,
    temperature: f32,
    max_output_tokens: u32,
}

impl SpeciesChat {
    pub fn new(backend: Option<Arc<dyn LlmBackend>>) -> Self {
        Self { backend, temperature: 0.7, max_output_tokens: 1024 }
    }

    /// Build the Gemini-backed service; no key means an unconfigured chatbot.
    pub fn from_config(config: &LlmConfig) -> Self {
        let backend = config
            .api_key
            .as_ref()
            .map(|k| k.expose_secret().trim().to_string())
            .filter(|k| !k.is_empty())
            .map(|key| {
                let gemini = GeminiBackend::new(key, config.model.clone())
                    .with_base_url(config.base_url.clone());
                Arc::new(gemini) as Arc<dyn LlmBackend>
            });

        Self {
            backend,
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Answer one user message. `message` is forwarded as given.
    pub async fn respond(&self, message: &str) -> Result<String, LlmError> {
        let Some(backend) = &self.backend else {
            tracing::warn!("chat request received but no AI provider key is configured");
            return Ok(NOT_CONFIGURED.to_string());
        };

        let req = LlmRequest {
            messages: vec![Message::system(SYSTEM_INSTRUCTION), Message::user(message)],
            model: None,
            max_tokens: Some(self.max_output_tokens),
            temperature: Some(self.temperature),
        };

        match backend.complete(req).await {
            Ok(resp) if resp.content.is_empty() => {
                tracing::warn!(model = backend.model_id(), "provider returned no text");
                Ok(NO_TEXT.to_string())
            }
            Ok(resp) => {
                tracing::debug!(
                    model = %resp.model,
                    prompt_tokens = resp.prompt_tokens,
                    completion_tokens = resp.completion_tokens,
                    "chat reply generated"
                );
                Ok(resp.content)
            }
            Err(e) if e.is_internal() => Err(e),
            Err(e) => {
                tracing::error!(model = backend.model_id(), error = %e, "AI provider call failed");
                Ok(UPSTREAM_ERROR.to_string())
            }
        }
    }
}
