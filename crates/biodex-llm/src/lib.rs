//! biodex-llm — generative-language backend abstraction and the species chatbot.

pub mod backend;
pub mod chat;

pub use backend::{GeminiBackend, LlmBackend, LlmError, LlmRequest, LlmResponse, Message};
pub use chat::SpeciesChat;
