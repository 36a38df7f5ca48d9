//! LLM backend trait and the Gemini implementation used by the species chatbot.
//!
//! Backends:
//!   GeminiBackend — Google Gemini `generateContent` API (gemini-2.0-flash, …)

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),
    #[error("API error [{status}]: {message}")]
    ApiError { status: u16, message: String },
}

/// The request URL carries the API key, so it is dropped from every HTTP error.
impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        LlmError::Http(e.without_url())
    }
}

impl LlmError {
    /// True when the request never left this process (it could not be built).
    /// Every other failure is an upstream failure.
    pub fn is_internal(&self) -> bool {
        match self {
            LlmError::InvalidUrl(_) => true,
            LlmError::Http(e) => e.is_builder(),
            _ => false,
        }
    }
}

// ── Request / Response ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: String,   // "system" | "user"
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// Generated text; empty when the provider returned none.
    pub content: String,
    pub model: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

// ── Trait ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError>;
    fn model_id(&self) -> &str;
}

async fn check_response_status(resp: reqwest::Response) -> Result<serde_json::Value, LlmError> {
    let status = resp.status().as_u16();
    let text = resp.text().await?;
    if status >= 400 {
        let msg = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|body| {
                body["error"]["message"]
                    .as_str()
                    .or_else(|| body["message"].as_str())
                    .map(str::to_string)
            })
            .unwrap_or(text);
        return Err(LlmError::ApiError { status, message: msg });
    }
    Ok(serde_json::from_str(&text)?)
}

// ── Google Gemini ─────────────────────────────────────────────────────────────

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiBackend {
    pub model: String,
    pub base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiBackend {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: GEMINI_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, model: &str) -> Result<Url, LlmError> {
        let base = self.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/v1beta/models/{}:generateContent", base, model))
            .map_err(|e| LlmError::InvalidUrl(format!("{}: {}", base, e)))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        let model = req.model.as_deref().unwrap_or(&self.model);

        // System message → system_instruction
        let system_text = req.messages.iter()
            .find(|m| m.role == "system")
            .map(|m| m.content.clone());

        let contents: Vec<serde_json::Value> = req.messages.iter()
            .filter(|m| m.role != "system")
            .map(|m| serde_json::json!({
                "role": m.role,
                "parts": [{ "text": m.content }]
            }))
            .collect();

        let mut body = serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "temperature":     req.temperature.unwrap_or(0.7),
                "maxOutputTokens": req.max_tokens.unwrap_or(1024),
            }
        });
        if let Some(sys) = system_text {
            body["system_instruction"] = serde_json::json!({
                "parts": [{ "text": sys }]
            });
        }

        let resp = self.client.post(self.endpoint(model)?).json(&body).send().await?;
        let json = check_response_status(resp).await?;

        let content = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .to_string();

        let prompt_tokens = json["usageMetadata"]["promptTokenCount"]
            .as_u64().unwrap_or(0) as u32;
        let completion_tokens = json["usageMetadata"]["candidatesTokenCount"]
            .as_u64().unwrap_or(0) as u32;

        Ok(LlmResponse {
            content,
            model: model.to_string(),
            prompt_tokens,
            completion_tokens,
        })
    }

    fn model_id(&self) -> &str { &self.model }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn request(text: &str) -> LlmRequest {
        LlmRequest {
            messages: vec![Message::system("be brief"), Message::user(text)],
            model: None,
            max_tokens: Some(1024),
            temperature: Some(0.7),
        }
    }

    #[test]
    fn test_gemini_backend_model_id() {
        let b = GeminiBackend::new("AIza-test", "gemini-2.0-flash");
        assert_eq!(b.model_id(), "gemini-2.0-flash");
        assert_eq!(b.base_url, GEMINI_BASE_URL);
    }

    #[tokio::test]
    async fn test_gemini_sends_system_instruction_and_user_turn() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_body(Matcher::PartialJson(json!({
                "system_instruction": { "parts": [{ "text": "be brief" }] },
                "contents": [{ "role": "user", "parts": [{ "text": "Where do otters live?" }] }],
                "generationConfig": { "maxOutputTokens": 1024 }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"Rivers and coasts."}]}}],
                           "usageMetadata":{"promptTokenCount":12,"candidatesTokenCount":4}}"#)
            .expect(1)
            .create_async()
            .await;

        let backend = GeminiBackend::new("test-key", "gemini-2.0-flash").with_base_url(server.url());
        let resp = backend.complete(request("Where do otters live?")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(resp.content, "Rivers and coasts.");
        assert_eq!(resp.prompt_tokens, 12);
        assert_eq!(resp.completion_tokens, 4);
    }

    #[tokio::test]
    async fn test_gemini_error_status_carries_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error":{"code":403,"message":"API key not valid"}}"#)
            .create_async()
            .await;

        let backend = GeminiBackend::new("bad", "gemini-2.0-flash").with_base_url(server.url());
        match backend.complete(request("hi")).await {
            Err(LlmError::ApiError { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected ApiError, got {:?}", other.map(|r| r.content)),
        }
    }

    #[tokio::test]
    async fn test_gemini_missing_text_yields_empty_content() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let backend = GeminiBackend::new("k", "gemini-2.0-flash").with_base_url(server.url());
        let resp = backend.complete(request("hi")).await.unwrap();
        assert!(resp.content.is_empty());
    }

    #[test]
    fn test_key_is_query_encoded() {
        let b = GeminiBackend::new("a+b&c=d", "gemini-2.0-flash").with_base_url("http://localhost:8080/");
        assert_eq!(
            b.endpoint("gemini-2.0-flash").unwrap().as_str(),
            "http://localhost:8080/v1beta/models/gemini-2.0-flash:generateContent?key=a%2Bb%26c%3Dd"
        );
    }

    #[tokio::test]
    async fn test_network_error_does_not_expose_key() {
        // nothing listens on the discard port
        let backend = GeminiBackend::new("SUPERSECRETKEY", "gemini-2.0-flash").with_base_url("http://127.0.0.1:9");
        let err = backend.complete(request("hi")).await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
        assert!(!err.is_internal());
        assert!(!err.to_string().contains("SUPERSECRETKEY"), "{}", err);
        assert!(!format!("{:?}", err).contains("SUPERSECRETKEY"));
    }

    #[tokio::test]
    async fn test_unbuildable_url_is_internal() {
        let backend = GeminiBackend::new("k", "gemini-2.0-flash").with_base_url("not a url");
        let err = backend.complete(request("hi")).await.unwrap_err();
        assert!(err.is_internal());
    }
}
