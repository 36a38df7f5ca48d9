//! Configuration loading for Biodex.
//! Reads biodex.toml from the current directory or the path in the BIODEX_CONFIG
//! env var, then applies environment overrides (a `.env` file is honoured).

use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub wikipedia: WikipediaConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host()       -> String { "127.0.0.1".to_string() }
fn default_port()       -> u16    { 3001 }
fn default_static_dir() -> String { "static".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), static_dir: default_static_dir() }
    }
}

/// Hosted backend (table API + auth) connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,
    #[serde(default)]
    pub anon_key: Option<SecretString>,
}

fn default_backend_url() -> String { "http://127.0.0.1:54321".to_string() }

impl Default for BackendConfig {
    fn default() -> Self {
        Self { url: default_backend_url(), anon_key: None }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Only ever read from the environment.
    #[serde(skip)]
    pub api_key: Option<SecretString>,
}

fn default_llm_base_url()      -> String { "https://generativelanguage.googleapis.com".to_string() }
fn default_llm_model()         -> String { "gemini-2.0-flash".to_string() }
fn default_temperature()       -> f32    { 0.7 }
fn default_max_output_tokens() -> u32    { 1024 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_chart_width")]
    pub width: u32,
}

fn default_csv_path()    -> String { "static/sample_animals.csv".to_string() }
fn default_top_n()       -> usize  { 20 }
fn default_chart_width() -> u32    { 800 }

impl Default for ChartConfig {
    fn default() -> Self {
        Self { csv_path: default_csv_path(), top_n: default_top_n(), width: default_chart_width() }
    }
}

/// Article summaries used to autofill the add-species form.
#[derive(Debug, Clone, Deserialize)]
pub struct WikipediaConfig {
    #[serde(default = "default_wikipedia_url")]
    pub base_url: String,
}

fn default_wikipedia_url() -> String { "https://en.wikipedia.org".to_string() }

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self { base_url: default_wikipedia_url() }
    }
}

mod tests;

impl Config {
    /// Load configuration from biodex.toml plus the environment.
    /// A missing file falls back to defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }

        let path = std::env::var("BIODEX_CONFIG")
            .unwrap_or_else(|_| "biodex.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            tracing::info!(path = %path, "config file not found, using defaults");
            Config::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_string(), source })?;
        Self::from_toml(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_string(), source })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply environment overrides. Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("BIODEX_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("BIODEX_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!(value = %port, "ignoring invalid BIODEX_PORT"),
            }
        }
        if let Some(url) = get("SUPABASE_URL") {
            self.backend.url = url;
        }
        if let Some(key) = get("SUPABASE_ANON_KEY") {
            self.backend.anon_key = Some(SecretString::from(key));
        }
        if let Some(key) = get("GEMINI_API_KEY") {
            self.llm.api_key = Some(SecretString::from(key));
        }
        if let Some(model) = get("GEMINI_MODEL") {
            self.llm.model = model;
        }
        if let Some(path) = get("BIODEX_CHART_CSV") {
            self.chart.csv_path = path;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.backend.url.trim().is_empty() {
            return Err(ConfigError::Invalid("backend.url must not be empty".into()));
        }
        if self.chart.top_n == 0 {
            return Err(ConfigError::Invalid("chart.top_n must be at least 1".into()));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
