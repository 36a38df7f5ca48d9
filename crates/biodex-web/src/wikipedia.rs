//! Wikipedia page-summary client used to autofill the add-species form.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WikiError {
    #[error("No Wikipedia article found for \"{0}\"")]
    NotFound(String),
    #[error("Could not reach Wikipedia: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid Wikipedia URL: {0}")]
    InvalidUrl(String),
}

/// Fields the form can prefill from an article.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Autofill {
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Summary {
    extract: Option<String>,
    thumbnail: Option<Source>,
    originalimage: Option<Source>,
}

#[derive(Debug, Deserialize)]
struct Source {
    source: Option<String>,
}

#[derive(Clone)]
pub struct WikipediaClient {
    base_url: String,
    client: reqwest::Client,
}

impl WikipediaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn summary_url(&self, query: &str) -> Result<Url, WikiError> {
        let title = query.trim().replace(' ', "_");
        let mut url = Url::parse(&format!("{}/api/rest_v1/page/summary", self.base_url))
            .map_err(|e| WikiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| WikiError::InvalidUrl(self.base_url.clone()))?
            .push(&title);
        Ok(url)
    }

    /// Look up the article summary for a species name.
    pub async fn autofill(&self, query: &str) -> Result<Autofill, WikiError> {
        let url = self.summary_url(query)?;
        tracing::debug!(%url, "fetching Wikipedia summary");

        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            tracing::info!(status = resp.status().as_u16(), query, "no Wikipedia article");
            return Err(WikiError::NotFound(query.trim().to_string()));
        }

        let summary: Summary = resp.json().await?;
        let image = summary
            .thumbnail
            .and_then(|t| t.source)
            .or_else(|| summary.originalimage.and_then(|o| o.source));

        Ok(Autofill {
            description: summary.extract.filter(|e| !e.is_empty()),
            image,
        })
    }
}
