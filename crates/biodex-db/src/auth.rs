//! Session lookup against the hosted auth provider.

use reqwest::{Method, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;
use crate::rest::{read_json, BackendClient};

/// The identity behind an access token.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

impl BackendClient {
    /// Resolve an access token to its user. Rejected or expired tokens yield `None`.
    pub async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>> {
        let url = format!("{}/auth/v1/user", self.base_url());
        let resp = self
            .as_user(access_token)
            .request(Method::GET, url)
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::debug!("access token rejected by auth provider");
                Ok(None)
            }
            _ => read_json(resp).await.map(Some),
        }
    }
}
