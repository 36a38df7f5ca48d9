//! Table API client for the hosted backend.
//!
//! Speaks the PostgREST dialect: one URL per table under `/rest/v1`, filters
//! as query parameters (`col=eq.value`), `Prefer: return=representation` on
//! writes. Every request carries the project's anon key; requests made on
//! behalf of a signed-in user also carry the user's access token so the
//! backend's row-level security sees the right identity.

use biodex_config::BackendConfig;
use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{DbError, Result};

pub const TABLE_SPECIES: &str = "species";
pub const TABLE_PROFILES: &str = "profiles";
pub const TABLE_COMMENTS: &str = "comments";

#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    anon_key: SecretString,
    access_token: Option<SecretString>,
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: SecretString::from(anon_key.into()),
            access_token: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        let anon = config
            .anon_key
            .as_ref()
            .map(|k| k.expose_secret().to_string())
            .unwrap_or_default();
        if anon.is_empty() {
            tracing::warn!("no hosted backend anon key configured");
        }
        Self::new(config.url.clone(), anon)
    }

    /// A client that acts as the given signed-in user.
    pub fn as_user(&self, access_token: &str) -> Self {
        Self {
            access_token: Some(SecretString::from(access_token.to_string())),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a query against one table.
    pub fn table(&self, table: &str) -> TableQuery<'_> {
        TableQuery { client: self, table: table.to_string(), params: Vec::new() }
    }

    pub(crate) fn request(&self, method: Method, url: String) -> RequestBuilder {
        let bearer = self.access_token.as_ref().unwrap_or(&self.anon_key);
        self.http
            .request(method, url)
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(bearer.expose_secret())
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

/// Turn a non-2xx response into `DbError::Api`, otherwise decode the body.
pub(crate) async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        let message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|body| {
                body["message"]
                    .as_str()
                    .or_else(|| body["msg"].as_str())
                    .or_else(|| body["error_description"].as_str())
                    .map(str::to_string)
            })
            .unwrap_or(text);
        return Err(DbError::Api { status: status.as_u16(), message });
    }
    Ok(serde_json::from_str(&text)?)
}

/// A filtered request against one table, built up PostgREST-style.
pub struct TableQuery<'a> {
    client: &'a BackendClient,
    table: String,
    params: Vec<(String, String)>,
}

impl<'a> TableQuery<'a> {
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params.push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    pub fn in_list<V: ToString>(mut self, column: &str, values: &[V]) -> Self {
        let quoted: Vec<String> = values
            .iter()
            .map(|v| format!("\"{}\"", v.to_string().replace('"', "\\\"")))
            .collect();
        self.params.push((column.to_string(), format!("in.({})", quoted.join(","))));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let dir = if ascending { "asc" } else { "desc" };
        self.params.push(("order".to_string(), format!("{}.{}", column, dir)));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.params.push(("limit".to_string(), n.to_string()));
        self
    }

    fn build(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, self.client.table_url(&self.table))
            .query(&self.params)
    }

    /// Select-with-filter.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        tracing::debug!(table = %self.table, params = ?self.params, "select");
        let resp = self.build(Method::GET).send().await?;
        read_json(resp).await
    }

    /// First matching row, if any.
    pub async fn fetch_one<T: DeserializeOwned>(self) -> Result<Option<T>> {
        let rows: Vec<T> = self.limit(1).fetch().await?;
        Ok(rows.into_iter().next())
    }

    /// Insert-one; returns the row as stored.
    pub async fn insert<B, T>(self, row: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(table = %self.table, "insert");
        let resp = self
            .build(Method::POST)
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;
        let rows: Vec<T> = read_json(resp).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| DbError::Api { status: 500, message: "insert returned no row".into() })
    }

    /// Update the filtered rows; returns what the backend actually changed.
    pub async fn update<B, T>(self, patch: &B) -> Result<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(table = %self.table, params = ?self.params, "update");
        let resp = self
            .build(Method::PATCH)
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await?;
        read_json(resp).await
    }

    /// Delete the filtered rows; returns what the backend actually removed.
    pub async fn delete<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        tracing::debug!(table = %self.table, params = ?self.params, "delete");
        let resp = self
            .build(Method::DELETE)
            .header("Prefer", "return=representation")
            .send()
            .await?;
        read_json(resp).await
    }
}
