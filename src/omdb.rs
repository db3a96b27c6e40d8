use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::{Config, DEFAULT_OMDB_BASE};
use crate::models::TitleMatch;

const NOT_FOUND: &str = "No movies found";

#[async_trait]
pub trait OmdbApi: Send + Sync {
    async fn search_by_title(&self, title: &str) -> Result<Vec<TitleMatch>>;
}

#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: Client,
    api_key: String,
    base: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Response", default)]
    response: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
    #[serde(rename = "Search", default)]
    search: Option<Vec<TitleMatch>>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
}

impl OmdbClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_OMDB_BASE)
    }

    pub fn with_base_url(api_key: impl Into<String>, base: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("cinegrid/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build OMDb HTTP client")?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base: base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_base_url(config.omdb_api_key.clone(), config.omdb_base.clone())
    }

    fn search_url(&self, title: &str) -> String {
        format!(
            "{}/?apikey={}&s={}",
            self.base,
            self.api_key,
            urlencoding::encode(title)
        )
    }
}

#[async_trait]
impl OmdbApi for OmdbClient {
    async fn search_by_title(&self, title: &str) -> Result<Vec<TitleMatch>> {
        // OMDb reports failures in the body, often alongside a non-2xx status.
        let res = self
            .client
            .get(self.search_url(title))
            .send()
            .await
            .context("request failed")?;
        let text = res.text().await.context("reading body failed")?;
        let data: SearchResponse = serde_json::from_str(&text).context("JSON parse failed")?;
        interpret(data)
    }
}

fn interpret(data: SearchResponse) -> Result<Vec<TitleMatch>> {
    if data.response.as_deref() == Some("False") {
        let message = data
            .error
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| NOT_FOUND.to_string());
        return Err(anyhow!(message));
    }
    debug!(total = ?data.total_results, "OMDb search succeeded");
    Ok(data.search.unwrap_or_default())
}
