use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{Config, DEFAULT_TMDB_BASE};
use crate::models::{DiscoverMovie, GenreEntry};

pub const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";
const NO_GENRE_MATCHES: &str = "No movies found for this genre";

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base: String,
}

#[async_trait]
pub trait TmdbApi: Send + Sync {
    async fn search_by_genre(&self, genre_id: i32) -> Result<Vec<DiscoverMovie>>;
    /// Never fails: any problem is logged and yields an empty catalog.
    async fn list_genres(&self) -> Vec<GenreEntry>;
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_TMDB_BASE)
    }

    pub fn with_base_url(api_key: impl Into<String>, base: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("cinegrid/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build TMDB HTTP client")?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base: base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_base_url(config.tmdb_api_key.clone(), config.tmdb_base.clone())
    }

    fn discover_url(&self, genre_id: i32) -> String {
        format!(
            "{}/discover/movie?api_key={}&with_genres={genre_id}",
            self.base, self.api_key
        )
    }

    fn genre_list_url(&self) -> String {
        format!(
            "{}/genre/movie/list?api_key={}&language=en-US",
            self.base, self.api_key
        )
    }

    async fn fetch_genres(&self) -> Result<Vec<GenreEntry>> {
        #[derive(Deserialize)]
        struct GenreList {
            genres: Option<Vec<GenreEntry>>,
        }

        let data: GenreList = self.get_json(&self.genre_list_url()).await?;
        Ok(data.genres.unwrap_or_default())
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .context("request failed")?;
        let status = res.status();
        let text = res.text().await.context("reading body failed")?;
        if !status.is_success() {
            return Err(anyhow!("HTTP error! status: {}", status.as_u16()));
        }
        let parsed: T = serde_json::from_str(&text).context("JSON parse failed")?;
        Ok(parsed)
    }
}

#[derive(Debug, Deserialize)]
struct DiscoverResponse {
    #[serde(default)]
    results: Option<Vec<DiscoverMovie>>,
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn search_by_genre(&self, genre_id: i32) -> Result<Vec<DiscoverMovie>> {
        // Error bodies (bad key, unknown genre) carry no `results`, so they fall
        // through to the not-found message instead of a status error.
        let res = self
            .client
            .get(self.discover_url(genre_id))
            .send()
            .await
            .context("request failed")?;
        let status = res.status();
        let text = res.text().await.context("reading body failed")?;
        if !status.is_success() {
            debug!("TMDB discover returned status {}", status);
        }
        let data: DiscoverResponse = serde_json::from_str(&text).context("JSON parse failed")?;
        match data.results {
            Some(results) if !results.is_empty() => Ok(results),
            _ => Err(anyhow!(NO_GENRE_MATCHES)),
        }
    }

    async fn list_genres(&self) -> Vec<GenreEntry> {
        match self.fetch_genres().await {
            Ok(genres) => genres,
            Err(e) => {
                warn!("Error fetching genres: {:#}", e);
                Vec::new()
            }
        }
    }
}

pub fn poster_url(poster_path: &str) -> String {
    format!("{POSTER_BASE}{poster_path}")
}
