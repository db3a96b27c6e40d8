use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use tracing::info;

pub const DEFAULT_OMDB_BASE: &str = "https://www.omdbapi.com";
pub const DEFAULT_TMDB_BASE: &str = "https://api.themoviedb.org/3";
const DEFAULT_ADDR: &str = "0.0.0.0:3146";

const REQUIRED: [&str; 2] = ["OMDB_API_KEY", "TMDB_API_KEY"];

#[derive(Debug, Clone)]
pub struct Config {
    pub omdb_api_key: String,
    pub tmdb_api_key: String,
    pub omdb_base: String,
    pub tmdb_base: String,
    pub addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        check_env()?;
        let addr = optional("CINEGRID_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse()
            .context("CINEGRID_ADDR is not a valid socket address")?;

        Ok(Self {
            omdb_api_key: required("OMDB_API_KEY")?,
            tmdb_api_key: required("TMDB_API_KEY")?,
            omdb_base: optional("OMDB_BASE_URL").unwrap_or_else(|| DEFAULT_OMDB_BASE.to_string()),
            tmdb_base: optional("TMDB_BASE_URL").unwrap_or_else(|| DEFAULT_TMDB_BASE.to_string()),
            addr,
        })
    }
}

pub fn check_env() -> Result<()> {
    for key in REQUIRED {
        if optional(key).is_none() {
            anyhow::bail!("Missing required environment variable: {}", key);
        }
    }
    info!("All required environment variables are set");
    Ok(())
}

fn required(key: &str) -> Result<String> {
    optional(key).with_context(|| format!("{key} not set"))
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
