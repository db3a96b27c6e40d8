//! Query the movie services and print the normalized client output.
//! Usage:
//!   cargo run --bin movie_probe -- genres
//!   cargo run --bin movie_probe -- title <query>
//!   cargo run --bin movie_probe -- genre <genre_id>
//! Requires OMDB_API_KEY and TMDB_API_KEY in the environment (.env supported).

use anyhow::{Context, Result};
use cinegrid::config::Config;
use cinegrid::omdb::{OmdbApi, OmdbClient};
use cinegrid::tmdb::{TmdbApi, TmdbClient};
use dotenvy::dotenv;
use serde_json::json;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
enum ProbeKind {
    Genres,
    Title,
    Genre,
}

impl FromStr for ProbeKind {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "genres" => Ok(ProbeKind::Genres),
            "title" => Ok(ProbeKind::Title),
            "genre" => Ok(ProbeKind::Genre),
            _ => Err(anyhow::anyhow!("probe must be 'genres', 'title' or 'genre'")),
        }
    }
}

fn usage() -> ! {
    eprintln!("Usage: cargo run --bin movie_probe -- genres");
    eprintln!("       cargo run --bin movie_probe -- title <query>");
    eprintln!("       cargo run --bin movie_probe -- genre <genre_id>");
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args: Vec<String> = env::args().collect();
    let Some(kind) = args.get(1) else { usage() };
    let kind = ProbeKind::from_str(kind)?;
    let config = Config::from_env()?;

    let output = match kind {
        ProbeKind::Genres => {
            let tmdb = TmdbClient::from_config(&config)?;
            json!({ "genres": tmdb.list_genres().await })
        }
        ProbeKind::Title => {
            let query = args.get(2..).map(|a| a.join(" ")).unwrap_or_default();
            if query.is_empty() {
                usage();
            }
            let omdb = OmdbClient::from_config(&config)?;
            match omdb.search_by_title(&query).await {
                Ok(movies) => json!({ "query": query, "count": movies.len(), "movies": movies }),
                Err(e) => json!({ "query": query, "error": format!("{e:#}") }),
            }
        }
        ProbeKind::Genre => {
            let Some(raw) = args.get(2) else { usage() };
            let genre_id: i32 = raw.parse().context("genre_id must be an integer")?;
            let tmdb = TmdbClient::from_config(&config)?;
            match tmdb.search_by_genre(genre_id).await {
                Ok(movies) => json!({ "genre_id": genre_id, "count": movies.len(), "movies": movies }),
                Err(e) => json!({ "genre_id": genre_id, "error": format!("{e:#}") }),
            }
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
