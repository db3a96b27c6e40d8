use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use cinegrid::omdb::{OmdbApi, OmdbClient};
use cinegrid::tmdb::{TmdbApi, TmdbClient};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const UNREACHABLE: &str = "http://127.0.0.1:1";

async fn spawn_service(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn omdb_service(seen: Arc<Mutex<Vec<HashMap<String, String>>>>) -> Router {
    Router::new().route(
        "/",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let seen = seen.clone();
            async move {
                let title = params.get("s").cloned().unwrap_or_default();
                seen.lock().unwrap().push(params);
                match title.as_str() {
                    "Inception" => Json(json!({
                        "Search": [
                            { "Title": "Inception", "Year": "2010", "imdbID": "tt1375666", "Type": "movie", "Poster": "N/A" },
                            { "Title": "Inception: The Cobol Job", "Year": "2010", "imdbID": "tt5295894", "Type": "movie", "Poster": "https://img.test/cobol.jpg" },
                            { "Title": "The Crack: Inception", "Year": "2019", "imdbID": "tt6793710", "Type": "movie", "Poster": "N/A" }
                        ],
                        "totalResults": "3",
                        "Response": "True"
                    }))
                    .into_response(),
                    "bad key" => (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "Response": "False" })),
                    )
                        .into_response(),
                    "garbled" => "<html>oops</html>".into_response(),
                    _ => Json(json!({ "Response": "False", "Error": "Movie not found!" }))
                        .into_response(),
                }
            }
        }),
    )
}

fn tmdb_service() -> Router {
    Router::new()
        .route(
            "/3/discover/movie",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                match params.get("with_genres").map(String::as_str) {
                    Some("35") => Json(json!({
                        "page": 1,
                        "results": [
                            { "id": 9377, "title": "Ferris Bueller's Day Off", "release_date": "1986-06-11", "poster_path": "/ferris.jpg", "overview": "A wise guy skips school." },
                            { "id": 8467, "title": "Dumb and Dumber", "release_date": null, "poster_path": null, "overview": "" }
                        ]
                    }))
                    .into_response(),
                    Some("99") => (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "status_code": 7, "status_message": "Invalid API key", "success": false })),
                    )
                        .into_response(),
                    _ => Json(json!({ "page": 1, "results": [] })).into_response(),
                }
            }),
        )
        .route(
            "/3/genre/movie/list",
            get(|| async {
                Json(json!({
                    "genres": [
                        { "id": 28, "name": "Action" },
                        { "id": 35, "name": "Comedy" }
                    ]
                }))
            }),
        )
}

#[tokio::test]
async fn title_search_returns_every_match() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let base = spawn_service(omdb_service(seen.clone())).await;
    let client = OmdbClient::with_base_url("omdb-key", base).unwrap();

    let movies = client.search_by_title("Inception").await.unwrap();
    assert_eq!(movies.len(), 3);
    assert_eq!(movies[0].year, "2010");
    assert_eq!(movies[1].poster_url(), Some("https://img.test/cobol.jpg"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].get("apikey").map(String::as_str), Some("omdb-key"));
}

#[tokio::test]
async fn title_search_encodes_query() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let base = spawn_service(omdb_service(seen.clone())).await;
    let client = OmdbClient::with_base_url("k", base).unwrap();

    let _ = client.search_by_title("Fast & Furious?").await;
    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].get("s").map(String::as_str), Some("Fast & Furious?"));
}

#[tokio::test]
async fn title_search_not_found_messages() {
    let base = spawn_service(omdb_service(Arc::default())).await;
    let client = OmdbClient::with_base_url("k", base).unwrap();

    let err = client.search_by_title("Qwxz").await.unwrap_err();
    assert_eq!(err.to_string(), "Movie not found!");

    let err = client.search_by_title("bad key").await.unwrap_err();
    assert_eq!(err.to_string(), "No movies found");
}

#[tokio::test]
async fn title_search_rejects_malformed_json() {
    let base = spawn_service(omdb_service(Arc::default())).await;
    let client = OmdbClient::with_base_url("k", base).unwrap();

    let err = client.search_by_title("garbled").await.unwrap_err();
    assert_eq!(err.to_string(), "JSON parse failed");
}

#[tokio::test]
async fn title_search_surfaces_transport_errors() {
    let client = OmdbClient::with_base_url("k", UNREACHABLE).unwrap();
    let err = client.search_by_title("Inception").await.unwrap_err();
    assert!(format!("{err:#}").starts_with("request failed: "));
}

#[tokio::test]
async fn genre_search_returns_results() {
    let base = spawn_service(tmdb_service()).await;
    let client = TmdbClient::with_base_url("tmdb-key", format!("{base}/3")).unwrap();

    let movies = client.search_by_genre(35).await.unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].release_year().as_deref(), Some("1986"));
    assert_eq!(movies[1].release_year(), None);
    assert_eq!(movies[1].poster_path(), None);
}

#[tokio::test]
async fn genre_search_without_results_fails_with_fixed_message() {
    let base = spawn_service(tmdb_service()).await;
    let client = TmdbClient::with_base_url("k", format!("{base}/3")).unwrap();

    let err = client.search_by_genre(28).await.unwrap_err();
    assert_eq!(err.to_string(), "No movies found for this genre");

    let err = client.search_by_genre(99).await.unwrap_err();
    assert_eq!(err.to_string(), "No movies found for this genre");
}

#[tokio::test]
async fn list_genres_reads_catalog() {
    let base = spawn_service(tmdb_service()).await;
    let client = TmdbClient::with_base_url("k", format!("{base}/3")).unwrap();

    let genres = client.list_genres().await;
    assert_eq!(genres.len(), 2);
    assert_eq!(genres[1].id, 35);
    assert_eq!(genres[1].name, "Comedy");
}

#[tokio::test]
async fn list_genres_swallows_http_errors() {
    let router = Router::new().route(
        "/3/genre/movie/list",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn_service(router).await;
    let client = TmdbClient::with_base_url("k", format!("{base}/3")).unwrap();
    assert!(client.list_genres().await.is_empty());
}

#[tokio::test]
async fn list_genres_swallows_transport_errors() {
    let client = TmdbClient::with_base_url("k", UNREACHABLE).unwrap();
    assert!(client.list_genres().await.is_empty());
}
