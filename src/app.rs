use crate::config::Config;
use crate::models::GenreEntry;
use crate::omdb::{OmdbApi, OmdbClient};
use crate::presenter::{ClickTarget, Presenter, UiEvent, ENTER};
use crate::session::{SessionStore, COOKIE_NAME};
use crate::tmdb::{TmdbApi, TmdbClient};
use crate::view::ViewState;
use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{AppendHeaders, Html, IntoResponse},
    routing::get,
    Json, Router,
};
use axum_extra::TypedHeader;
use headers::Cookie;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub omdb: Arc<dyn OmdbApi>,
    pub tmdb: Arc<dyn TmdbApi>,
    pub genres: Arc<[GenreEntry]>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    async fn presenter(&self, cookies: Option<&Cookie>) -> (String, Arc<Presenter>) {
        let token = cookies.and_then(|c| c.get(COOKIE_NAME));
        self.sessions
            .resolve(token, || {
                Presenter::new(self.omdb.clone(), self.tmdb.clone(), self.genres.clone())
            })
            .await
    }
}

pub async fn run_server(config: Config) -> Result<()> {
    let omdb: Arc<dyn OmdbApi> = Arc::new(OmdbClient::from_config(&config)?);
    let tmdb: Arc<dyn TmdbApi> = Arc::new(TmdbClient::from_config(&config)?);

    let genres: Arc<[GenreEntry]> = tmdb.list_genres().await.into();
    if genres.is_empty() {
        warn!("No genres available, navigation will be empty");
    } else {
        info!("Loaded {} genres", genres.len());
    }

    let state = AppState {
        omdb,
        tmdb,
        genres,
        sessions: Arc::new(SessionStore::new()),
    };

    let app = build_router(state);

    info!("Listening on {}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", get(search))
        .route("/genre/:id", get(genre))
        .route("/api/state", get(view_state))
        .route("/health", get(health))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    title: String,
}

fn page_response(token: String, presenter: &Presenter) -> impl IntoResponse {
    let cookie = format!("{COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax");
    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Html(presenter.render_page()),
    )
}

async fn index(
    State(state): State<AppState>,
    cookies: Option<TypedHeader<Cookie>>,
) -> impl IntoResponse {
    let (token, presenter) = state.presenter(cookies.as_deref()).await;
    page_response(token, &presenter)
}

async fn search(
    State(state): State<AppState>,
    cookies: Option<TypedHeader<Cookie>>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let (token, presenter) = state.presenter(cookies.as_deref()).await;
    presenter
        .handle_event(UiEvent::KeyPress {
            key: ENTER.to_string(),
            value: query.title,
        })
        .await;
    page_response(token, &presenter)
}

async fn genre(
    State(state): State<AppState>,
    cookies: Option<TypedHeader<Cookie>>,
    Path(genre_id): Path<i32>,
) -> impl IntoResponse {
    let (token, presenter) = state.presenter(cookies.as_deref()).await;
    presenter
        .handle_event(UiEvent::GenreClick {
            target: ClickTarget::GenreLink { genre_id },
        })
        .await;
    page_response(token, &presenter)
}

async fn view_state(
    State(state): State<AppState>,
    cookies: Option<TypedHeader<Cookie>>,
) -> Json<ViewState> {
    let token = cookies.as_deref().and_then(|c| c.get(COOKIE_NAME));
    let view = match state.sessions.find(token).await {
        Some(presenter) => presenter.snapshot(),
        None => ViewState::default(),
    };
    Json(view)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}
