use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::models::GenreEntry;
use crate::omdb::OmdbApi;
use crate::render;
use crate::tmdb::TmdbApi;
use crate::view::ViewState;

pub const ENTER: &str = "Enter";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// A genre entry label, carrying the id stored on the entry.
    GenreLink { genre_id: i32 },
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    KeyPress { key: String, value: String },
    GenreClick { target: ClickTarget },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventDisposition {
    pub default_prevented: bool,
}

/// Mediates between UI events and the movie services for a single session.
pub struct Presenter {
    omdb: Arc<dyn OmdbApi>,
    tmdb: Arc<dyn TmdbApi>,
    genres: Arc<[GenreEntry]>,
    view: Mutex<ViewState>,
}

/// Clears the loading flag when a search ends, including when its future is
/// dropped before completing.
struct BusyGuard<'a> {
    view: &'a Mutex<ViewState>,
    ticket: u64,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        lock(self.view).finish(self.ticket);
    }
}

fn lock(view: &Mutex<ViewState>) -> MutexGuard<'_, ViewState> {
    view.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Presenter {
    pub fn new(omdb: Arc<dyn OmdbApi>, tmdb: Arc<dyn TmdbApi>, genres: Arc<[GenreEntry]>) -> Self {
        Self {
            omdb,
            tmdb,
            genres,
            view: Mutex::new(ViewState::default()),
        }
    }

    pub fn genres(&self) -> &[GenreEntry] {
        &self.genres
    }

    pub fn snapshot(&self) -> ViewState {
        lock(&self.view).clone()
    }

    pub fn populate_genre_nav(&self) -> String {
        render::populate_genre_nav(&self.genres)
    }

    pub fn render_page(&self) -> String {
        render::render_page(&self.snapshot(), &self.genres)
    }

    pub async fn handle_event(&self, event: UiEvent) -> EventDisposition {
        match event {
            UiEvent::KeyPress { key, value } => {
                lock(&self.view).search_field = value.clone();
                if key != ENTER {
                    return EventDisposition::default();
                }
                self.search_movies(value.trim()).await;
                EventDisposition {
                    default_prevented: true,
                }
            }
            UiEvent::GenreClick {
                target: ClickTarget::GenreLink { genre_id },
            } => {
                lock(&self.view).search_field.clear();
                self.search_movies_by_genre(genre_id).await;
                EventDisposition {
                    default_prevented: true,
                }
            }
            UiEvent::GenreClick {
                target: ClickTarget::Other,
            } => EventDisposition::default(),
        }
    }

    pub async fn search_movies(&self, title: &str) {
        let guard = self.begin();
        info!("Searching OMDb for '{}'", title);
        let outcome = self.omdb.search_by_title(title).await;
        self.apply(guard.ticket, outcome, |view, movies| view.show_titles(movies));
    }

    pub async fn search_movies_by_genre(&self, genre_id: i32) {
        let guard = self.begin();
        match self.genres.iter().find(|g| g.id == genre_id) {
            Some(genre) => info!("Searching TMDB genre '{}' ({})", genre.name, genre_id),
            None => info!("Searching TMDB genre {}", genre_id),
        }
        let outcome = self.tmdb.search_by_genre(genre_id).await;
        self.apply(guard.ticket, outcome, |view, movies| {
            view.show_genre_results(movies)
        });
    }

    fn begin(&self) -> BusyGuard<'_> {
        let ticket = lock(&self.view).begin_search();
        BusyGuard {
            view: &self.view,
            ticket,
        }
    }

    fn apply<T>(&self, ticket: u64, outcome: Result<T>, show: impl FnOnce(&mut ViewState, T)) {
        let mut view = lock(&self.view);
        if !view.is_current(ticket) {
            debug!(
                ticket,
                current = view.generation,
                "Discarding response from superseded search"
            );
            return;
        }
        match outcome {
            Ok(movies) => show(&mut view, movies),
            Err(e) => {
                let message = format!("{e:#}");
                warn!("Search failed: {}", message);
                view.show_error(message);
            }
        }
    }
}
