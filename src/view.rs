//! Explicit UI state for one browser session and its transitions.
//!
//! Nothing here performs I/O; the presenter drives these transitions and the
//! renderer turns a snapshot into markup.

use serde::Serialize;

use crate::models::{DiscoverMovie, TitleMatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    Title,
    Genre,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ResultArea {
    Empty,
    Titles(Vec<TitleMatch>),
    Genre(Vec<DiscoverMovie>),
    NoResults(SearchMode),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub generation: u64,
    pub loading: bool,
    pub error: Option<String>,
    pub results: ResultArea,
    pub search_field: String,
    pub scroll_to_results: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            generation: 0,
            loading: false,
            error: None,
            results: ResultArea::Empty,
            search_field: String::new(),
            scroll_to_results: false,
        }
    }
}

impl ViewState {
    /// Enters the busy state and returns the ticket identifying this search.
    pub fn begin_search(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.results = ResultArea::Empty;
        self.scroll_to_results = false;
        self.generation
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation == ticket
    }

    pub fn show_titles(&mut self, movies: Vec<TitleMatch>) {
        self.results = if movies.is_empty() {
            ResultArea::NoResults(SearchMode::Title)
        } else {
            ResultArea::Titles(movies)
        };
        self.scroll_to_results = true;
    }

    pub fn show_genre_results(&mut self, movies: Vec<DiscoverMovie>) {
        self.results = if movies.is_empty() {
            ResultArea::NoResults(SearchMode::Genre)
        } else {
            ResultArea::Genre(movies)
        };
        self.scroll_to_results = true;
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Leaves the busy state, unless a newer search has taken over.
    pub fn finish(&mut self, ticket: u64) {
        if self.is_current(ticket) {
            self.loading = false;
        }
    }
}
