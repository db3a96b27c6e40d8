//! HTML rendering. Every function here is pure: state in, markup out.

use std::fmt::Write;

use crate::genre_icon::GenreIcon;
use crate::models::{DiscoverMovie, GenreEntry, TitleMatch};
use crate::tmdb;
use crate::view::{ResultArea, SearchMode, ViewState};

const NO_POSTER: &str = "No poster available";
const NOT_AVAILABLE: &str = "N/A";

const PAGE_SCRIPT: &str = r#"
function showFallbackPoster(img) {
    var box = document.createElement('div');
    box.className = 'fallback-poster';
    var inner = document.createElement('div');
    var heading = document.createElement('h3');
    heading.textContent = img.dataset.title;
    var note = document.createElement('p');
    note.textContent = 'No poster available';
    inner.append(heading, note);
    box.append(inner);
    img.parentElement.replaceChildren(box);
}
function showLoading() {
    document.getElementById('loading').style.display = 'block';
    document.getElementById('error').style.display = 'none';
    document.getElementById('movieGrid').replaceChildren();
}
document.addEventListener('DOMContentLoaded', function () {
    document.getElementById('searchForm').addEventListener('submit', showLoading);
    document.getElementById('genreList').addEventListener('click', function (event) {
        if (event.target.closest('a')) {
            document.getElementById('movieTitle').value = '';
            showLoading();
        }
    });
    var grid = document.getElementById('movieGrid');
    if (grid.dataset.scroll === 'true') {
        grid.scrollIntoView({ behavior: 'smooth', block: 'start' });
    }
});
"#;

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_page(view: &ViewState, genres: &[GenreEntry]) -> String {
    let display = |shown: bool| if shown { "block" } else { "none" };
    let error = view.error.as_deref().unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Movie Search</title>
<script>{PAGE_SCRIPT}</script>
</head>
<body>
<nav class="genre-nav"><ul id="genreList">{nav}</ul></nav>
<main>
<form id="searchForm" action="/search" method="get">
<input type="text" id="movieTitle" name="title" placeholder="Enter a movie title" value="{field}">
<button type="submit">Search</button>
</form>
<div id="loading" class="loading" style="display: {loading}">Loading...</div>
<div id="error" class="error" style="display: {error_display}">{error}</div>
<div id="movieGrid" class="movie-grid" data-scroll="{scroll}">{grid}</div>
</main>
</body>
</html>
"#,
        nav = populate_genre_nav(genres),
        field = escape_html(&view.search_field),
        loading = display(view.loading),
        error_display = display(view.error.is_some()),
        error = escape_html(error),
        scroll = view.scroll_to_results,
        grid = render_results(&view.results),
    )
}

pub fn populate_genre_nav(genres: &[GenreEntry]) -> String {
    let mut out = String::new();
    for genre in genres {
        let _ = write!(
            out,
            r#"<li><a href="/genre/{id}" data-genre="{id}"><i class="{icon}"></i> {name}</a></li>"#,
            id = genre.id,
            icon = GenreIcon::from_name(&genre.name).css_class(),
            name = escape_html(&genre.name),
        );
    }
    out
}

pub fn render_results(results: &ResultArea) -> String {
    match results {
        ResultArea::Empty => String::new(),
        ResultArea::NoResults(mode) => no_results(*mode),
        ResultArea::Titles(movies) => movies.iter().map(title_card).collect(),
        ResultArea::Genre(movies) => movies.iter().map(genre_card).collect(),
    }
}

pub fn no_results(mode: SearchMode) -> String {
    let heading = match mode {
        SearchMode::Title => "No movies found",
        SearchMode::Genre => "No movies found for this genre",
    };
    format!(
        r#"<div class="no-results"><h3>{heading}</h3><p>Try adjusting your search criteria</p></div>"#
    )
}

pub fn fallback_poster(title: &str) -> String {
    format!(
        r#"<div class="fallback-poster"><div><h3>{}</h3><p>{NO_POSTER}</p></div></div>"#,
        escape_html(title)
    )
}

fn poster_block(title: &str, image: Option<&str>, search_link: String) -> String {
    let inner = match image {
        Some(src) => format!(
            r#"<a href="{link}" target="_blank" rel="noopener"><img src="{src}" alt="{title} Poster" class="movie-poster" data-title="{title}" onerror="showFallbackPoster(this)"></a>"#,
            link = escape_html(&search_link),
            src = escape_html(src),
            title = escape_html(title),
        ),
        None => fallback_poster(title),
    };
    format!(r#"<div class="poster-container">{inner}</div>"#)
}

pub fn title_card(movie: &TitleMatch) -> String {
    let link = format!(
        "https://www.imdb.com/find/?q={}",
        urlencoding::encode(&movie.title)
    );
    let genre = movie
        .genre
        .as_deref()
        .filter(|g| !g.is_empty())
        .unwrap_or(NOT_AVAILABLE);
    format!(
        r#"<div class="movie-card">{poster}<div class="movie-info"><h2>{title} ({year})</h2><p><strong>Type:</strong> {kind}</p><p><strong>Genre:</strong> {genre}</p></div></div>"#,
        poster = poster_block(&movie.title, movie.poster_url(), link),
        title = escape_html(&movie.title),
        year = escape_html(&movie.year),
        kind = escape_html(&movie.kind),
        genre = escape_html(genre),
    )
}

pub fn genre_card(movie: &DiscoverMovie) -> String {
    let link = format!(
        "https://www.themoviedb.org/search?query={}",
        urlencoding::encode(&movie.title)
    );
    let poster = movie.poster_path().map(tmdb::poster_url);
    let year = movie.release_year();
    let overview = movie
        .overview
        .as_deref()
        .filter(|o| !o.is_empty())
        .unwrap_or(NOT_AVAILABLE);
    format!(
        r#"<div class="movie-card">{poster}<div class="movie-info"><h2>{title} ({year})</h2><p><strong>Overview:</strong> {overview}</p></div></div>"#,
        poster = poster_block(&movie.title, poster.as_deref(), link),
        title = escape_html(&movie.title),
        year = escape_html(year.as_deref().unwrap_or(NOT_AVAILABLE)),
        overview = escape_html(overview),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inception(poster: &str) -> TitleMatch {
        TitleMatch {
            title: "Inception".to_string(),
            year: "2010".to_string(),
            poster: Some(poster.to_string()),
            kind: "movie".to_string(),
            genre: None,
            imdb_id: Some("tt1375666".to_string()),
        }
    }

    #[test]
    fn na_poster_renders_fallback_card() {
        let html = title_card(&inception("N/A"));
        assert!(!html.contains("<img"));
        assert!(html.contains("Inception (2010)"));
        assert!(html.contains("No poster available"));
        assert!(html.contains("<strong>Genre:</strong> N/A"));
    }

    #[test]
    fn poster_renders_linked_image() {
        let html = title_card(&inception("https://m.media-amazon.com/i.jpg"));
        assert!(html.contains(r#"<img src="https://m.media-amazon.com/i.jpg""#));
        assert!(html.contains("https://www.imdb.com/find/?q=Inception"));
        assert!(html.contains("showFallbackPoster(this)"));
    }

    #[test]
    fn genre_card_without_release_date_shows_na() {
        let movie = DiscoverMovie {
            id: Some(7),
            title: "Untitled".to_string(),
            release_date: None,
            poster_path: Some("/p.jpg".to_string()),
            overview: Some(String::new()),
        };
        let html = genre_card(&movie);
        assert!(html.contains("Untitled (N/A)"));
        assert!(html.contains("<strong>Overview:</strong> N/A"));
        assert!(html.contains("https://image.tmdb.org/t/p/w500/p.jpg"));
        assert!(html.contains("https://www.themoviedb.org/search?query=Untitled"));
    }

    #[test]
    fn placeholders_differ_by_mode() {
        assert!(no_results(SearchMode::Title).contains("<h3>No movies found</h3>"));
        assert!(no_results(SearchMode::Genre).contains("No movies found for this genre"));
    }

    #[test]
    fn nav_carries_genre_ids_and_icons() {
        let genres = vec![
            GenreEntry { id: 28, name: "Action".to_string() },
            GenreEntry { id: 37, name: "Western".to_string() },
        ];
        let html = populate_genre_nav(&genres);
        assert!(html.contains(r#"data-genre="28"><i class="fas fa-bomb"></i> Action"#));
        assert!(html.contains(r#"data-genre="37"><i class="fas fa-film"></i> Western"#));
    }

    #[test]
    fn escapes_interpolated_text() {
        let mut movie = inception("N/A");
        movie.title = "<script>alert('x')</script>".to_string();
        let html = title_card(&movie);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn page_reflects_view_flags() {
        let view = ViewState {
            error: Some("Movie not found!".to_string()),
            ..ViewState::default()
        };
        let html = render_page(&view, &[]);
        assert!(html.contains(r#"id="loading" class="loading" style="display: none""#));
        assert!(html.contains(r#"style="display: block">Movie not found!</div>"#));
    }
}
