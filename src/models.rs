use serde::{Deserialize, Serialize};

/// One entry of the TMDB movie genre catalog.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GenreEntry {
    pub id: i32,
    pub name: String,
}

/// A single hit from the OMDb title search.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TitleMatch {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
}

impl TitleMatch {
    /// OMDb reports a missing poster as the literal "N/A".
    pub fn poster_url(&self) -> Option<&str> {
        self.poster
            .as_deref()
            .filter(|p| !p.is_empty() && *p != "N/A")
    }
}

/// A single result from TMDB genre discovery.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DiscoverMovie {
    #[serde(default)]
    pub id: Option<i32>,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl DiscoverMovie {
    pub fn release_year(&self) -> Option<String> {
        self.release_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(|d| d.chars().take(4).collect())
    }

    pub fn poster_path(&self) -> Option<&str> {
        self.poster_path.as_deref().filter(|p| !p.is_empty())
    }
}
