/// Icon shown next to a genre in the navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreIcon {
    Action,
    Comedy,
    Thriller,
    Horror,
    SciFi,
    Romance,
    Animation,
    Documentary,
    Film,
    Unknown,
}

impl GenreIcon {
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() {
            return GenreIcon::Unknown;
        }
        match name.to_lowercase().as_str() {
            "action" => GenreIcon::Action,
            "comedy" => GenreIcon::Comedy,
            "thriller" => GenreIcon::Thriller,
            "horror" => GenreIcon::Horror,
            "sci-fi" => GenreIcon::SciFi,
            "romance" => GenreIcon::Romance,
            "animation" => GenreIcon::Animation,
            "documentary" => GenreIcon::Documentary,
            _ => GenreIcon::Film,
        }
    }

    /// Font Awesome class list.
    pub fn css_class(self) -> &'static str {
        match self {
            GenreIcon::Action => "fas fa-bomb",
            GenreIcon::Comedy => "fas fa-laugh-squint",
            GenreIcon::Thriller => "fas fa-exclamation-triangle",
            GenreIcon::Horror => "fas fa-ghost",
            GenreIcon::SciFi => "fas fa-rocket",
            GenreIcon::Romance => "fas fa-heart",
            GenreIcon::Animation => "fas fa-child",
            GenreIcon::Documentary => "fas fa-file-alt",
            GenreIcon::Film => "fas fa-film",
            GenreIcon::Unknown => "fas fa-question-circle",
        }
    }
}
