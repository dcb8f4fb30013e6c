//! Root discovery endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Links to every list endpoint, plus people pre-filtered by role.
#[derive(Debug, Serialize)]
pub struct RootLinks {
    pub people: String,
    pub actors: String,
    pub directors: String,
    pub movies: String,
    pub genres: String,
}

impl RootLinks {
    /// Build the link map, absolute when `base_url` is set.
    pub fn new(base_url: Option<&str>) -> Self {
        let base = base_url.unwrap_or("").trim_end_matches('/');
        Self {
            people: format!("{base}/people/"),
            actors: format!("{base}/people/?specialization=Actor"),
            directors: format!("{base}/people/?specialization=Director"),
            movies: format!("{base}/movies/"),
            genres: format!("{base}/genres/"),
        }
    }
}

/// GET /
pub async fn discover(State(state): State<AppState>) -> Json<RootLinks> {
    Json(RootLinks::new(state.config.public_base_url.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_links_without_base_url() {
        let links = RootLinks::new(None);
        assert_eq!(links.people, "/people/");
        assert_eq!(links.directors, "/people/?specialization=Director");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let links = RootLinks::new(Some("https://films.example.com/"));
        assert_eq!(links.movies, "https://films.example.com/movies/");
        assert_eq!(links.actors, "https://films.example.com/people/?specialization=Actor");
    }
}
