//! Pure conversion from OMDb responses to catalog records.

use crate::omdb::OmdbMovie;

/// A movie ready to persist, with related entities referenced by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieImport {
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub genres: Vec<String>,
    pub actors: Vec<String>,
}

impl MovieImport {
    /// Map an OMDb response. Returns `None` when the response has no title.
    pub fn from_omdb(movie: &OmdbMovie) -> Option<Self> {
        Some(Self {
            title: present(&movie.title)?.to_string(),
            description: present(&movie.plot).map(str::to_string),
            duration: present(&movie.runtime).and_then(parse_runtime),
            year: present(&movie.year).and_then(parse_year),
            director: present(&movie.director).map(str::to_string),
            genres: split_names(present(&movie.genre)),
            actors: split_names(present(&movie.actors)),
        })
    }
}

/// A trimmed value, or `None` for missing, blank and `"N/A"`.
fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "N/A")
}

/// Split a `", "`-separated name list.
pub fn split_names(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty() && *name != "N/A")
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// `"142 min"` -> `142`.
pub fn parse_runtime(value: &str) -> Option<i32> {
    value.split_whitespace().next()?.parse().ok()
}

/// Leading four-digit year, so `"2010–2012"` -> `2010`.
pub fn parse_year(value: &str) -> Option<i32> {
    let digits: String = value.chars().take_while(char::is_ascii_digit).collect();
    if digits.len() == 4 {
        digits.parse().ok()
    } else {
        None
    }
}
