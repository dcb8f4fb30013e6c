//! Query-string filters for list endpoints.
//!
//! Filters are parsed from the raw query map so unrecognized keys can be
//! ignored rather than rejected. Every recognized key treats an empty or
//! whitespace-only value as "no filter".
//!
//! Movie `actor` and `director` filters match the related person's numeric
//! id exactly. Name matching is not offered.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::CoreError;
use crate::specialization::Specialization;
use crate::types::DbId;

/// Raw query parameters, keyed and ordered by name.
pub type QueryParams = BTreeMap<String, String>;

/// Restrictions applied to the movie list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilter {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    pub year: Option<i32>,
    /// Id of a person credited as an actor.
    pub actor: Option<DbId>,
    /// Id of the directing person.
    pub director: Option<DbId>,
}

impl MovieFilter {
    pub fn from_params(params: &QueryParams) -> Result<Self, CoreError> {
        Ok(Self {
            title: raw_param(params, "title").map(str::to_string),
            year: parse_param(params, "year")?,
            actor: parse_param(params, "actor")?,
            director: parse_param(params, "director")?,
        })
    }

    /// The `ILIKE` pattern for the title filter, with wildcards in the user
    /// input escaped.
    pub fn title_pattern(&self) -> Option<String> {
        self.title
            .as_deref()
            .map(|title| format!("%{}%", escape_like(title)))
    }
}

/// Restrictions applied to the people list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonFilter {
    pub specialization: Option<Specialization>,
}

impl PersonFilter {
    pub fn from_params(params: &QueryParams) -> Result<Self, CoreError> {
        Ok(Self {
            specialization: parse_param(params, "specialization")?,
        })
    }
}

/// Return the value for `key` unless it is absent or blank.
fn raw_param<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}

/// Parse the value for `key`, failing with `InvalidFilterValue` when present
/// but malformed.
pub fn parse_param<T: FromStr>(params: &QueryParams, key: &str) -> Result<Option<T>, CoreError> {
    match raw_param(params, key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CoreError::InvalidFilterValue {
                param: key.to_string(),
                value: value.to_string(),
            }),
    }
}

/// Escape `\`, `%` and `_` so user text matches literally inside a `LIKE`
/// pattern using the default `\` escape character.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // -- MovieFilter ---------------------------------------------------------

    #[test]
    fn no_params_means_no_restriction() {
        let filter = MovieFilter::from_params(&QueryParams::new()).unwrap();
        assert_eq!(filter, MovieFilter::default());
        assert_eq!(filter.title_pattern(), None);
    }

    #[test]
    fn parses_all_movie_keys() {
        let filter = MovieFilter::from_params(&params(&[
            ("title", "Matrix"),
            ("year", "1999"),
            ("actor", "3"),
            ("director", " 7 "),
        ]))
        .unwrap();

        assert_eq!(filter.title.as_deref(), Some("Matrix"));
        assert_eq!(filter.year, Some(1999));
        assert_eq!(filter.actor, Some(3));
        assert_eq!(filter.director, Some(7));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let filter =
            MovieFilter::from_params(&params(&[("genre", "Drama"), ("ordering", "-year")]))
                .unwrap();
        assert_eq!(filter, MovieFilter::default());
    }

    #[test]
    fn empty_values_impose_no_filter() {
        let filter = MovieFilter::from_params(&params(&[
            ("title", ""),
            ("year", " "),
            ("actor", ""),
            ("director", ""),
        ]))
        .unwrap();
        assert_eq!(filter, MovieFilter::default());
    }

    #[test]
    fn non_numeric_actor_is_invalid_filter_value() {
        let err = MovieFilter::from_params(&params(&[("actor", "John Doe")])).unwrap_err();
        assert_matches!(
            err,
            CoreError::InvalidFilterValue { ref param, ref value }
                if param == "actor" && value == "John Doe"
        );
    }

    #[test]
    fn non_numeric_year_is_invalid_filter_value() {
        let err = MovieFilter::from_params(&params(&[("year", "nineteen")])).unwrap_err();
        assert_matches!(err, CoreError::InvalidFilterValue { ref param, .. } if param == "year");
    }

    #[test]
    fn title_pattern_wraps_and_escapes() {
        let filter = MovieFilter {
            title: Some("100%_real\\".into()),
            ..Default::default()
        };
        assert_eq!(filter.title_pattern().as_deref(), Some("%100\\%\\_real\\\\%"));
    }

    // -- PersonFilter --------------------------------------------------------

    #[test]
    fn parses_specialization() {
        let filter = PersonFilter::from_params(&params(&[("specialization", "Director")])).unwrap();
        assert_eq!(filter.specialization, Some(Specialization::Director));
    }

    #[test]
    fn unknown_specialization_is_invalid_filter_value() {
        let err = PersonFilter::from_params(&params(&[("specialization", "Writer")])).unwrap_err();
        assert_matches!(err, CoreError::InvalidFilterValue { .. });
    }

    #[test]
    fn blank_specialization_is_no_filter() {
        let filter = PersonFilter::from_params(&params(&[("specialization", "")])).unwrap();
        assert_eq!(filter.specialization, None);
    }
}
