//! Movie entity model, read projections and write DTOs.
//!
//! Movies have two read shapes: the compact [`MovieListItem`] used by the
//! list endpoint and the nested [`MovieDetail`] used everywhere else. Both
//! are built from a [`MovieRecord`], a movie row with its relations loaded.

use std::fmt;

use cinedex_core::specialization::Specialization;
use cinedex_core::types::DbId;
use cinedex_core::validation::not_blank;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::genre::Genre;
use crate::models::person::Person;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub year: Option<i32>,
    pub director_id: Option<DbId>,
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Movie {}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// A genre joined through `movie_genres`, tagged with the owning movie.
#[derive(Debug, Clone, FromRow)]
pub struct GenreCredit {
    pub movie_id: DbId,
    pub id: DbId,
    pub name: String,
}

impl From<GenreCredit> for Genre {
    fn from(row: GenreCredit) -> Self {
        Genre {
            id: row.id,
            name: row.name,
        }
    }
}

/// A person joined through `movie_actors`, tagged with the owning movie.
#[derive(Debug, Clone, FromRow)]
pub struct ActorCredit {
    pub movie_id: DbId,
    pub id: DbId,
    pub name: String,
    pub specialization: Specialization,
}

impl From<ActorCredit> for Person {
    fn from(row: ActorCredit) -> Self {
        Person {
            id: row.id,
            name: row.name,
            specialization: row.specialization,
        }
    }
}

/// A movie with its genres, actors and director loaded.
#[derive(Debug, Clone)]
pub struct MovieRecord {
    pub movie: Movie,
    pub genres: Vec<Genre>,
    pub actors: Vec<Person>,
    pub director: Option<Person>,
}

/// The natural key the importer deduplicates movies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieKey {
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub year: Option<i32>,
    pub director_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Read projections
// ---------------------------------------------------------------------------

/// Compact list shape: related entities flattened to their names.
#[derive(Debug, Clone, Serialize)]
pub struct MovieListItem {
    pub id: DbId,
    pub title: String,
    pub genres: Vec<String>,
    pub actors: Vec<String>,
    pub director: Option<String>,
}

impl MovieListItem {
    pub fn project(record: MovieRecord) -> Self {
        Self {
            id: record.movie.id,
            title: record.movie.title,
            genres: record.genres.into_iter().map(|g| g.name).collect(),
            actors: record.actors.into_iter().map(|p| p.name).collect(),
            director: record.director.map(|p| p.name),
        }
    }
}

/// Full detail shape with nested genre and person objects.
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetail {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub year: Option<i32>,
    pub genres: Vec<Genre>,
    pub actors: Vec<Person>,
    pub director: Option<Person>,
}

impl MovieDetail {
    pub fn project(record: MovieRecord) -> Self {
        Self {
            id: record.movie.id,
            title: record.movie.title,
            description: record.movie.description,
            duration: record.movie.duration,
            year: record.movie.year,
            genres: record.genres,
            actors: record.actors,
            director: record.director,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a new movie. Related entities are referenced by id.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMovie {
    #[validate(
        length(max = 255, message = "Ensure this field has no more than 255 characters."),
        custom(function = "not_blank")
    )]
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub year: Option<i32>,
    #[serde(default)]
    pub genres: Vec<DbId>,
    #[serde(default)]
    pub actors: Vec<DbId>,
    pub director: Option<DbId>,
}

/// DTO for a partial movie update.
///
/// Absent fields are left untouched. For the nullable columns an explicit
/// `null` clears the stored value, which is why they are double options.
/// A present `genres` or `actors` list replaces the whole association set.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMovie {
    #[validate(
        length(max = 255, message = "Ensure this field has no more than 255 characters."),
        custom(function = "not_blank")
    )]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub duration: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub year: Option<Option<i32>>,
    pub genres: Option<Vec<DbId>>,
    pub actors: Option<Vec<DbId>>,
    #[serde(default, deserialize_with = "present")]
    pub director: Option<Option<DbId>>,
}

/// Marks a field that appeared in the payload, even as `null`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// The cross-referencing part of a movie write, checked before persisting.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreditRequest<'a> {
    pub genres: Option<&'a [DbId]>,
    pub actors: Option<&'a [DbId]>,
    pub director: Option<DbId>,
    pub duration: Option<i32>,
    pub year: Option<i32>,
}

impl CreateMovie {
    pub fn credits(&self) -> CreditRequest<'_> {
        CreditRequest {
            genres: Some(&self.genres),
            actors: Some(&self.actors),
            director: self.director,
            duration: self.duration,
            year: self.year,
        }
    }
}

impl UpdateMovie {
    pub fn credits(&self) -> CreditRequest<'_> {
        CreditRequest {
            genres: self.genres.as_deref(),
            actors: self.actors.as_deref(),
            director: self.director.flatten(),
            duration: self.duration.flatten(),
            year: self.year.flatten(),
        }
    }
}
