//! Batch import: fetch, map and persist each title in isolation.

use cinedex_core::specialization::Specialization;
use cinedex_db::models::movie::{Movie, MovieKey};
use cinedex_db::repositories::{GenreRepo, MovieRepo, PersonRepo};
use cinedex_db::DbPool;

use crate::mapping::MovieImport;
use crate::omdb::{OmdbClient, OmdbError};

/// Why a single title failed to import.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Omdb(#[from] OmdbError),

    #[error("OMDb response for '{0}' has no title")]
    MissingTitle(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub imported: usize,
    /// Title and error message for each failure.
    pub failed: Vec<(String, String)>,
}

/// Import every title, logging and skipping failures.
pub async fn import_titles(
    pool: &DbPool,
    client: &OmdbClient,
    titles: &[String],
) -> ImportSummary {
    let mut summary = ImportSummary::default();
    for title in titles {
        match import_title(pool, client, title).await {
            Ok(movie) => {
                tracing::info!(movie_id = movie.id, title = %movie.title, "Imported movie");
                summary.imported += 1;
            }
            Err(e) => {
                tracing::error!(title = %title, error = %e, "Failed to import movie");
                summary.failed.push((title.clone(), e.to_string()));
            }
        }
    }
    summary
}

/// Fetch one title from OMDb and persist it.
pub async fn import_title(
    pool: &DbPool,
    client: &OmdbClient,
    title: &str,
) -> Result<Movie, ImportError> {
    let response = client.fetch_by_title(title).await?;
    let import =
        MovieImport::from_omdb(&response).ok_or_else(|| ImportError::MissingTitle(title.into()))?;
    Ok(persist(pool, &import).await?)
}

/// Write one mapped movie in a single transaction.
///
/// Genres and people are reused by natural key. The movie is reused only
/// when every key field matches; its genre and actor sets are replaced.
pub async fn persist(pool: &DbPool, import: &MovieImport) -> Result<Movie, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let mut genre_ids = Vec::with_capacity(import.genres.len());
    for name in &import.genres {
        genre_ids.push(GenreRepo::get_or_create(&mut tx, name).await?.id);
    }

    let director_id = match import.director.as_deref() {
        Some(name) => Some(
            PersonRepo::get_or_create(&mut tx, name, Specialization::Director)
                .await?
                .id,
        ),
        None => None,
    };

    let mut actor_ids = Vec::with_capacity(import.actors.len());
    for name in &import.actors {
        actor_ids.push(
            PersonRepo::get_or_create(&mut tx, name, Specialization::Actor)
                .await?
                .id,
        );
    }

    let key = MovieKey {
        title: import.title.clone(),
        description: import.description.clone(),
        duration: import.duration,
        year: import.year,
        director_id,
    };
    let movie = MovieRepo::get_or_create_by_key(&mut tx, &key).await?;
    MovieRepo::set_genres(&mut tx, movie.id, &genre_ids).await?;
    MovieRepo::set_actors(&mut tx, movie.id, &actor_ids).await?;

    tx.commit().await?;
    Ok(movie)
}
