//! Repository for the `movies`, `movie_genres` and `movie_actors` tables.

use std::collections::HashMap;

use cinedex_core::credits::{
    check_actors, check_director, check_genres, check_non_negative, dedup_ids,
};
use cinedex_core::error::FieldErrors;
use cinedex_core::filter::MovieFilter;
use cinedex_core::pagination::PageRequest;
use cinedex_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::genre::Genre;
use crate::models::movie::{
    ActorCredit, CreateMovie, CreditRequest, GenreCredit, Movie, MovieKey, MovieRecord,
    UpdateMovie,
};
use crate::models::person::Person;
use crate::repositories::{GenreRepo, PersonRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, duration, year, director_id";

/// WHERE clause for [`MovieFilter`]. Binds `$1` title pattern, `$2` year,
/// `$3` actor id, `$4` director id; a NULL bind disables that condition.
const FILTER_CLAUSE: &str = "\
    ($1::TEXT IS NULL OR title ILIKE $1) \
    AND ($2::INTEGER IS NULL OR year = $2) \
    AND ($3::BIGINT IS NULL OR EXISTS ( \
        SELECT 1 FROM movie_actors ma \
        WHERE ma.movie_id = movies.id AND ma.person_id = $3)) \
    AND ($4::BIGINT IS NULL OR director_id = $4)";

/// Provides CRUD operations for movies and their associations.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie with its genre and actor links.
    ///
    /// Run inside the caller's transaction after [`MovieRepo::validate_credits`].
    pub async fn create(conn: &mut PgConnection, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (title, description, duration, year, director_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.duration)
            .bind(input.year)
            .bind(input.director)
            .fetch_one(&mut *conn)
            .await?;

        Self::set_genres(&mut *conn, movie.id, &input.genres).await?;
        Self::set_actors(conn, movie.id, &input.actors).await?;
        Ok(movie)
    }

    /// Find a movie row by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a movie row and lock it for the rest of the transaction.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Find a movie by ID with its relations loaded.
    pub async fn find_record(pool: &PgPool, id: DbId) -> Result<Option<MovieRecord>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(movie) => Ok(Self::load_records(pool, vec![movie]).await?.pop()),
            None => Ok(None),
        }
    }

    /// List one page of movies matching `filter`, ordered by title.
    pub async fn list(
        pool: &PgPool,
        filter: &MovieFilter,
        page: PageRequest,
    ) -> Result<Vec<MovieRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies
             WHERE {FILTER_CLAUSE}
             ORDER BY title, id
             LIMIT $5 OFFSET $6"
        );
        let movies = sqlx::query_as::<_, Movie>(&query)
            .bind(filter.title_pattern())
            .bind(filter.year)
            .bind(filter.actor)
            .bind(filter.director)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Self::load_records(pool, movies).await
    }

    /// Number of movies matching `filter`.
    pub async fn count(pool: &PgPool, filter: &MovieFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM movies WHERE {FILTER_CLAUSE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.title_pattern())
            .bind(filter.year)
            .bind(filter.actor)
            .bind(filter.director)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update. Only fields present in `input` change.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                duration = CASE WHEN $5 THEN $6 ELSE duration END,
                year = CASE WHEN $7 THEN $8 ELSE year END,
                director_id = CASE WHEN $9 THEN $10 ELSE director_id END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .bind(input.duration.is_some())
            .bind(input.duration.flatten())
            .bind(input.year.is_some())
            .bind(input.year.flatten())
            .bind(input.director.is_some())
            .bind(input.director.flatten())
            .fetch_optional(&mut *conn)
            .await?;

        if movie.is_some() {
            if let Some(ref genres) = input.genres {
                Self::set_genres(&mut *conn, id, genres).await?;
            }
            if let Some(ref actors) = input.actors {
                Self::set_actors(&mut *conn, id, actors).await?;
            }
        }
        Ok(movie)
    }

    /// Delete a movie by ID. Link rows cascade; genres and people stay.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Association helpers
    // -----------------------------------------------------------------------

    /// Replace all genre links for a movie.
    pub async fn set_genres(
        conn: &mut PgConnection,
        movie_id: DbId,
        genre_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM movie_genres WHERE movie_id = $1")
            .bind(movie_id)
            .execute(&mut *conn)
            .await?;

        let ids = dedup_ids(genre_ids);
        if !ids.is_empty() {
            sqlx::query(
                "INSERT INTO movie_genres (movie_id, genre_id)
                 SELECT $1, UNNEST($2::BIGINT[])",
            )
            .bind(movie_id)
            .bind(&ids)
            .execute(conn)
            .await?;
        }
        Ok(())
    }

    /// Replace all actor links for a movie.
    pub async fn set_actors(
        conn: &mut PgConnection,
        movie_id: DbId,
        person_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM movie_actors WHERE movie_id = $1")
            .bind(movie_id)
            .execute(&mut *conn)
            .await?;

        let ids = dedup_ids(person_ids);
        if !ids.is_empty() {
            sqlx::query(
                "INSERT INTO movie_actors (movie_id, person_id)
                 SELECT $1, UNNEST($2::BIGINT[])",
            )
            .bind(movie_id)
            .bind(&ids)
            .execute(conn)
            .await?;
        }
        Ok(())
    }

    /// Resolve every id referenced by a movie write and collect the errors.
    ///
    /// An empty map means the write may proceed.
    pub async fn validate_credits(
        conn: &mut PgConnection,
        credits: &CreditRequest<'_>,
    ) -> Result<FieldErrors, sqlx::Error> {
        let mut errors = FieldErrors::new();

        if let Some(genres) = credits.genres {
            let existing = GenreRepo::existing_ids(&mut *conn, genres).await?;
            check_genres(genres, &existing, &mut errors);
        }

        let mut person_ids: Vec<DbId> = credits.actors.unwrap_or_default().to_vec();
        person_ids.extend(credits.director);
        let people = PersonRepo::specializations(&mut *conn, &dedup_ids(&person_ids)).await?;

        if let Some(actors) = credits.actors {
            check_actors(actors, &people, &mut errors);
        }
        if let Some(director) = credits.director {
            check_director(director, &people, &mut errors);
        }

        check_non_negative("duration", credits.duration, &mut errors);
        check_non_negative("year", credits.year, &mut errors);
        Ok(errors)
    }

    /// Attach genres, actors and directors to a batch of movie rows,
    /// preserving the input order.
    pub async fn load_records(
        pool: &PgPool,
        movies: Vec<Movie>,
    ) -> Result<Vec<MovieRecord>, sqlx::Error> {
        if movies.is_empty() {
            return Ok(Vec::new());
        }
        let movie_ids: Vec<DbId> = movies.iter().map(|m| m.id).collect();
        let director_ids: Vec<DbId> = dedup_ids(
            &movies
                .iter()
                .filter_map(|m| m.director_id)
                .collect::<Vec<_>>(),
        );

        let genre_rows = sqlx::query_as::<_, GenreCredit>(
            "SELECT mg.movie_id, g.id, g.name
             FROM movie_genres mg
             JOIN genres g ON g.id = mg.genre_id
             WHERE mg.movie_id = ANY($1)
             ORDER BY g.id",
        )
        .bind(&movie_ids)
        .fetch_all(pool)
        .await?;

        let actor_rows = sqlx::query_as::<_, ActorCredit>(
            "SELECT ma.movie_id, p.id, p.name, p.specialization
             FROM movie_actors ma
             JOIN people p ON p.id = ma.person_id
             WHERE ma.movie_id = ANY($1)
             ORDER BY p.id",
        )
        .bind(&movie_ids)
        .fetch_all(pool)
        .await?;

        let directors: HashMap<DbId, Person> = if director_ids.is_empty() {
            HashMap::new()
        } else {
            sqlx::query_as::<_, Person>(
                "SELECT id, name, specialization FROM people WHERE id = ANY($1)",
            )
            .bind(&director_ids)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect()
        };

        let mut genres: HashMap<DbId, Vec<Genre>> = HashMap::new();
        for row in genre_rows {
            genres.entry(row.movie_id).or_default().push(row.into());
        }
        let mut actors: HashMap<DbId, Vec<Person>> = HashMap::new();
        for row in actor_rows {
            actors.entry(row.movie_id).or_default().push(row.into());
        }

        Ok(movies
            .into_iter()
            .map(|movie| MovieRecord {
                genres: genres.remove(&movie.id).unwrap_or_default(),
                actors: actors.remove(&movie.id).unwrap_or_default(),
                director: movie.director_id.and_then(|id| directors.get(&id).cloned()),
                movie,
            })
            .collect())
    }

    // -----------------------------------------------------------------------
    // Import support
    // -----------------------------------------------------------------------

    /// Return the movie matching every part of `key`, inserting it if none
    /// does. A different movie with the same title surfaces as a
    /// `uq_movies_title` violation.
    pub async fn get_or_create_by_key(
        conn: &mut PgConnection,
        key: &MovieKey,
    ) -> Result<Movie, sqlx::Error> {
        let select = format!(
            "SELECT {COLUMNS} FROM movies
             WHERE title = $1
               AND description IS NOT DISTINCT FROM $2
               AND duration IS NOT DISTINCT FROM $3
               AND year IS NOT DISTINCT FROM $4
               AND director_id IS NOT DISTINCT FROM $5"
        );
        let existing = sqlx::query_as::<_, Movie>(&select)
            .bind(&key.title)
            .bind(&key.description)
            .bind(key.duration)
            .bind(key.year)
            .bind(key.director_id)
            .fetch_optional(&mut *conn)
            .await?;
        if let Some(movie) = existing {
            return Ok(movie);
        }

        let insert = format!(
            "INSERT INTO movies (title, description, duration, year, director_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&insert)
            .bind(&key.title)
            .bind(&key.description)
            .bind(key.duration)
            .bind(key.year)
            .bind(key.director_id)
            .fetch_one(conn)
            .await
    }
}
