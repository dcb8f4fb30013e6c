//! Repository for the `people` table.

use std::collections::HashMap;

use cinedex_core::filter::PersonFilter;
use cinedex_core::pagination::PageRequest;
use cinedex_core::specialization::Specialization;
use cinedex_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::person::{CreatePerson, Person, UpdatePerson};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, specialization";

/// Provides CRUD operations for people.
pub struct PersonRepo;

impl PersonRepo {
    /// Insert a new person, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePerson) -> Result<Person, sqlx::Error> {
        let query = format!(
            "INSERT INTO people (name, specialization) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(&input.name)
            .bind(input.specialization)
            .fetch_one(pool)
            .await
    }

    /// Find a person by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM people WHERE id = $1");
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of people matching `filter`, in id order.
    pub async fn list(
        pool: &PgPool,
        filter: &PersonFilter,
        page: PageRequest,
    ) -> Result<Vec<Person>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM people
             WHERE ($1::specialization IS NULL OR specialization = $1)
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(filter.specialization)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Number of people matching `filter`.
    pub async fn count(pool: &PgPool, filter: &PersonFilter) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM people
             WHERE ($1::specialization IS NULL OR specialization = $1)",
        )
        .bind(filter.specialization)
        .fetch_one(pool)
        .await
    }

    /// Update a person. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePerson,
    ) -> Result<Option<Person>, sqlx::Error> {
        let query = format!(
            "UPDATE people SET
                name = COALESCE($2, name),
                specialization = COALESCE($3, specialization)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.specialization)
            .fetch_optional(pool)
            .await
    }

    /// Delete a person by ID.
    ///
    /// Actor links are removed and any `movies.director_id` pointing here is
    /// set to NULL by the foreign keys. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM people WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Map each existing id in `ids` to its specialization.
    ///
    /// Matching rows stay share-locked until the transaction ends.
    pub async fn specializations(
        conn: &mut PgConnection,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, Specialization>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<(DbId, Specialization)> =
            sqlx::query_as("SELECT id, specialization FROM people WHERE id = ANY($1) FOR SHARE")
                .bind(ids)
                .fetch_all(conn)
                .await?;
        Ok(rows.into_iter().collect())
    }

    /// Return the person with this name and specialization, creating one if
    /// none exists. The oldest match wins when duplicates are present.
    pub async fn get_or_create(
        conn: &mut PgConnection,
        name: &str,
        specialization: Specialization,
    ) -> Result<Person, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM people
             WHERE name = $1 AND specialization = $2
             ORDER BY id
             LIMIT 1"
        );
        let existing = sqlx::query_as::<_, Person>(&query)
            .bind(name)
            .bind(specialization)
            .fetch_optional(&mut *conn)
            .await?;
        if let Some(person) = existing {
            return Ok(person);
        }

        let insert = format!(
            "INSERT INTO people (name, specialization) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&insert)
            .bind(name)
            .bind(specialization)
            .fetch_one(conn)
            .await
    }
}
