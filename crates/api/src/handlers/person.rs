//! Handlers for the `/people/` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cinedex_core::error::CoreError;
use cinedex_core::filter::PersonFilter;
use cinedex_core::pagination::Envelope;
use cinedex_core::types::DbId;
use cinedex_db::models::person::{CreatePerson, Person, UpdatePerson};
use cinedex_db::repositories::PersonRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, ListQuery};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Person",
        id,
    })
}

/// GET /people/?specialization=
pub async fn list(
    State(state): State<AppState>,
    query: ListQuery,
) -> AppResult<Json<Envelope<Person>>> {
    let filter = PersonFilter::from_params(&query.params)?;
    let page = query.page_request(&state.config)?;

    let total = PersonRepo::count(&state.pool, &filter).await?;
    let people = PersonRepo::list(&state.pool, &filter, page).await?;
    Ok(Json(query.envelope(&state.config, people, total, page)))
}

/// POST /people/
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreatePerson>,
) -> AppResult<(StatusCode, Json<Person>)> {
    input.validate()?;
    let person = PersonRepo::create(&state.pool, &input).await?;
    tracing::info!(
        person_id = person.id,
        specialization = %person.specialization,
        "Person created"
    );
    Ok((StatusCode::CREATED, Json(person)))
}

/// GET /people/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Person>> {
    let person = PersonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(person))
}

/// PUT /people/{id}/ (also PATCH)
///
/// Changing a person's specialization does not touch existing credits.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdatePerson>,
) -> AppResult<Json<Person>> {
    PersonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    input.validate()?;

    let person = PersonRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(person_id = id, "Person updated");
    Ok(Json(person))
}

/// DELETE /people/{id}/
///
/// Removes the person's actor credits and clears them as director.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if PersonRepo::delete(&state.pool, id).await? {
        tracing::info!(person_id = id, "Person deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
