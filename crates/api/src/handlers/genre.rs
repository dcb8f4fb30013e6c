//! Handlers for the `/genres/` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cinedex_core::error::CoreError;
use cinedex_core::pagination::Envelope;
use cinedex_core::types::DbId;
use cinedex_db::models::genre::{CreateGenre, Genre, UpdateGenre};
use cinedex_db::repositories::GenreRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, ListQuery};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Genre", id })
}

/// GET /genres/
pub async fn list(
    State(state): State<AppState>,
    query: ListQuery,
) -> AppResult<Json<Envelope<Genre>>> {
    let page = query.page_request(&state.config)?;
    let total = GenreRepo::count(&state.pool).await?;
    let genres = GenreRepo::list(&state.pool, page).await?;
    Ok(Json(query.envelope(&state.config, genres, total, page)))
}

/// POST /genres/
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateGenre>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    input.validate()?;
    let genre = GenreRepo::create(&state.pool, &input).await?;
    tracing::info!(genre_id = genre.id, name = %genre.name, "Genre created");
    Ok((StatusCode::CREATED, Json(genre)))
}

/// GET /genres/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Genre>> {
    let genre = GenreRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(genre))
}

/// PUT /genres/{id}/ (also PATCH)
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateGenre>,
) -> AppResult<Json<Genre>> {
    GenreRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    input.validate()?;

    let genre = GenreRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(genre_id = id, "Genre updated");
    Ok(Json(genre))
}

/// DELETE /genres/{id}/
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if GenreRepo::delete(&state.pool, id).await? {
        tracing::info!(genre_id = id, "Genre deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
