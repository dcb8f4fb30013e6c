//! Handlers for the `/movies/` resource.
//!
//! Writes run in one transaction: payload checks, cross-reference checks
//! against genres and people, then the row and association changes. Any
//! failure drops the transaction, so a rejected write leaves nothing behind.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cinedex_core::error::{CoreError, FieldErrors};
use cinedex_core::filter::MovieFilter;
use cinedex_core::pagination::Envelope;
use cinedex_core::types::DbId;
use cinedex_core::validation::field_errors;
use cinedex_db::models::movie::{CreateMovie, MovieDetail, MovieListItem, UpdateMovie};
use cinedex_db::repositories::MovieRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, ListQuery};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Movie", id })
}

/// Merge payload and cross-reference errors so the caller sees both at once.
fn merge_errors(
    payload: Result<(), validator::ValidationErrors>,
    credits: FieldErrors,
) -> FieldErrors {
    let mut errors = match payload {
        Ok(()) => FieldErrors::new(),
        Err(e) => field_errors(&e),
    };
    for (field, messages) in credits {
        errors.entry(field).or_default().extend(messages);
    }
    errors
}

async fn load_detail(state: &AppState, id: DbId) -> AppResult<MovieDetail> {
    let record = MovieRepo::find_record(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(MovieDetail::project(record))
}

/// GET /movies/?title=&year=&actor=&director=
pub async fn list(
    State(state): State<AppState>,
    query: ListQuery,
) -> AppResult<Json<Envelope<MovieListItem>>> {
    let filter = MovieFilter::from_params(&query.params)?;
    let page = query.page_request(&state.config)?;

    let total = MovieRepo::count(&state.pool, &filter).await?;
    let movies = MovieRepo::list(&state.pool, &filter, page)
        .await?
        .into_iter()
        .map(MovieListItem::project)
        .collect();
    Ok(Json(query.envelope(&state.config, movies, total, page)))
}

/// POST /movies/
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateMovie>,
) -> AppResult<(StatusCode, Json<MovieDetail>)> {
    let mut tx = state.pool.begin().await?;

    let credits = MovieRepo::validate_credits(&mut tx, &input.credits()).await?;
    CoreError::check_fields(merge_errors(input.validate(), credits))?;

    let movie = MovieRepo::create(&mut tx, &input).await?;
    tx.commit().await?;
    tracing::info!(movie_id = movie.id, title = %movie.title, "Movie created");

    let detail = load_detail(&state, movie.id).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /movies/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MovieDetail>> {
    Ok(Json(load_detail(&state, id).await?))
}

/// PUT /movies/{id}/ (also PATCH)
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateMovie>,
) -> AppResult<Json<MovieDetail>> {
    let mut tx = state.pool.begin().await?;
    MovieRepo::find_for_update(&mut tx, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let credits = MovieRepo::validate_credits(&mut tx, &input.credits()).await?;
    CoreError::check_fields(merge_errors(input.validate(), credits))?;

    MovieRepo::update(&mut tx, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tx.commit().await?;
    tracing::info!(movie_id = id, "Movie updated");

    Ok(Json(load_detail(&state, id).await?))
}

/// DELETE /movies/{id}/
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if MovieRepo::delete(&state.pool, id).await? {
        tracing::info!(movie_id = id, "Movie deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
