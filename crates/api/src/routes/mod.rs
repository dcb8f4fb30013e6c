pub mod genre;
pub mod health;
pub mod movie;
pub mod person;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the catalog route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                      root discovery
/// /people/               list, create
/// /people/{id}/          get, update (PUT/PATCH), delete
/// /movies/               list, create
/// /movies/{id}/          get, update (PUT/PATCH), delete
/// /genres/               list, create
/// /genres/{id}/          get, update (PUT/PATCH), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root::discover))
        .merge(person::router())
        .merge(movie::router())
        .merge(genre::router())
}
