//! Route definitions for the `/people/` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::person;
use crate::state::AppState;

/// Routes for `/people/`.
///
/// ```text
/// GET    /people/         -> list
/// POST   /people/         -> create
/// GET    /people/{id}/    -> get_by_id
/// PUT    /people/{id}/    -> update
/// PATCH  /people/{id}/    -> update
/// DELETE /people/{id}/    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/people/", get(person::list).post(person::create))
        .route(
            "/people/{id}/",
            get(person::get_by_id)
                .put(person::update)
                .patch(person::update)
                .delete(person::delete),
        )
}
