//! Request handlers for the catalog resources.
//!
//! Each submodule provides async handler functions (list, create, get_by_id,
//! update, delete) for a single entity type. Handlers delegate to the
//! corresponding repository in `cinedex_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod genre;
pub mod movie;
pub mod person;
pub mod root;
