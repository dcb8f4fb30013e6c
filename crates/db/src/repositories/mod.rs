//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Read paths accept `&PgPool`; write paths that must share a transaction
//! with validation accept `&mut PgConnection` so callers can pass `&mut *tx`.

pub mod genre_repo;
pub mod movie_repo;
pub mod person_repo;

pub use genre_repo::GenreRepo;
pub use movie_repo::MovieRepo;
pub use person_repo::PersonRepo;
