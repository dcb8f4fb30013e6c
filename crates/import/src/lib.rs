//! One-shot catalog importer backed by the OMDb API.
//!
//! Fetches each title, maps the response onto genres, people and a movie,
//! and persists it with get-or-create semantics. A failing title is logged
//! and skipped; the rest of the batch still runs.

pub mod catalog;
pub mod importer;
pub mod mapping;
pub mod omdb;
