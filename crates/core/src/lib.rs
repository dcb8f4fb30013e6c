//! Domain types and pure request logic for the movie catalog.
//!
//! Nothing in this crate performs I/O. The db and api crates build on the
//! filter, pagination and credit-validation rules defined here.

pub mod credits;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod specialization;
pub mod types;
pub mod validation;
