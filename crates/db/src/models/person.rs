//! Person entity model and DTOs.
//!
//! One table serves both actors and directors; the role is carried by
//! [`Specialization`].

use std::fmt;

use cinedex_core::specialization::Specialization;
use cinedex_core::types::DbId;
use cinedex_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `people` table. This is also its only wire shape.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    pub name: String,
    pub specialization: Specialization,
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Person {}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// DTO for creating a new person.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePerson {
    #[validate(
        length(max = 255, message = "Ensure this field has no more than 255 characters."),
        custom(function = "not_blank")
    )]
    pub name: String,
    /// Defaults to `Actor` if omitted.
    #[serde(default)]
    pub specialization: Specialization,
}

/// DTO for updating an existing person. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePerson {
    #[validate(
        length(max = 255, message = "Ensure this field has no more than 255 characters."),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
    pub specialization: Option<Specialization>,
}
