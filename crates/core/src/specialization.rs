//! The role tag carried by every person.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether a person appears in the catalog as an actor or a director.
///
/// Stored as the PostgreSQL enum type `specialization` whose labels match the
/// variant names exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "specialization"))]
pub enum Specialization {
    #[default]
    Actor,
    Director,
}

impl Specialization {
    pub const ALL: [Specialization; 2] = [Specialization::Actor, Specialization::Director];

    pub fn as_str(self) -> &'static str {
        match self {
            Specialization::Actor => "Actor",
            Specialization::Director => "Director",
        }
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown specialization '{0}'")]
pub struct UnknownSpecialization(pub String);

impl FromStr for Specialization {
    type Err = UnknownSpecialization;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Specialization::ALL
            .into_iter()
            .find(|spec| spec.as_str() == s)
            .ok_or_else(|| UnknownSpecialization(s.to_string()))
    }
}
