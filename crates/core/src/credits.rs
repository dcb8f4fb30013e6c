//! Cross-reference rules for movie write payloads.
//!
//! A movie's genres must exist, every credited actor must be an existing
//! person with the `Actor` specialization, and the director must be an
//! existing `Director`. Storage accepts any person in either role, so these
//! checks run before the write and report every offending id at once.

use std::collections::HashMap;

use crate::error::{push_field_error, FieldErrors};
use crate::specialization::Specialization;
use crate::types::DbId;

/// Message for an id that matches no stored row.
pub fn missing_pk_message(id: DbId) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}

/// Message for a person whose specialization does not fit the role.
pub fn wrong_role_message(role: Specialization, id: DbId) -> String {
    format!("No {} with {id} pk", role.as_str().to_lowercase())
}

/// Report genre ids that are not in `existing`.
pub fn check_genres(requested: &[DbId], existing: &[DbId], errors: &mut FieldErrors) {
    for id in requested {
        if !existing.contains(id) {
            push_field_error(errors, "genres", missing_pk_message(*id));
        }
    }
}

/// Report actor ids that are unknown or not actors.
///
/// `people` maps each resolved person id to its specialization.
pub fn check_actors(
    requested: &[DbId],
    people: &HashMap<DbId, Specialization>,
    errors: &mut FieldErrors,
) {
    for id in requested {
        check_role("actors", *id, Specialization::Actor, people, errors);
    }
}

/// Report a director id that is unknown or not a director.
pub fn check_director(
    requested: DbId,
    people: &HashMap<DbId, Specialization>,
    errors: &mut FieldErrors,
) {
    check_role("director", requested, Specialization::Director, people, errors);
}

fn check_role(
    field: &str,
    id: DbId,
    role: Specialization,
    people: &HashMap<DbId, Specialization>,
    errors: &mut FieldErrors,
) {
    match people.get(&id) {
        None => push_field_error(errors, field, missing_pk_message(id)),
        Some(spec) if *spec != role => push_field_error(errors, field, wrong_role_message(role, id)),
        Some(_) => {}
    }
}

/// Report a negative `duration` or `year`.
pub fn check_non_negative(field: &str, value: Option<i32>, errors: &mut FieldErrors) {
    if let Some(v) = value {
        if v < 0 {
            push_field_error(
                errors,
                field,
                "Ensure this value is greater than or equal to 0.",
            );
        }
    }
}

/// Remove repeated ids while keeping first-seen order.
pub fn dedup_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(id) {
            out.push(*id);
        }
    }
    out
}
