use std::collections::BTreeMap;

use crate::types::DbId;

/// Field name mapped to the messages reported for that field.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed for: {}", field_list(.0))]
    FieldValidation(FieldErrors),

    #[error("Invalid value '{value}' for query parameter '{param}'")]
    InvalidFilterValue { param: String, value: String },
}

impl CoreError {
    /// Build a field validation error carrying a single message.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        CoreError::FieldValidation(errors)
    }

    /// Turn an accumulated error map into a result; an empty map is success.
    pub fn check_fields(errors: FieldErrors) -> Result<(), CoreError> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::FieldValidation(errors))
        }
    }
}

fn field_list(errors: &FieldErrors) -> String {
    errors.keys().cloned().collect::<Vec<_>>().join(", ")
}

/// Append a message to the entry for `field`.
pub fn push_field_error(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}
