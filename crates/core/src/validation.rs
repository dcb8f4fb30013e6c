//! Field-level validation helpers shared by the write DTOs.

use validator::{ValidationError, ValidationErrors};

use crate::error::{push_field_error, CoreError, FieldErrors};

/// Reject strings that are empty or contain only whitespace.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("This field may not be blank.".into());
        return Err(err);
    }
    Ok(())
}

/// Flatten `validator` output into the field map used by error responses.
///
/// Errors without an explicit message fall back to their validator code.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        for err in errs.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value ({}).", err.code));
            push_field_error(&mut out, &field, message);
        }
    }
    out
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::FieldValidation(field_errors(&errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_whitespace_are_rejected() {
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("Drama").is_ok());
    }

    #[test]
    fn validator_errors_are_flattened_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("name", not_blank(" ").unwrap_err());
        errors.add("name", ValidationError::new("length"));

        let fields = field_errors(&errors);
        assert_eq!(
            fields["name"],
            vec![
                "This field may not be blank.".to_string(),
                "Invalid value (length).".to_string()
            ]
        );
    }
}
