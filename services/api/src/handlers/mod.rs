pub mod auth;
pub mod fixture;
pub mod team;

use crate::error::{ApiError, FieldViolation};

/// Flatten `validator` output into the wire-level violation list, sorted by
/// field for stable output.
pub(crate) fn validation_error(errors: validator::ValidationErrors) -> ApiError {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| FieldViolation {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    ApiError::Validation(violations)
}

pub(crate) fn violation(field: &str, message: &str) -> FieldViolation {
    FieldViolation {
        field: field.to_string(),
        message: message.to_string(),
    }
}
