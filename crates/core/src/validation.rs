//! Form validation helpers shared by the input DTOs.
//!
//! Inputs derive [`validator::Validate`]; [`check`] flattens the resulting
//! error map into a single [`CoreError::Validation`] message so callers can
//! surface it as-is.

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;
use crate::types::Date;

/// Validate `input`, mapping failures to [`CoreError::Validation`].
pub fn check<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(describe(&errors)))
}

/// Render validation errors as `field: message; field: message`, sorted by
/// field name so the output is stable.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                if field == "__all__" {
                    message
                } else {
                    format!("{field}: {message}")
                }
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

/// Reject strings that are empty after trimming.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed("is required")));
    }
    Ok(())
}

/// Reject a date range whose start is after its end. Open ranges pass.
pub fn date_order(start: Option<Date>, end: Option<Date>) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(ValidationError::new("date_order")
            .with_message(Cow::Owned(format!(
                "start date {start} is after end date {end}"
            )))),
        _ => Ok(()),
    }
}
