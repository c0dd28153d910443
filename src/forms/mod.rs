//! Form definitions backing the client routes.

use std::collections::BTreeMap;

use validator::{ValidationError, ValidationErrors};

pub mod wizard;

/// One helper-text message per invalid field, keyed by field name.
pub type FieldErrors = BTreeMap<String, String>;

/// Raw submitted values keyed by field name, echoed back into the form.
pub type FieldValues = BTreeMap<String, String>;

/// Picks the message to show for each invalid field.
///
/// A "required" failure (`length`) wins over everything else so an empty
/// email reads "Email is required" rather than "Enter a valid email". A
/// "too long" failure wins over format failures.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errors)| {
            let error = errors
                .iter()
                .find(|e| e.code == "length")
                .or_else(|| errors.iter().find(|e| e.code == "too_long"))
                .or_else(|| errors.first())?;
            Some((field.to_string(), message(error)))
        })
        .collect()
}

fn message(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map_or_else(|| error.code.to_string(), ToString::to_string)
}
