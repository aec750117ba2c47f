use std::collections::BTreeMap;

use crate::error::AppError;

/// Per-field validation messages for a submitted form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// Record `message` for `field`; the first message per field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Collapse into a single API validation error.
    pub fn into_app_error(self) -> AppError {
        let message = self
            .0
            .into_iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect::<Vec<_>>()
            .join("; ");
        AppError::Validation(message)
    }
}

/// Validate a trimmed name (1-`max` Unicode characters).
pub fn validate_name(name: &str, max: usize) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > max {
        return Err(format!("Name must be 1-{max} characters"));
    }
    Ok(())
}
