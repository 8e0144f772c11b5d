//! Validation result types
//!
//! Defines result structures returned by field and form validation.

use std::collections::BTreeMap;

use crate::error::ValidationError;

/// Verdict for a single field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldVerdict {
    pub valid: bool,
    pub message: Option<String>,
}

impl FieldVerdict {
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Aggregated verdict for a whole form submission. First failure wins per
/// field.
#[derive(Debug, Clone, Default)]
pub struct FormReport {
    violations: Vec<ValidationError>,
}

impl FormReport {
    pub fn valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn record(&mut self, field: &str, verdict: FieldVerdict) {
        if let Some(message) = verdict.message {
            self.violations.push(ValidationError::new(field, message));
        }
    }

    pub fn violations(&self) -> &[ValidationError] {
        &self.violations
    }

    /// Per-field message map as consumed by the presentation layer.
    pub fn into_field_errors(self) -> BTreeMap<String, String> {
        self.violations
            .into_iter()
            .map(|v| (v.field, v.message))
            .collect()
    }
}
