//! Validation records
//!
//! Records are transient. Every validation pass builds a fresh
//! [`ValidationState`]; nothing here is updated in place by the engine.

use phaseforge_core::{DATE_ISO, FEATURE_NAME, FEATURE_SLUG, OWNER, PROJECT_NAME, REPO_URL, REQUIREMENTS, STACK};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationErrorKind {
    #[default]
    Required,
    Format,
    Custom,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorKind::Required => "required",
            ValidationErrorKind::Format => "format",
            ValidationErrorKind::Custom => "custom",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationWarningKind {
    #[default]
    Suggestion,
    Deprecation,
}

impl ValidationWarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationWarningKind::Suggestion => "suggestion",
            ValidationWarningKind::Deprecation => "deprecation",
        }
    }
}

impl fmt::Display for ValidationWarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A blocking problem with one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub token: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        token: impl Into<String>,
        message: impl Into<String>,
        kind: ValidationErrorKind,
    ) -> Self {
        Self {
            field: field.into(),
            token: token.into(),
            message: message.into(),
            kind,
        }
    }

    pub fn required(field: impl Into<String>, token: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, token, message, ValidationErrorKind::Required)
    }
}

/// Informational only; never blocks rendering or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub field: String,
    pub token: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ValidationWarningKind,
}

impl ValidationWarning {
    pub fn suggestion(field: impl Into<String>, token: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            token: token.into(),
            message: message.into(),
            kind: ValidationWarningKind::Suggestion,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationState {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl Default for ValidationState {
    fn default() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl ValidationState {
    /// Build a state whose validity follows from `errors`.
    pub fn from_parts(errors: Vec<ValidationError>, warnings: Vec<ValidationWarning>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// First error message for `field`, if any.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has_field_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Fields with at least one error, each once, in first-error order.
    pub fn fields_with_errors(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for error in &self.errors {
            if !fields.contains(&error.field.as_str()) {
                fields.push(error.field.as_str());
            }
        }
        fields
    }

    /// Drop every error for `field` and recompute validity.
    pub fn clear_field(&mut self, field: &str) {
        self.errors.retain(|e| e.field != field);
        self.is_valid = self.errors.is_empty();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    pub token: String,
    pub required: bool,
    pub message: String,
}

/// Form field names of the global inputs, keyed by token.
const GLOBAL_FIELD_NAMES: [(&str, &str); 8] = [
    (PROJECT_NAME, "project-name"),
    (FEATURE_NAME, "feature-name"),
    (FEATURE_SLUG, "feature-slug"),
    (OWNER, "owner"),
    (REPO_URL, "repo-url"),
    (STACK, "stack"),
    (DATE_ISO, "date"),
    (REQUIREMENTS, "requirements"),
];

/// Form field name for a token: the fixed table, else lowercase kebab case.
pub fn field_name_for_token(token: &str) -> String {
    GLOBAL_FIELD_NAMES
        .iter()
        .find(|(t, _)| *t == token)
        .map(|(_, f)| f.to_string())
        .unwrap_or_else(|| token.to_lowercase().replace('_', "-"))
}

/// Token for a form field name: the fixed table in reverse, else uppercase
/// with `-` turned into `_`. Phase field names map back to their token.
pub fn token_for_field_name(field: &str) -> String {
    if let Some(token) = field.strip_prefix(PHASE_FIELD_PREFIX) {
        return token.to_string();
    }
    GLOBAL_FIELD_NAMES
        .iter()
        .find(|(_, f)| *f == field)
        .map(|(t, _)| t.to_string())
        .unwrap_or_else(|| field.replace('-', "_").to_uppercase())
}

/// Field name used for a phase-scope input.
pub fn phase_field_name(token: &str) -> String {
    format!("{PHASE_FIELD_PREFIX}{token}")
}

const PHASE_FIELD_PREFIX: &str = "phase-input-";

// =============================================================================
// TESTS
// =============================================================================
