//! Replacement outcome records

use indexmap::IndexMap;
use phaseforge_core::TokenKind;
use phaseforge_validation::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementResult {
    pub original_template: String,
    pub rendered_template: String,
    pub replaced_tokens: Vec<String>,
    pub unreplaced_tokens: Vec<String>,
    pub is_valid: bool,
    /// Reserved for substitution-time errors; nothing fills it yet.
    pub errors: Vec<ValidationError>,
    /// Classifier label of each replaced token (global keys first). This is
    /// not necessarily the scope whose value was substituted. Only filled
    /// when the scopes are known separately, see [`Replacer`](crate::Replacer).
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub provenance: IndexMap<String, TokenKind>,
}

impl ReplacementResult {
    pub fn new(
        original_template: impl Into<String>,
        rendered_template: String,
        replaced_tokens: Vec<String>,
        unreplaced_tokens: Vec<String>,
    ) -> Self {
        Self {
            original_template: original_template.into(),
            rendered_template,
            is_valid: unreplaced_tokens.is_empty(),
            replaced_tokens,
            unreplaced_tokens,
            errors: Vec::new(),
            provenance: IndexMap::new(),
        }
    }
}

/// Which referenced tokens have no key at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCheck {
    pub valid: bool,
    pub missing_tokens: Vec<String>,
}
