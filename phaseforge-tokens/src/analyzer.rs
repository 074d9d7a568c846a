//! Token analysis against the two input scopes

use crate::parser::parse_tokens;
use phaseforge_core::{is_blank, InputScope};
use serde::{Deserialize, Serialize};

/// What a template needs versus what the scopes provide.
///
/// Recomputed on every call. Lists of template names are deduplicated;
/// `available_tokens` keeps a name twice when both scopes define it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAnalysis {
    pub tokens: Vec<String>,
    /// Referenced names with no key in either scope
    pub required_tokens: Vec<String>,
    pub available_tokens: Vec<String>,
    /// Referenced names whose value is absent or blank in both scopes
    pub missing_tokens: Vec<String>,
    pub unused_tokens: Vec<String>,
}

impl TokenAnalysis {
    pub fn is_complete(&self) -> bool {
        self.missing_tokens.is_empty()
    }
}

/// Whether `name` has no usable value in either scope.
pub fn is_missing(name: &str, global: &InputScope, phase: &InputScope) -> bool {
    is_blank(global.get(name).map(String::as_str)) && is_blank(phase.get(name).map(String::as_str))
}

pub fn analyze_tokens(template: &str, global: &InputScope, phase: &InputScope) -> TokenAnalysis {
    let tokens = parse_tokens(template).tokens;

    let available_tokens: Vec<String> = global.keys().chain(phase.keys()).cloned().collect();

    let required_tokens: Vec<String> = tokens
        .iter()
        .filter(|t| !global.contains_key(t.as_str()) && !phase.contains_key(t.as_str()))
        .cloned()
        .collect();

    let missing_tokens: Vec<String> = tokens
        .iter()
        .filter(|t| is_missing(t, global, phase))
        .cloned()
        .collect();

    let unused_tokens: Vec<String> = available_tokens
        .iter()
        .filter(|t| !tokens.contains(t))
        .cloned()
        .collect();

    tracing::debug!(
        tokens = tokens.len(),
        required = required_tokens.len(),
        missing = missing_tokens.len(),
        unused = unused_tokens.len(),
        "analyzed template"
    );

    TokenAnalysis {
        tokens,
        required_tokens,
        available_tokens,
        missing_tokens,
        unused_tokens,
    }
}

// =============================================================================
// TESTS
// =============================================================================
