use crate::engine::{merge_scopes, replace_with_result};
use crate::result::{ReplacementResult, TokenCheck};
use phaseforge_core::{BuilderConfig, GlobalInputs, InputScope};
use phaseforge_tokens::{classify, REFERENCE_RE};

/// Renders templates for one pair of scopes.
///
/// Keeps the scopes apart so each replaced token can be labelled by
/// [`classify`], which checks global keys first.
#[derive(Debug, Clone)]
pub struct Replacer {
    global: InputScope,
    phase: InputScope,
    merged: InputScope,
}

impl Replacer {
    pub fn new(global: InputScope, phase: InputScope) -> Self {
        let merged = merge_scopes(&global, &phase);
        Self { global, phase, merged }
    }

    pub fn from_inputs(global: &GlobalInputs, phase: InputScope, config: &BuilderConfig) -> Self {
        Self::new(global.to_scope(config), phase)
    }

    pub fn combined(&self) -> &InputScope {
        &self.merged
    }

    pub fn replace(&self, template: &str) -> String {
        self.replace_with_result(template).rendered_template
    }

    /// Render and label each replaced token with its classifier kind. A phase
    /// value that overrides a global key is still labelled `Global`.
    pub fn replace_with_result(&self, template: &str) -> ReplacementResult {
        let mut result = replace_with_result(template, &self.merged);
        result.provenance = result
            .replaced_tokens
            .iter()
            .map(|t| (t.clone(), classify(t, &self.global, &self.phase)))
            .collect();
        result
    }

    /// Merged key set: global keys, then keys only the phase scope has.
    pub fn available_tokens(&self) -> Vec<&str> {
        self.merged.keys().map(String::as_str).collect()
    }

    /// Referenced tokens with no key in either scope. Empty values count as
    /// present here.
    pub fn validate_tokens(&self, template: &str) -> TokenCheck {
        let mut missing_tokens: Vec<String> = Vec::new();
        for caps in REFERENCE_RE.captures_iter(template) {
            let Some(name) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            if !self.merged.contains_key(name) && !missing_tokens.iter().any(|t| t == name) {
                missing_tokens.push(name.to_string());
            }
        }
        TokenCheck {
            valid: missing_tokens.is_empty(),
            missing_tokens,
        }
    }
}
