//! Interactive validation state for one template.

use crate::engine::{get_validation_rules, validate_all_inputs_with, validate_input_field};
use crate::types::{token_for_field_name, ValidationError, ValidationState};
use phaseforge_core::{BuilderConfig, GlobalInputs, InputScope};

/// Holds the template being edited and the last validation result.
///
/// The host recomputes by calling [`validate_all`](Self::validate_all)
/// whenever the template or either scope changes.
#[derive(Debug, Clone)]
pub struct ValidationSession {
    template: String,
    config: BuilderConfig,
    state: ValidationState,
}

impl ValidationSession {
    pub fn new(template: impl Into<String>, config: BuilderConfig) -> Self {
        Self {
            template: template.into(),
            config,
            state: ValidationState::default(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Swap the template. The previous result no longer applies and is reset.
    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
        self.state = ValidationState::default();
    }

    pub fn state(&self) -> &ValidationState {
        &self.state
    }

    /// Full pass over the template. Replaces the stored state.
    pub fn validate_all(&mut self, global: &GlobalInputs, phase: &InputScope) -> &ValidationState {
        let global_scope = global.to_scope(&self.config);
        self.state = validate_all_inputs_with(&self.template, &global_scope, phase, &self.config);
        &self.state
    }

    /// Check one form field. Does not touch the stored state.
    pub fn validate_input(&self, field: &str, value: &str) -> Vec<ValidationError> {
        let token = token_for_field_name(field);
        let is_required = get_validation_rules(&self.template)
            .iter()
            .any(|rule| rule.token == token && rule.required);
        validate_input_field(field, value, &token, is_required)
    }

    /// Drop one field's errors, or everything when `field` is `None`.
    pub fn clear_validation(&mut self, field: Option<&str>) {
        match field {
            Some(field) => self.state.clear_field(field),
            None => self.state = ValidationState::default(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
