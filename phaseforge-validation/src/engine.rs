//! Template-driven validation
//!
//! All functions take the global scope as built by
//! [`GlobalInputs::to_scope`](phaseforge_core::GlobalInputs::to_scope).
//! A token is missing only when every scope that could supply it is blank.

use crate::types::{
    field_name_for_token, phase_field_name, ValidationError, ValidationRule, ValidationState,
    ValidationWarning,
};
use phaseforge_core::{BuilderConfig, InputScope, TokenKind};
use phaseforge_tokens::{analyze_tokens, classify, is_missing, is_valid_token_format, parse_tokens};

/// Errors for referenced tokens owned by the global scope or by no scope.
pub fn validate_global_inputs(
    global: &InputScope,
    template: &str,
    phase: &InputScope,
) -> Vec<ValidationError> {
    let analysis = analyze_tokens(template, global, phase);

    analysis
        .tokens
        .iter()
        .filter(|token| is_valid_token_format(token))
        .filter(|token| {
            matches!(
                classify(token, global, phase),
                TokenKind::Global | TokenKind::Custom
            )
        })
        .filter(|token| is_missing(token, global, phase))
        .map(|token| global_error(token))
        .collect()
}

/// Errors for missing tokens the global scope has no key for.
pub fn validate_phase_inputs(
    phase: &InputScope,
    template: &str,
    global: &InputScope,
) -> Vec<ValidationError> {
    let analysis = analyze_tokens(template, global, phase);

    analysis
        .missing_tokens
        .iter()
        .filter(|token| is_valid_token_format(token))
        .filter(|token| !global.contains_key(token.as_str()))
        .map(|token| phase_error(token))
        .collect()
}

pub fn validate_all_inputs(template: &str, global: &InputScope, phase: &InputScope) -> ValidationState {
    validate_all_inputs_with(template, global, phase, &BuilderConfig::default())
}

/// Combined pass: one error per missing token, plus unused-input warnings
/// when the config asks for them.
pub fn validate_all_inputs_with(
    template: &str,
    global: &InputScope,
    phase: &InputScope,
    config: &BuilderConfig,
) -> ValidationState {
    // Tokens without a global key are reported once, by the phase check
    let mut errors: Vec<ValidationError> = validate_global_inputs(global, template, phase)
        .into_iter()
        .filter(|e| global.contains_key(&e.token))
        .collect();
    errors.extend(validate_phase_inputs(phase, template, global));

    let mut warnings = Vec::new();
    if config.warn_unused_phase_inputs {
        let analysis = analyze_tokens(template, global, phase);
        for token in &analysis.unused_tokens {
            let phase_only = phase.contains_key(token) && !global.contains_key(token);
            if phase_only && !warnings.iter().any(|w: &ValidationWarning| &w.token == token) {
                warnings.push(ValidationWarning::suggestion(
                    format!("unused-input-{token}"),
                    token.clone(),
                    format!("Input \"{token}\" is defined but not used in the current template."),
                ));
            }
        }
    }

    tracing::debug!(
        errors = errors.len(),
        warnings = warnings.len(),
        "validated template inputs"
    );

    ValidationState::from_parts(errors, warnings)
}

/// Single-field check used while the user types.
pub fn validate_input_field(field: &str, value: &str, token: &str, is_required: bool) -> Vec<ValidationError> {
    if is_required && value.trim().is_empty() {
        vec![ValidationError::required(
            field,
            token,
            format!("Required input cannot be empty: {token}. Please provide a value."),
        )]
    } else {
        Vec::new()
    }
}

/// Every referenced token is required; templates cannot mark one optional.
pub fn get_validation_rules(template: &str) -> Vec<ValidationRule> {
    parse_tokens(template)
        .tokens
        .into_iter()
        .map(|token| ValidationRule {
            message: format!("Input \"{token}\" is required for this template."),
            token,
            required: true,
        })
        .collect()
}

fn global_error(token: &str) -> ValidationError {
    let field = field_name_for_token(token);
    let message = format!("Missing required input: {token}. Please provide a value for {field}.");
    tracing::trace!(token, field = %field, "missing global input");
    ValidationError::required(field, token, message)
}

fn phase_error(token: &str) -> ValidationError {
    tracing::trace!(token, "missing phase input");
    ValidationError::required(
        phase_field_name(token),
        token,
        format!("Missing required input: {token}. Please provide a value for this phase-specific input."),
    )
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValidationErrorKind;
    use phaseforge_core::GlobalInputs;

    fn scope(pairs: &[(&str, &str)]) -> InputScope {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn empty_global() -> InputScope {
        GlobalInputs::default().to_scope(&BuilderConfig::default())
    }

    #[test]
    fn test_blank_global_reported_under_field_name() {
        let errors = validate_global_inputs(&empty_global(), "Hi [PROJECT_NAME]", &InputScope::new());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "project-name");
        assert_eq!(errors[0].token, "PROJECT_NAME");
        assert_eq!(
            errors[0].message,
            "Missing required input: PROJECT_NAME. Please provide a value for project-name."
        );
        assert_eq!(errors[0].kind, ValidationErrorKind::Required);
    }

    #[test]
    fn test_global_checks_custom_tokens_too() {
        let errors = validate_global_inputs(&empty_global(), "[API_ENDPOINT]", &InputScope::new());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "api-endpoint");
    }

    #[test]
    fn test_phase_key_is_not_global_concern() {
        let phase = scope(&[("API_ENDPOINT", "")]);
        let errors = validate_global_inputs(&empty_global(), "[API_ENDPOINT]", &phase);
        assert!(errors.is_empty());

        let errors = validate_phase_inputs(&phase, "[API_ENDPOINT]", &empty_global());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "phase-input-API_ENDPOINT");
        assert_eq!(
            errors[0].message,
            "Missing required input: API_ENDPOINT. Please provide a value for this phase-specific input."
        );
    }

    #[test]
    fn test_phase_value_satisfies_blank_global() {
        let global = scope(&[("PROJECT_NAME", "")]);
        let phase = scope(&[("PROJECT_NAME", "Override")]);
        let state = validate_all_inputs("[PROJECT_NAME]", &global, &phase);
        assert!(state.is_valid);
    }

    #[test]
    fn test_all_inputs_reports_each_token_once() {
        let global = scope(&[("PROJECT_NAME", "")]);
        let state = validate_all_inputs("[PROJECT_NAME] [NEW_THING] [PROJECT_NAME]", &global, &InputScope::new());
        let fields = state.fields_with_errors();
        assert_eq!(fields, vec!["project-name", "phase-input-NEW_THING"]);
        assert_eq!(state.errors.len(), 2);
        assert!(!state.is_valid);
    }

    #[test]
    fn test_unused_phase_input_warning() {
        let global = scope(&[("PROJECT_NAME", "Acme"), ("OWNER", "")]);
        let phase = scope(&[("EXTRA", "v"), ("PROJECT_NAME", "dup")]);
        let state = validate_all_inputs("[PROJECT_NAME]", &global, &phase);
        assert!(state.is_valid);
        assert_eq!(state.warnings.len(), 1);
        assert_eq!(state.warnings[0].field, "unused-input-EXTRA");
        assert_eq!(
            state.warnings[0].message,
            "Input \"EXTRA\" is defined but not used in the current template."
        );
    }

    #[test]
    fn test_unused_warnings_can_be_disabled() {
        let config = BuilderConfig {
            warn_unused_phase_inputs: false,
            ..BuilderConfig::default()
        };
        let phase = scope(&[("EXTRA", "v")]);
        let state = validate_all_inputs_with("no tokens", &InputScope::new(), &phase, &config);
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn test_malformed_tokens_never_required() {
        let state = validate_all_inputs("[lowercase] and [Mixed_Case]", &InputScope::new(), &InputScope::new());
        assert!(state.is_valid);
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_empty_template_is_valid() {
        let state = validate_all_inputs("", &empty_global(), &InputScope::new());
        assert_eq!(state, ValidationState::default());
    }

    #[test]
    fn test_input_field() {
        let errors = validate_input_field("owner", "  ", "OWNER", true);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "Required input cannot be empty: OWNER. Please provide a value."
        );
        assert!(validate_input_field("owner", "", "OWNER", false).is_empty());
        assert!(validate_input_field("owner", "x", "OWNER", true).is_empty());
    }

    #[test]
    fn test_rules_one_per_distinct_token() {
        let rules = get_validation_rules("[A] [B] [A]");
        assert_eq!(rules.len(), 2);
        assert!(rules.iter().all(|r| r.required));
        assert_eq!(rules[0].message, "Input \"A\" is required for this template.");
        assert!(get_validation_rules("").is_empty());
    }
}
