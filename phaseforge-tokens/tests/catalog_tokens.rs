//! Token analysis over the built-in phase catalog.

use phaseforge_core::{InputScope, TokenKind, ViewKind};
use phaseforge_test_utils::fixtures::{acme_global_scope, builtin_catalog, scope};
use phaseforge_test_utils::init_test_tracing;
use phaseforge_tokens::{analyze_tokens, classify, parse_tokens};

#[test]
fn builtin_templates_parse_cleanly() {
    init_test_tracing();
    let catalog = builtin_catalog();
    for phase in catalog.iter() {
        let result = parse_tokens(&phase.template);
        assert!(!result.has_unclosed_tokens, "{} has an unclosed token", phase.id);
        assert!(!result.tokens.is_empty(), "{} references no tokens", phase.id);
    }
}

#[test]
fn acme_scope_covers_repo_constraints() {
    let catalog = builtin_catalog();
    let phase = catalog
        .require(ViewKind::Frontend.default_phase())
        .expect("phase 0 present");
    let analysis = analyze_tokens(&phase.template, &acme_global_scope(), &InputScope::new());
    assert!(analysis.is_complete(), "missing: {:?}", analysis.missing_tokens);
}

#[test]
fn backend_phase_needs_phase_inputs() {
    let catalog = builtin_catalog();
    let phase = catalog
        .require(ViewKind::Backend.default_phase())
        .expect("backend phase 0 present");
    let global = acme_global_scope();
    let phase_inputs = scope(&[("API_ENDPOINT", "/v1/orders"), ("UNRELATED", "x")]);

    let analysis = analyze_tokens(&phase.template, &global, &phase_inputs);
    assert!(!analysis.missing_tokens.contains(&"API_ENDPOINT".to_string()));
    assert!(analysis.missing_tokens.contains(&"HTTP_METHOD".to_string()));
    assert!(analysis.unused_tokens.contains(&"UNRELATED".to_string()));
    assert!(!analysis.missing_tokens.contains(&"PROJECT_NAME".to_string()));

    assert_eq!(classify("PROJECT_NAME", &global, &phase_inputs), TokenKind::Global);
    assert_eq!(classify("API_ENDPOINT", &global, &phase_inputs), TokenKind::Phase);
    assert_eq!(classify("HTTP_METHOD", &global, &phase_inputs), TokenKind::Custom);
}

#[test]
fn digit_tokens_are_invisible_to_analysis() {
    let analysis = analyze_tokens("[STEP_1] [BUG_TITLE]", &InputScope::new(), &InputScope::new());
    assert_eq!(analysis.tokens, vec!["BUG_TITLE"]);
}
