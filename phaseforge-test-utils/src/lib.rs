//! PhaseForge Test Utilities
//!
//! Shared test infrastructure for the workspace:
//! - Proptest generators for token names, templates and scopes
//! - Fixtures for common input sets
//! - Tracing setup for tests

pub use phaseforge_core::{
    BuilderConfig, GlobalInputs, InputScope, PackageManager, PhaseCatalog, PhaseId, ViewKind,
};

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber that writes through the test harness.
///
/// Honours `RUST_LOG`; defaults to debug output for the workspace crates.
/// Safe to call from every test.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("phaseforge=debug,warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for templates and input scopes.

    use super::*;
    use proptest::prelude::*;

    /// Any name accepted by the token grammar.
    pub fn arb_token_name() -> impl Strategy<Value = String> {
        "[A-Z_][A-Z0-9_]{0,15}"
    }

    /// Names without digits, so every reference parses as a token.
    pub fn arb_letter_token_name() -> impl Strategy<Value = String> {
        "[A-Z_]{1,12}"
    }

    /// Non-blank value with no brackets.
    pub fn arb_value() -> impl Strategy<Value = String> {
        "[a-z][a-zA-Z0-9 .,:-]{0,23}"
    }

    /// Value that may be empty or whitespace only.
    pub fn arb_maybe_blank_value() -> impl Strategy<Value = String> {
        prop_oneof![
            3 => arb_value(),
            1 => Just(String::new()),
            1 => Just("   ".to_string()),
        ]
    }

    /// Text with no brackets at all.
    pub fn arb_plain_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,:\n-]{0,24}"
    }

    /// Template mixing plain text, well-formed references and stray brackets.
    pub fn arb_template() -> impl Strategy<Value = String> {
        let segment = prop_oneof![
            4 => arb_plain_text(),
            3 => arb_letter_token_name().prop_map(|n| format!("[{n}]")),
            1 => arb_token_name().prop_map(|n| format!("[{n}]")),
            1 => "[a-z ]{1,6}".prop_map(|s| format!("[{s}]")),
            1 => Just("[".to_string()),
        ];
        prop::collection::vec(segment, 0..12).prop_map(|parts| parts.concat())
    }

    /// Template built only from plain text and the given names.
    pub fn arb_template_over(names: Vec<String>) -> impl Strategy<Value = String> {
        let name = prop::sample::select(names).prop_map(|n| format!("[{n}]"));
        let segment = prop_oneof![arb_plain_text(), name];
        prop::collection::vec(segment, 1..10).prop_map(|parts| parts.concat())
    }

    pub fn arb_scope() -> impl Strategy<Value = InputScope> {
        prop::collection::vec((arb_letter_token_name(), arb_maybe_blank_value()), 0..6)
            .prop_map(|pairs| pairs.into_iter().collect())
    }

    /// Scope whose every value is non-blank.
    pub fn arb_filled_scope() -> impl Strategy<Value = InputScope> {
        prop::collection::vec((arb_letter_token_name(), arb_value()), 1..6)
            .prop_map(|pairs| pairs.into_iter().collect())
    }

    pub fn arb_package_manager() -> impl Strategy<Value = PackageManager> {
        prop_oneof![
            Just(PackageManager::Npm),
            Just(PackageManager::Pnpm),
            Just(PackageManager::Yarn),
        ]
    }

    pub fn arb_global_inputs() -> impl Strategy<Value = GlobalInputs> {
        (
            arb_maybe_blank_value(),
            arb_maybe_blank_value(),
            arb_maybe_blank_value(),
            arb_maybe_blank_value(),
            arb_package_manager(),
            any::<bool>(),
        )
            .prop_map(
                |(project_name, feature_name, feature_slug, requirements, package_manager, is_monorepo)| {
                    GlobalInputs {
                        project_name,
                        feature_name,
                        feature_slug,
                        requirements,
                        package_manager,
                        is_monorepo,
                        ..GlobalInputs::default()
                    }
                },
            )
    }

    pub fn arb_phase_id() -> impl Strategy<Value = PhaseId> {
        let all: Vec<PhaseId> = ViewKind::all()
            .into_iter()
            .flat_map(|v| v.phase_ids())
            .collect();
        prop::sample::select(all)
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built inputs for common scenarios.

    use super::*;

    /// Build a scope from literal pairs, keeping their order.
    pub fn scope(pairs: &[(&str, &str)]) -> InputScope {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Fully populated global inputs for a small pnpm monorepo.
    pub fn acme_global_inputs() -> GlobalInputs {
        GlobalInputs {
            project_name: "Acme".to_string(),
            feature_name: "Checkout".to_string(),
            feature_slug: "checkout".to_string(),
            requirements: "Users can pay with a saved card".to_string(),
            ..GlobalInputs::default()
        }
    }

    pub fn acme_global_scope() -> InputScope {
        acme_global_inputs().to_scope(&BuilderConfig::default())
    }

    pub fn builtin_catalog() -> PhaseCatalog {
        match PhaseCatalog::builtin() {
            Ok(catalog) => catalog,
            Err(e) => panic!("builtin catalog failed to load: {e}"),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
