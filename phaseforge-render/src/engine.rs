//! Substitution over a merged input map

use crate::result::ReplacementResult;
use phaseforge_core::InputScope;
use phaseforge_tokens::REFERENCE_RE;
use regex::Captures;

/// Global scope overlaid with the phase scope.
///
/// Phase values win on collision, except that an empty phase value leaves a
/// non-empty global value in place. Keys keep global order, then any keys
/// only the phase scope has.
pub fn merge_scopes(global: &InputScope, phase: &InputScope) -> InputScope {
    let mut merged = global.clone();
    for (key, value) in phase {
        let keep_global = value.is_empty() && global.get(key).is_some_and(|g| !g.is_empty());
        if !keep_global {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Render `template`, leaving unresolved references in place.
pub fn replace_tokens(template: &str, combined: &InputScope) -> String {
    replace_with_result(template, combined).rendered_template
}

/// Render `template` and report which tokens resolved.
///
/// An empty value counts as unresolved. Every occurrence of a name gets the
/// same value; the reporting lists hold each name once.
pub fn replace_with_result(template: &str, combined: &InputScope) -> ReplacementResult {
    let mut replaced: Vec<String> = Vec::new();
    let mut unreplaced: Vec<String> = Vec::new();

    let rendered = REFERENCE_RE.replace_all(template, |caps: &Captures<'_>| {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        let name = caps.get(1).map_or("", |m| m.as_str());

        match combined.get(name).filter(|v| !v.is_empty()) {
            Some(value) => {
                push_unique(&mut replaced, name);
                value.clone()
            }
            None => {
                tracing::trace!(token = name, "left unresolved");
                push_unique(&mut unreplaced, name);
                whole.to_string()
            }
        }
    });

    tracing::debug!(
        replaced = replaced.len(),
        unreplaced = unreplaced.len(),
        "rendered template"
    );

    ReplacementResult::new(template, rendered.into_owned(), replaced, unreplaced)
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|t| t == name) {
        list.push(name.to_string());
    }
}

// =============================================================================
// TESTS
// =============================================================================
