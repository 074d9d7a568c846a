//! Token provenance

use crate::parser::is_valid_token_format;
use phaseforge_core::{InputScope, TokenKind};

/// Decide which scope owns `name`. First match wins:
/// global key, phase key, well-formed name, anything else.
///
/// Only key presence counts; a key with an empty value still owns the name.
pub fn classify(name: &str, global: &InputScope, phase: &InputScope) -> TokenKind {
    if global.contains_key(name) {
        TokenKind::Global
    } else if phase.contains_key(name) {
        TokenKind::Phase
    } else if is_valid_token_format(name) {
        TokenKind::Custom
    } else {
        TokenKind::Unknown
    }
}
