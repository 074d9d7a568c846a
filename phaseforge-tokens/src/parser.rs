//! Token extraction
//!
//! Finds `[NAME]` references in a template. Offsets are character offsets,
//! so callers can map them straight onto an editor buffer.

use once_cell::sync::Lazy;
use phaseforge_core::TokenParseError;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Extraction pattern. Letters of either case and underscores, no digits.
static EXTRACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([A-Za-z_]+)\]").expect("Invalid extract regex"));

/// Any bracketed span without nested brackets.
static SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\[\]]+)\]").expect("Invalid span regex"));

/// An opening bracket that runs to the end of the template.
static UNCLOSED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[A-Z_]*$").expect("Invalid unclosed regex"));

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z_][A-Z0-9_]*$").expect("Invalid name regex"));

/// Uppercase references, the ones that can be substituted or required.
///
/// Same shape as the extraction pattern restricted to uppercase: a name
/// with a digit or a lowercase letter is never a reference.
pub static REFERENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([A-Z_]+)\]").expect("Invalid reference regex"));

/// One occurrence of a token reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPosition {
    /// Offset of the opening bracket
    pub start: usize,
    /// Offset just past the closing bracket
    pub end: usize,
    /// Matched text including brackets
    pub token: String,
}

impl TokenPosition {
    /// The name between the brackets.
    pub fn name(&self) -> &str {
        self.token
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .unwrap_or(&self.token)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenParseResult {
    /// Distinct names in first-seen order
    pub tokens: Vec<String>,
    /// Every occurrence, in template order
    pub positions: Vec<TokenPosition>,
    pub has_unclosed_tokens: bool,
    pub has_invalid_tokens: bool,
}

impl TokenParseResult {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Extract every token reference from `template`.
///
/// Never fails. Malformed input only sets the diagnostic flags.
pub fn parse_tokens(template: &str) -> TokenParseResult {
    if template.is_empty() {
        return TokenParseResult::default();
    }

    let mut result = TokenParseResult::default();
    let mut chars_before = 0usize;
    let mut last_byte = 0usize;

    for caps in EXTRACT_RE.captures_iter(template) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        chars_before += template[last_byte..whole.start()].chars().count();
        let len = whole.as_str().chars().count();
        last_byte = whole.end();

        result.positions.push(TokenPosition {
            start: chars_before,
            end: chars_before + len,
            token: whole.as_str().to_string(),
        });
        chars_before += len;

        let name = inner.as_str();
        if !result.tokens.iter().any(|t| t == name) {
            result.tokens.push(name.to_string());
        }
    }

    result.has_unclosed_tokens = UNCLOSED_RE.is_match(template);
    result.has_invalid_tokens = SPAN_RE
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .any(|inner| !inner.as_str().chars().all(is_name_char));

    tracing::trace!(
        tokens = result.tokens.len(),
        occurrences = result.positions.len(),
        unclosed = result.has_unclosed_tokens,
        invalid = result.has_invalid_tokens,
        "parsed template"
    );

    result
}

/// Like [`parse_tokens`], but an unclosed or malformed reference is an error.
///
/// The error carries the character offset of the first offending bracket.
pub fn parse_tokens_checked(template: &str) -> Result<TokenParseResult, TokenParseError> {
    let result = parse_tokens(template);

    if result.has_invalid_tokens {
        let bad = SPAN_RE
            .captures_iter(template)
            .filter_map(|caps| caps.get(0).zip(caps.get(1)))
            .find(|(_, inner)| !inner.as_str().chars().all(is_name_char));
        if let Some((span, _)) = bad {
            return Err(TokenParseError::new("Invalid token format", template)
                .with_position(char_offset(template, span.start()))
                .with_token(span.as_str()));
        }
    }

    if result.has_unclosed_tokens {
        if let Some(open) = UNCLOSED_RE.find(template) {
            return Err(TokenParseError::new("Unclosed token", template)
                .with_position(char_offset(template, open.start()))
                .with_token(open.as_str()));
        }
    }

    Ok(result)
}

/// Whether `name` follows the token grammar: uppercase letters, digits and
/// underscores, not starting with a digit.
pub fn is_valid_token_format(name: &str) -> bool {
    NAME_RE.is_match(name)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'
}

fn char_offset(s: &str, byte_offset: usize) -> usize {
    s[..byte_offset].chars().count()
}

// =============================================================================
// TESTS
// =============================================================================
