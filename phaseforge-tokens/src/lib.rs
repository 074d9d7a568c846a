//! PhaseForge Tokens - Parsing and Analysis
//!
//! A template references inputs as `[TOKEN_NAME]`. This crate finds those
//! references, decides which input scope owns each one, and compares the
//! template against the scopes to find missing and unused inputs.

pub mod analyzer;
pub mod classifier;
pub mod parser;

pub use analyzer::{analyze_tokens, is_missing, TokenAnalysis};
pub use classifier::classify;
pub use parser::{
    is_valid_token_format, parse_tokens, parse_tokens_checked, TokenParseResult, TokenPosition,
    REFERENCE_RE,
};
