//! PhaseForge Render - Token Replacement
//!
//! Substitutes `[TOKEN]` references with values from the merged input
//! scopes. Unresolved references stay in the output verbatim and are listed
//! in the [`ReplacementResult`]; rendering never fails.

pub mod engine;
pub mod replacer;
pub mod result;

pub use engine::{merge_scopes, replace_tokens, replace_with_result};
pub use replacer::Replacer;
pub use result::{ReplacementResult, TokenCheck};
