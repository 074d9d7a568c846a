//! Fuzz target for the token scanner
//!
//! Run with: cargo +nightly fuzz run parser_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use phaseforge_tokens::{parse_tokens, parse_tokens_checked};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let result = parse_tokens(input);
        let char_len = input.chars().count();

        for pos in &result.positions {
            assert!(pos.start < pos.end, "empty token span");
            assert!(pos.end <= char_len, "span past end of input");
            assert!(result.tokens.iter().any(|t| t == pos.name()));
        }
        assert!(result.tokens.len() <= result.positions.len());

        // The checked scan only fails when the flags say so
        if parse_tokens_checked(input).is_err() {
            assert!(result.has_invalid_tokens || result.has_unclosed_tokens);
        }
    }
});
