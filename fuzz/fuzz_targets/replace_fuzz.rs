//! Fuzz target for token replacement
//!
//! The first line of the input is the template; every later `KEY=value`
//! line becomes a scope entry.
//!
//! Run with: cargo +nightly fuzz run replace_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use phaseforge_core::InputScope;
use phaseforge_render::{replace_tokens, replace_with_result};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let mut lines = input.lines();
        let template = lines.next().unwrap_or_default();
        let scope: InputScope = lines
            .filter_map(|line| line.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let result = replace_with_result(template, &scope);
        assert_eq!(result.rendered_template, replace_tokens(template, &scope));
        assert_eq!(result.is_valid, result.unreplaced_tokens.is_empty());
        for token in &result.replaced_tokens {
            assert!(!result.unreplaced_tokens.contains(token));
        }
    }
});
