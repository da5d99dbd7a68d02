// IDE: This is a cargo-fuzz target, not a normal module
// Run with: cargo fuzz run fuzz_evaluate
// Purpose: evaluate() must never panic and must stay deterministic
#![no_main]

use libfuzzer_sys::fuzz_target;
use smartqr::domain::{Verdict, evaluate};

fuzz_target!(|data: &[u8]| {
    // Lossy decoding still exercises multi-byte and replacement characters
    let input = String::from_utf8_lossy(data).to_string();

    let first = evaluate(&input);
    let second = evaluate(&input);
    assert_eq!(first, second);
    assert_eq!(first.accepted, first.reason == Verdict::OK);
});
