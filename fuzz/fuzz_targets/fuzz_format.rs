//! Fuzz target for card number formatting.
//!
//! Tests that formatting functions never panic on arbitrary input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use card_form::format;

fuzz_target!(|data: &str| {
    // These should never panic
    let formatted = format::format_card_number(data);
    let _ = format::split_into_groups(data);

    // Verify roundtrip and idempotence
    let stripped = format::strip_formatting(&formatted);
    let original_digits = format::strip_formatting(data);
    assert_eq!(stripped, original_digits, "Format roundtrip should preserve digits");
    assert_eq!(format::format_card_number(&formatted), formatted, "Format should be idempotent");
});
