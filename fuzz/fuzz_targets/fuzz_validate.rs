//! Fuzz target for field validation.
//!
//! Tests that the field rules never panic and agree with each other.

#![no_main]

use libfuzzer_sys::fuzz_target;
use card_form::{rules, Field};

fuzz_target!(|data: &str| {
    for field in Field::ALL {
        // These should never panic, regardless of input
        let option = rules::validate(field, data);
        let result = rules::validate_field(field, data);
        assert_eq!(option, result.err(), "validate and validate_field disagree");

        // Surrounding whitespace never changes the outcome
        let padded = format!("  {}\t", data);
        assert_eq!(rules::validate(field, &padded), option);
    }
});
