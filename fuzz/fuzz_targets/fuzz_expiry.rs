//! Fuzz target for expiry validation.
//!
//! Tests that joint month/year validation never panics on arbitrary input.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use card_form::expiry::{validate_expiration, YearMonth};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    month: &'a str,
    year: &'a str,
    today_year: u16,
    today_month: u8,
}

fuzz_target!(|input: Input<'_>| {
    let Some(today) = YearMonth::new(input.today_year, input.today_month % 12 + 1) else {
        return;
    };

    // If validation succeeds, test other methods
    if let Ok(exp) = validate_expiration(input.month, input.year, today) {
        assert!((1..=12).contains(&exp.month()));
        assert!(!exp.is_expired_at(today));
        let _ = exp.months_until_expiry(today);
        let _ = exp.format_short();
    }
});
