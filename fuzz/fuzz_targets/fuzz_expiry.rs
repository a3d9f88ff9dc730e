//! Fuzz target for expiry date parsing.
//!
//! Tests that expiry parsing never panics on arbitrary input.

#![no_main]

use cardcheck::expiry::{self, ReferenceDate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(today) = ReferenceDate::new(2024, 6) else {
        return;
    };

    // These should never panic
    let _ = data.parse::<ReferenceDate>();
    let _ = expiry::validate_expiry(data, today);

    // If parsing succeeds, test other methods
    if let Ok(exp) = expiry::parse_expiry(data, today) {
        assert!((1..=12).contains(&exp.month()));
        let _ = exp.is_expired(today);
        let _ = exp.months_until_expiry(today);
        let _ = exp.format_short();
        let _ = exp.format_long();
        let _ = exp.to_string();
    }
});
