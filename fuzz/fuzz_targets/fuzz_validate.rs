//! Fuzz target for card validation.
//!
//! Tests that the validator never panics and that the report always agrees
//! with the boolean verdict.

#![no_main]

use arbitrary::Arbitrary;
use cardcheck::{classify, validate_number, CardInput, CardValidator, ReferenceDate};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzCard {
    number: Option<String>,
    exp_month: Option<i32>,
    exp_year: Option<i32>,
    cvc: Option<String>,
    reference_year: u16,
    reference_month: u8,
}

fuzz_target!(|card: FuzzCard| {
    let Ok(today) = ReferenceDate::new(
        i32::from(card.reference_year),
        i32::from(card.reference_month % 12) + 1,
    ) else {
        return;
    };

    if let Some(number) = card.number.as_deref() {
        let _ = classify(number);
        let _ = validate_number(number);
    }

    let input = CardInput {
        number: card.number,
        exp_month: card.exp_month,
        exp_year: card.exp_year,
        cvc: card.cvc,
    };
    let validator = CardValidator::new(&input, today);

    let report = validator.report();
    assert_eq!(report.is_valid(), validator.validate_all(), "report disagrees");
    let _ = format!("{:?} {}", validator, report);
});
