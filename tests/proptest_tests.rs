//! Property-based tests using proptest.
//!
//! These tests verify invariants that should hold for all inputs,
//! helping discover edge cases that manual tests might miss.

use cardcheck::{
    classify, cvc, expiry, luhn, mask, normalize, validate_number, CardInput, CardNetwork,
    CardValidator, ReferenceDate,
};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

/// Generates a network that has a prefix table.
fn known_network() -> impl Strategy<Value = CardNetwork> {
    prop::sample::select(CardNetwork::CLASSIFICATION_ORDER.to_vec())
}

/// Builds a Luhn-valid number of the network's length from a prefix and
/// filler digits.
fn build_valid_number(network: CardNetwork, prefix_index: usize, filler: &[u8]) -> String {
    let prefixes = network.prefixes();
    let prefix = prefixes[prefix_index % prefixes.len()];

    let mut digits: Vec<u8> = prefix.bytes().map(|b| b - b'0').collect();
    let body_len = network.number_length() - 1;
    digits.extend(filler.iter().cycle().take(body_len - digits.len()));
    digits.push(luhn::generate_check_digit(&digits));

    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// Generates a valid card number for any known network.
fn valid_card_strategy() -> impl Strategy<Value = (CardNetwork, String)> {
    (
        known_network(),
        any::<usize>(),
        proptest::collection::vec(0u8..=9, 1..16),
    )
        .prop_map(|(network, index, filler)| {
            let number = build_valid_number(network, index, &filler);
            (network, number)
        })
}

/// Generates a random digit string of a length within range.
fn digit_string_range(range: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = String> {
    proptest::collection::vec(prop::char::range('0', '9'), range)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Inserts separators after the first `skip` characters of `card`.
fn card_with_separators(card: String, skip: usize) -> impl Strategy<Value = String> {
    let len = card.len();
    proptest::collection::vec(
        prop_oneof![Just(""), Just(" "), Just("-"), Just("  "), Just(" - ")],
        len + 1,
    )
    .prop_map(move |seps| {
        let mut result = String::new();
        for (i, c) in card.chars().enumerate() {
            if i >= skip {
                result.push_str(seps[i]);
            }
            result.push(c);
        }
        result.push_str(seps[len]);
        result
    })
}

/// Generates an arbitrary card input, valid or not.
fn card_input_strategy() -> impl Strategy<Value = CardInput> {
    (
        prop::option::of(prop_oneof![
            ".*",
            digit_string_range(12..=17),
            valid_card_strategy().prop_map(|(_, n)| n),
        ]),
        prop::option::of(-1i32..=14),
        prop::option::of(prop_oneof![-5i32..=120, 2015i32..=2040]),
        prop::option::of(prop_oneof![".{0,5}", digit_string_range(2..=5)]),
    )
        .prop_map(|(number, exp_month, exp_year, cvc)| CardInput {
            number,
            exp_month,
            exp_year,
            cvc,
        })
}

fn reference_strategy() -> impl Strategy<Value = ReferenceDate> {
    (2000i32..=2099, 1i32..=12).prop_map(|(year, month)| ReferenceDate::new(year, month).unwrap())
}

// =============================================================================
// LUHN ALGORITHM PROPERTIES
// =============================================================================

proptest! {
    /// Property: Appending the computed check digit makes any prefix valid.
    #[test]
    fn check_digit_makes_valid(digits in proptest::collection::vec(0u8..=9, 1..20)) {
        let check = luhn::generate_check_digit(&digits);
        let mut full = digits.clone();
        full.push(check);
        prop_assert!(luhn::validate(&full));
    }

    /// Property: Changing any single digit invalidates the checksum.
    #[test]
    fn single_digit_change_invalidates_luhn(
        (_, card) in valid_card_strategy(),
        position in any::<prop::sample::Index>(),
        delta in 1u8..=9,
    ) {
        let mut digits: Vec<u8> = card.bytes().map(|b| b - b'0').collect();
        let i = position.index(digits.len());
        digits[i] = (digits[i] + delta) % 10;
        prop_assert!(!luhn::validate(&digits));
    }

    /// Property: All-zero strings pass Luhn.
    #[test]
    fn all_zeros_passes_luhn(len in 1usize..=19usize) {
        prop_assert!(luhn::is_valid_luhn_number(&"0".repeat(len)));
    }
}

// =============================================================================
// CLASSIFICATION PROPERTIES
// =============================================================================

proptest! {
    /// Property: Classification is absent exactly for blank input.
    #[test]
    fn classify_absent_iff_blank(input in ".*") {
        prop_assert_eq!(classify(&input).is_none(), input.trim().is_empty());
    }

    /// Property: Numbers built from a network's prefix classify to it.
    #[test]
    fn built_numbers_classify_to_network((network, card) in valid_card_strategy()) {
        prop_assert_eq!(classify(&card), Some(network));
    }
}

// =============================================================================
// NUMBER VALIDATION PROPERTIES
// =============================================================================

proptest! {
    /// Property: Luhn-valid numbers of the right length validate.
    #[test]
    fn valid_cards_validate((_, card) in valid_card_strategy()) {
        prop_assert!(validate_number(&card));
    }

    /// Property: Adding or removing a digit breaks the length rule.
    #[test]
    fn wrong_length_fails((_, card) in valid_card_strategy(), extra in 0u8..=9) {
        let mut shorter: Vec<u8> = card.bytes().map(|b| b - b'0').collect();
        shorter.pop();
        shorter.pop();
        shorter.push(luhn::generate_check_digit(&shorter));
        let shorter: String = shorter.iter().map(|d| char::from(b'0' + d)).collect();
        prop_assert!(!validate_number(&shorter));

        let mut longer: Vec<u8> = card.bytes().map(|b| b - b'0').collect();
        longer.pop();
        longer.push(extra);
        longer.push(luhn::generate_check_digit(&longer));
        let longer: String = longer.iter().map(|d| char::from(b'0' + d)).collect();
        prop_assert!(!validate_number(&longer));
    }

    /// Property: Separators after the prefix region don't change the verdict.
    #[test]
    fn separators_dont_affect_validation(
        formatted in valid_card_strategy()
            .prop_flat_map(|(_, card)| card_with_separators(card, 3))
    ) {
        prop_assert!(validate_number(&formatted));
    }

    /// Property: Validation never panics.
    #[test]
    fn validate_never_panics(input in ".*") {
        let _ = validate_number(&input);
        let _ = normalize::format_number(&input, " ");
        let _ = mask::mask_number(&input);
    }
}

// =============================================================================
// VALIDATOR PROPERTIES
// =============================================================================

proptest! {
    /// Property: The report agrees with validate_all for every input.
    #[test]
    fn report_agrees_with_validate_all(
        input in card_input_strategy(),
        today in reference_strategy(),
    ) {
        let validator = CardValidator::new(&input, today);
        let report = validator.report();
        prop_assert_eq!(report.is_valid(), validator.validate_all());
        prop_assert_eq!(report.is_number_valid(), validator.validate_number());
        prop_assert_eq!(report.is_expiry_valid(), validator.validate_expiry_date());
    }

    /// Property: validate_all is the conjunction of its parts.
    #[test]
    fn validate_all_is_conjunction(
        input in card_input_strategy(),
        today in reference_strategy(),
    ) {
        let validator = CardValidator::new(&input, today);
        let expected = validator.validate_number()
            && validator.validate_expiry_date()
            && (!input.has_cvc() || validator.validate_cvc());
        prop_assert_eq!(validator.validate_all(), expected);
    }

    /// Property: Debug output never exposes the full card number.
    #[test]
    fn debug_never_exposes_card((_, card) in valid_card_strategy(), cvc in "[0-9]{3,4}") {
        let input = CardInput::new(card.clone()).with_cvc(cvc);
        let debug = format!("{:?}", input);
        prop_assert!(!debug.contains(&card));
    }

    /// Property: Masked numbers show only the last four digits.
    #[test]
    fn masked_shows_last_four((_, card) in valid_card_strategy()) {
        let masked = mask::mask_number(&card);
        prop_assert!(!masked.contains(&card));
        prop_assert!(masked.ends_with(&card[card.len() - 4..]));
    }
}

// =============================================================================
// EXPIRY PROPERTIES
// =============================================================================

proptest! {
    /// Property: Any month in the reference year from the reference month on is valid.
    #[test]
    fn current_and_future_months_valid(today in reference_strategy(), ahead in 0i32..=11) {
        let month = today.month() + ahead;
        prop_assume!(month <= 12);
        let input = CardInput::new("4242424242424242").with_expiry(month, today.year());
        prop_assert!(CardValidator::new(&input, today).validate_expiry_date());
    }

    /// Property: Earlier months in the reference year are expired.
    #[test]
    fn past_months_invalid(today in reference_strategy(), behind in 1i32..=11) {
        let month = today.month() - behind;
        prop_assume!(month >= 1);
        let input = CardInput::new("4242424242424242").with_expiry(month, today.year());
        prop_assert!(!CardValidator::new(&input, today).validate_expiry_date());
    }

    /// Property: Two-digit years match their four-digit expansion.
    #[test]
    fn two_digit_years_match_four_digit(today in reference_strategy(), yy in 0i32..=99) {
        let full = expiry::normalize_year(yy, today);
        prop_assert_eq!(
            expiry::has_year_passed(yy, today),
            expiry::has_year_passed(full, today)
        );
    }

    /// Property: Invalid months are always rejected.
    #[test]
    fn invalid_month_rejected(month in prop_oneof![-100i32..=0, 13i32..=100]) {
        prop_assert!(!expiry::is_valid_month(month));
    }
}

// =============================================================================
// CVC PROPERTIES
// =============================================================================

proptest! {
    /// Property: Without a classification any 3 or 4 digit CVC is valid.
    #[test]
    fn indeterminate_cvc_accepts_three_or_four(cvc in "[0-9]{3,4}") {
        prop_assert!(cvc::is_valid_cvc(&cvc, None));
    }

    /// Property: The CVC length matches the network exactly.
    #[test]
    fn cvc_length_per_network(network in known_network(), cvc in "[0-9]{2,5}") {
        prop_assert_eq!(
            cvc::is_valid_cvc(&cvc, Some(network)),
            cvc.len() == network.cvc_length()
        );
    }
}
