//! # cardcheck
//!
//! Payment card classification and validation for checkout forms.
//!
//! ## Features
//!
//! - Card network classification from leading digits
//! - Luhn checksum and per-network length validation
//! - Expiry validation against an injected reference date
//! - CVC validation with network-specific lengths
//! - Structured reports naming every failed sub-check
//! - Masked `Debug` output and log events
//!
//! ## Quick Start
//!
//! ```rust
//! use cardcheck::{CardInput, CardNetwork, CardValidator, ReferenceDate};
//!
//! let today = ReferenceDate::new(2024, 1).unwrap();
//! let input = CardInput::new("4242 4242 4242 4242")
//!     .with_expiry(12, 2030)
//!     .with_cvc("123");
//!
//! let validator = CardValidator::new(&input, today);
//! assert_eq!(validator.network(), Some(CardNetwork::Visa));
//! assert!(validator.validate_all());
//! ```
//!
//! ## Classification
//!
//! Classification never fails. A blank number has no classification and
//! anything that matches no known prefix is `Unknown`.
//!
//! ```rust
//! use cardcheck::{classify, CardNetwork};
//!
//! assert_eq!(classify("378282246310005"), Some(CardNetwork::AmericanExpress));
//! assert_eq!(classify("6011000000000004"), Some(CardNetwork::Discover));
//! assert_eq!(classify("9999"), Some(CardNetwork::Unknown));
//! assert_eq!(classify("   "), None);
//! ```
//!
//! ## Reports
//!
//! ```rust
//! use cardcheck::{CardInput, CardValidator, Check, ReferenceDate};
//!
//! let today = ReferenceDate::new(2024, 1).unwrap();
//! let input = CardInput::new("340000000000009")
//!     .with_expiry(1, 2020)
//!     .with_cvc("1234");
//!
//! let validator = CardValidator::new(&input, today);
//! assert!(validator.validate_number());
//! assert!(!validator.validate_expiry_date());
//!
//! let report = validator.report();
//! assert!(report.contains(Check::ExpYear));
//! assert!(report.is_number_valid());
//! assert!(!report.is_valid());
//! ```
//!
//! ## Supported Card Networks
//!
//! | Network | Prefix | Length | CVC |
//! |---------|--------|--------|-----|
//! | American Express | 34, 37 | 15 | 4 |
//! | Discover | 60, 62, 64, 65 | 16 | 3 |
//! | JCB | 35 | 16 | 3 |
//! | Diners Club | 300-305, 309, 36, 38, 39 | 14 | 3 |
//! | Visa | 4 | 16 | 3 |
//! | MasterCard | 50-55 | 16 | 3 |
//! | Unknown | anything else | 16 | 3 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialize/Deserialize for inputs, networks and reports |
//! | `parallel` | Rayon-based batch validation |
//! | `clock` | `ReferenceDate::today()` from the system clock |
//! | `cli` | Command-line tool |
//!
//! ## Security
//!
//! - `CardInput` is zeroed when dropped
//! - `Debug` output and log events show masked numbers only
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod batch;
pub mod cvc;
pub mod error;
pub mod expiry;
pub mod luhn;
pub mod mask;
pub mod network;
pub mod normalize;
pub mod report;
pub mod validator;

// Re-export main types at crate root
pub use batch::BatchValidator;
pub use error::DateError;
pub use expiry::ReferenceDate;
pub use network::{classify, possible_network, CardNetwork};
pub use report::{Check, ValidationReport};
pub use validator::{check_number, validate_cvc, validate_number, CardInput, CardValidator};

#[cfg(test)]
mod tests {
    use super::*;

    // Standard test card numbers from payment processors
    const VISA: &str = "4242424242424242";
    const MASTERCARD: &str = "5555555555554444";
    const AMEX: &str = "378282246310005";
    const DISCOVER: &str = "6011111111111117";
    const DINERS: &str = "30569309025904";
    const DINERS_2: &str = "36227206271667";
    const JCB: &str = "3530111333300000";

    fn jan_2024() -> ReferenceDate {
        ReferenceDate::new(2024, 1).unwrap()
    }

    #[test]
    fn test_every_network_validates() {
        for (number, network) in [
            (VISA, CardNetwork::Visa),
            (MASTERCARD, CardNetwork::MasterCard),
            (AMEX, CardNetwork::AmericanExpress),
            (DISCOVER, CardNetwork::Discover),
            (DINERS, CardNetwork::DinersClub),
            (DINERS_2, CardNetwork::DinersClub),
            (JCB, CardNetwork::Jcb),
        ] {
            assert_eq!(classify(number), Some(network), "{}", number);
            assert!(validate_number(number), "{}", number);
        }
    }

    #[test]
    fn test_visa_card_end_to_end() {
        let input = CardInput::new(VISA).with_expiry(12, 2030).with_cvc("123");
        let validator = CardValidator::new(&input, jan_2024());
        assert_eq!(validator.network(), Some(CardNetwork::Visa));
        assert!(validator.validate_number());
        assert!(validator.validate_expiry_date());
        assert!(validator.validate_cvc());
        assert!(validator.validate_all());
    }

    #[test]
    fn test_expired_amex() {
        let input = CardInput::new("340000000000009")
            .with_expiry(1, 2020)
            .with_cvc("1234");
        let validator = CardValidator::new(&input, jan_2024());
        assert_eq!(validator.network(), Some(CardNetwork::AmericanExpress));
        assert!(validator.validate_number());
        assert!(validator.validate_cvc());
        assert!(!validator.validate_expiry_date());
        assert!(!validator.validate_all());
    }

    #[test]
    fn test_empty_number() {
        assert_eq!(classify(""), None);
        let input = CardInput::new("");
        let validator = CardValidator::new(&input, jan_2024());
        assert_eq!(validator.network(), None);
        assert!(!validator.validate_number());
        assert!(validator.report().contains(Check::NumberMissing));
    }

    #[test]
    fn test_discover_short_cvc() {
        let input = CardInput::new("6011000000000004").with_cvc("12");
        let validator = CardValidator::new(&input, jan_2024());
        assert_eq!(validator.network(), Some(CardNetwork::Discover));
        assert!(!validator.validate_cvc());
    }

    #[test]
    fn test_possible_network_ignores_separators() {
        assert_eq!(possible_network("3-4"), CardNetwork::AmericanExpress);
        assert_eq!(classify("3-4"), Some(CardNetwork::Unknown));
        assert_eq!(possible_network(""), CardNetwork::Unknown);
    }

    #[test]
    fn test_reference_date_rejects_bad_month() {
        assert_eq!(ReferenceDate::new(2024, 13), Err(DateError::InvalidMonth(13)));
    }
}
