//! CVC/CVV/CID validation.
//!
//! # Length Requirements
//!
//! - American Express: 4 digits (printed on front)
//! - All other networks, including `Unknown`: 3 digits (printed on back)
//! - No classification (the number was blank): 3 or 4 digits
//!
//! # Example
//!
//! ```
//! use cardcheck::cvc::is_valid_cvc;
//! use cardcheck::CardNetwork;
//!
//! assert!(is_valid_cvc("1234", Some(CardNetwork::AmericanExpress)));
//! assert!(!is_valid_cvc("123", Some(CardNetwork::AmericanExpress)));
//! assert!(is_valid_cvc("123", Some(CardNetwork::Visa)));
//! assert!(is_valid_cvc("1234", None));
//! ```

use crate::network::CardNetwork;
use crate::normalize::{is_blank, is_whole_positive_number};
use crate::report::Check;

/// Shortest CVC accepted when the network is indeterminate.
pub const MIN_CVC_LENGTH: usize = 3;
/// Longest CVC accepted when the network is indeterminate.
pub const MAX_CVC_LENGTH: usize = 4;

/// Returns true if `length` is acceptable for the given classification.
#[inline]
pub const fn is_valid_cvc_length(length: usize, network: Option<CardNetwork>) -> bool {
    match network {
        Some(network) => length == network.cvc_length(),
        None => length >= MIN_CVC_LENGTH && length <= MAX_CVC_LENGTH,
    }
}

/// Checks a CVC and reports which sub-check failed first.
///
/// Surrounding whitespace is ignored.
pub fn check_cvc(cvc: &str, network: Option<CardNetwork>) -> Result<(), Check> {
    if is_blank(cvc) {
        return Err(Check::CvcMissing);
    }

    let cvc = cvc.trim();
    if !is_whole_positive_number(cvc) {
        return Err(Check::CvcNotNumeric);
    }

    if !is_valid_cvc_length(cvc.len(), network) {
        return Err(Check::CvcLength);
    }

    Ok(())
}

/// Returns true if `cvc` is valid for the given classification.
///
/// `network` is `None` when the card number was blank and so never
/// classified.
#[inline]
pub fn is_valid_cvc(cvc: &str, network: Option<CardNetwork>) -> bool {
    check_cvc(cvc, network).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_NON_AMEX: [CardNetwork; 6] = [
        CardNetwork::Discover,
        CardNetwork::Jcb,
        CardNetwork::DinersClub,
        CardNetwork::Visa,
        CardNetwork::MasterCard,
        CardNetwork::Unknown,
    ];

    #[test]
    fn test_amex_requires_four() {
        let amex = Some(CardNetwork::AmericanExpress);
        assert!(is_valid_cvc("1234", amex));
        assert_eq!(check_cvc("123", amex), Err(Check::CvcLength));
        assert_eq!(check_cvc("12345", amex), Err(Check::CvcLength));
    }

    #[test]
    fn test_other_networks_require_three() {
        for network in KNOWN_NON_AMEX {
            assert!(is_valid_cvc("123", Some(network)), "{}", network);
            assert!(!is_valid_cvc("1234", Some(network)), "{}", network);
        }
    }

    #[test]
    fn test_indeterminate_network_accepts_three_or_four() {
        assert!(is_valid_cvc("123", None));
        assert!(is_valid_cvc("1234", None));
        assert!(!is_valid_cvc("12", None));
        assert!(!is_valid_cvc("12345", None));
    }

    #[test]
    fn test_short_and_long_always_invalid() {
        for network in CardNetwork::CLASSIFICATION_ORDER {
            assert!(!is_valid_cvc("12", Some(network)));
            assert!(!is_valid_cvc("12345", Some(network)));
        }
    }

    #[test]
    fn test_blank_and_non_digit() {
        assert_eq!(check_cvc("", None), Err(Check::CvcMissing));
        assert_eq!(check_cvc("   ", None), Err(Check::CvcMissing));
        assert_eq!(check_cvc("12a", None), Err(Check::CvcNotNumeric));
        assert_eq!(check_cvc("-12", None), Err(Check::CvcNotNumeric));
        assert_eq!(check_cvc("1 23", None), Err(Check::CvcNotNumeric));
    }

    #[test]
    fn test_padded_cvc() {
        assert!(is_valid_cvc(" 123\n", Some(CardNetwork::Visa)));
    }

    #[test]
    fn test_leading_zeros() {
        assert!(is_valid_cvc("007", Some(CardNetwork::Visa)));
        assert!(is_valid_cvc("0001", Some(CardNetwork::AmericanExpress)));
    }
}
