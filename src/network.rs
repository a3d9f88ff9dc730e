//! Card network classification using ordered prefix tables.
//!
//! A card number's leading digits identify the network that issued it. This
//! module keeps one prefix table per network and tests them in a fixed
//! priority order: the first table with a matching prefix wins.
//!
//! | Network | Prefixes | Length | CVC |
//! |---------|----------|--------|-----|
//! | American Express | 34, 37 | 15 | 4 |
//! | Discover | 60, 62, 64, 65 | 16 | 3 |
//! | JCB | 35 | 16 | 3 |
//! | Diners Club | 300-305, 309, 36, 38, 39 | 14 | 3 |
//! | Visa | 4 | 16 | 3 |
//! | MasterCard | 50-55 | 16 | 3 |
//!
//! # Example
//!
//! ```
//! use cardcheck::network::{classify, CardNetwork};
//!
//! assert_eq!(classify("4242424242424242"), Some(CardNetwork::Visa));
//! assert_eq!(classify("9999"), Some(CardNetwork::Unknown));
//! assert_eq!(classify("   "), None);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::normalize::{has_any_prefix, is_blank, remove_separators};

/// American Express prefixes.
pub const PREFIXES_AMERICAN_EXPRESS: &[&str] = &["34", "37"];
/// Discover prefixes.
pub const PREFIXES_DISCOVER: &[&str] = &["60", "62", "64", "65"];
/// JCB prefixes.
pub const PREFIXES_JCB: &[&str] = &["35"];
/// Diners Club prefixes.
pub const PREFIXES_DINERS_CLUB: &[&str] =
    &["300", "301", "302", "303", "304", "305", "309", "36", "38", "39"];
/// Visa prefixes.
pub const PREFIXES_VISA: &[&str] = &["4"];
/// MasterCard prefixes.
pub const PREFIXES_MASTERCARD: &[&str] = &["50", "51", "52", "53", "54", "55"];

/// Required digit count for American Express numbers.
pub const LENGTH_AMERICAN_EXPRESS: usize = 15;
/// Required digit count for Diners Club numbers.
pub const LENGTH_DINERS_CLUB: usize = 14;
/// Required digit count for every other network.
pub const LENGTH_COMMON: usize = 16;

/// CVC length for American Express.
pub const CVC_LENGTH_AMERICAN_EXPRESS: usize = 4;
/// CVC length for every other network.
pub const CVC_LENGTH_COMMON: usize = 3;

/// Card networks recognised by the classifier.
///
/// `Unknown` is a real classification: the number was not blank but no
/// prefix table matched it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardNetwork {
    /// American Express - prefix 34, 37
    #[cfg_attr(feature = "serde", serde(rename = "American Express"))]
    AmericanExpress,
    /// Discover - prefix 60, 62, 64, 65
    Discover,
    /// JCB - prefix 35
    #[cfg_attr(feature = "serde", serde(rename = "JCB"))]
    Jcb,
    /// Diners Club - prefix 300-305, 309, 36, 38, 39
    #[cfg_attr(feature = "serde", serde(rename = "Diners Club"))]
    DinersClub,
    /// Visa - prefix 4
    Visa,
    /// MasterCard - prefix 50-55
    MasterCard,
    /// Non-blank number matching none of the prefix tables.
    Unknown,
}

impl CardNetwork {
    /// Networks in the order their prefix tables are tested.
    pub const CLASSIFICATION_ORDER: [CardNetwork; 6] = [
        Self::AmericanExpress,
        Self::Discover,
        Self::Jcb,
        Self::DinersClub,
        Self::Visa,
        Self::MasterCard,
    ];

    /// Returns the prefix table for this network.
    ///
    /// `Unknown` has no prefixes.
    #[inline]
    pub const fn prefixes(&self) -> &'static [&'static str] {
        match self {
            Self::AmericanExpress => PREFIXES_AMERICAN_EXPRESS,
            Self::Discover => PREFIXES_DISCOVER,
            Self::Jcb => PREFIXES_JCB,
            Self::DinersClub => PREFIXES_DINERS_CLUB,
            Self::Visa => PREFIXES_VISA,
            Self::MasterCard => PREFIXES_MASTERCARD,
            Self::Unknown => &[],
        }
    }

    /// Returns the exact number of digits a number of this network must have.
    #[inline]
    pub const fn number_length(&self) -> usize {
        match self {
            Self::AmericanExpress => LENGTH_AMERICAN_EXPRESS,
            Self::DinersClub => LENGTH_DINERS_CLUB,
            _ => LENGTH_COMMON,
        }
    }

    /// Returns true if `length` is the required digit count for this network.
    #[inline]
    pub const fn is_valid_length(&self, length: usize) -> bool {
        self.number_length() == length
    }

    /// Returns the CVC length for this network.
    #[inline]
    pub const fn cvc_length(&self) -> usize {
        match self {
            Self::AmericanExpress => CVC_LENGTH_AMERICAN_EXPRESS,
            _ => CVC_LENGTH_COMMON,
        }
    }

    /// Returns a human-readable name for the network.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AmericanExpress => "American Express",
            Self::Discover => "Discover",
            Self::Jcb => "JCB",
            Self::DinersClub => "Diners Club",
            Self::Visa => "Visa",
            Self::MasterCard => "MasterCard",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CardNetwork {
    type Err = std::convert::Infallible;

    /// Parses a network name. Anything unrecognised becomes `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Ok(match key.as_str() {
            "americanexpress" | "amex" => Self::AmericanExpress,
            "discover" => Self::Discover,
            "jcb" => Self::Jcb,
            "dinersclub" | "diners" => Self::DinersClub,
            "visa" => Self::Visa,
            "mastercard" | "mc" => Self::MasterCard,
            _ => Self::Unknown,
        })
    }
}

/// Classifies a card number by its leading characters.
///
/// The number is matched as given: separators are not stripped first, so a
/// hyphen or space inside the prefix region changes the outcome. Blank input
/// has no classification and yields `None`.
///
/// # Example
///
/// ```
/// use cardcheck::network::{classify, CardNetwork};
///
/// assert_eq!(classify("340000000000009"), Some(CardNetwork::AmericanExpress));
/// assert_eq!(classify("3000 0000 0000 04"), Some(CardNetwork::DinersClub));
/// assert_eq!(classify("3-4000"), Some(CardNetwork::Unknown));
/// assert_eq!(classify(""), None);
/// ```
pub fn classify(number: &str) -> Option<CardNetwork> {
    if is_blank(number) {
        return None;
    }

    let network = CardNetwork::CLASSIFICATION_ORDER
        .into_iter()
        .find(|network| has_any_prefix(number, network.prefixes()))
        .unwrap_or(CardNetwork::Unknown);

    Some(network)
}

/// Guesses the network of a possibly partial number as the user types it.
///
/// Separators are stripped before matching, and blank input is reported as
/// `Unknown` rather than absent.
///
/// # Example
///
/// ```
/// use cardcheck::network::{possible_network, CardNetwork};
///
/// assert_eq!(possible_network("3 4"), CardNetwork::AmericanExpress);
/// assert_eq!(possible_network(""), CardNetwork::Unknown);
/// ```
pub fn possible_network(partial: &str) -> CardNetwork {
    classify(&remove_separators(partial)).unwrap_or(CardNetwork::Unknown)
}
