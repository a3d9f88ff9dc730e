//! Input normalization and display grouping for card numbers.
//!
//! Card numbers arrive from input fields with spaces and hyphens mixed in.
//! The helpers here strip those separators, answer the small questions the
//! validator asks of raw strings (blank? all digits? starts with one of these
//! prefixes?), and split numbers back into display groups.
//!
//! # Example
//!
//! ```
//! use cardcheck::normalize::{format_number, remove_separators};
//!
//! assert_eq!(remove_separators("4242-4242 4242\t4242"), "4242424242424242");
//! assert_eq!(format_number("4242424242424242", " "), "4242 4242 4242 4242");
//! assert_eq!(format_number("378282246310005", " "), "3782 822463 10005");
//! ```

use crate::network::{possible_network, CardNetwork};

/// Removes whitespace and hyphens, leaving every other character in place.
///
/// Non-digit characters other than separators survive so that later checks
/// can reject them.
///
/// # Example
///
/// ```
/// use cardcheck::normalize::remove_separators;
///
/// assert_eq!(remove_separators(" 4242-4242 "), "42424242");
/// assert_eq!(remove_separators("4242a"), "4242a");
/// ```
pub fn remove_separators(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// Returns true if the input is empty or contains only whitespace.
#[inline]
pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

/// Treats blank strings as absent.
#[inline]
pub fn non_blank(input: Option<&str>) -> Option<&str> {
    input.filter(|s| !is_blank(s))
}

/// Returns true if the input is non-empty and made only of ASCII digits.
///
/// Signs, decimal points and whitespace all make this false.
#[inline]
pub fn is_whole_positive_number(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true if `input` starts with any of `prefixes`.
#[inline]
pub fn has_any_prefix(input: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| input.starts_with(prefix))
}

/// Splits a separator-free number into display groups for a network.
///
/// American Express numbers group as 4-6-5; everything else groups in fours
/// with any remainder in the last group. Partial numbers produce as many
/// groups as they fill, so this works while the user is still typing.
///
/// # Example
///
/// ```
/// use cardcheck::normalize::separate_number_groups;
/// use cardcheck::CardNetwork;
///
/// assert_eq!(
///     separate_number_groups("378282246310005", CardNetwork::AmericanExpress),
///     vec!["3782", "822463", "10005"]
/// );
/// assert_eq!(
///     separate_number_groups("424242", CardNetwork::Visa),
///     vec!["4242", "42"]
/// );
/// ```
pub fn separate_number_groups(spaceless: &str, network: CardNetwork) -> Vec<String> {
    let chars: Vec<char> = spaceless.chars().collect();
    if chars.is_empty() {
        return vec![];
    }

    let sizes: &[usize] = match network {
        CardNetwork::AmericanExpress => &[4, 6],
        _ => &[],
    };

    let mut groups = Vec::new();
    let mut pos = 0;

    for &size in sizes {
        if chars.len() - pos <= size {
            break;
        }
        groups.push(chars[pos..pos + size].iter().collect());
        pos += size;
    }

    if sizes.is_empty() {
        while chars.len() - pos > 4 {
            groups.push(chars[pos..pos + 4].iter().collect());
            pos += 4;
        }
    }

    groups.push(chars[pos..].iter().collect());
    groups
}

/// Formats a card number for display, joining network groups with `separator`.
///
/// Existing separators are stripped first and the network is guessed from
/// the stripped digits.
pub fn format_number(input: &str, separator: &str) -> String {
    let spaceless = remove_separators(input);
    let network = possible_network(&spaceless);
    separate_number_groups(&spaceless, network).join(separator)
}
