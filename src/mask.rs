//! PCI-DSS friendly masking for card numbers.
//!
//! Validators, inputs and log events render card numbers through these
//! helpers so that only the last four digits ever leave the engine. PCI-DSS
//! allows displaying at most the first 6 and last 4 digits; this module
//! shows only the last 4.

/// Masks a card number showing only the last 4 digits.
///
/// Non-digit characters are ignored. Inputs with four or fewer digits are
/// fully masked.
///
/// # Example
///
/// ```
/// use cardcheck::mask::mask_number;
///
/// assert_eq!(mask_number("4242424242424242"), "****-****-****-4242");
/// assert_eq!(mask_number("4242-4242-4242-4242"), "****-****-****-4242");
/// assert_eq!(mask_number("123"), "***");
/// ```
pub fn mask_number(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    if len <= 4 {
        return "*".repeat(len);
    }

    let masked_count = len - 4;
    let mut result = String::with_capacity(len + (len / 4));

    for i in 0..masked_count {
        if i > 0 && i % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }

    if masked_count % 4 == 0 {
        result.push('-');
    }

    result.extend(&digits[len - 4..]);
    result
}

/// Extracts the last 4 digits from a card number string.
///
/// Returns `None` if there are fewer than 4 digits.
pub fn last_four(input: &str) -> Option<String> {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 4 {
        Some(digits[digits.len() - 4..].iter().collect())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_16_digits() {
        assert_eq!(mask_number("4242424242424242"), "****-****-****-4242");
        assert_eq!(mask_number("4242 4242 4242 4242"), "****-****-****-4242");
    }

    #[test]
    fn test_mask_15_digits() {
        let masked = mask_number("340000000000009");
        assert_eq!(masked, "****-****-***0009");
        assert!(!masked.contains("340000000000009"));
    }

    #[test]
    fn test_mask_short() {
        assert_eq!(mask_number(""), "");
        assert_eq!(mask_number("1234"), "****");
        assert_eq!(mask_number("12345"), "*2345");
    }

    #[test]
    fn test_last_four() {
        assert_eq!(last_four("4242424242424242").as_deref(), Some("4242"));
        assert_eq!(last_four("4242-4242-4242-1234").as_deref(), Some("1234"));
        assert_eq!(last_four("123"), None);
    }
}
