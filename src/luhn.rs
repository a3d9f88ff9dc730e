//! Luhn algorithm implementation for card number validation.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is a checksum
//! formula that catches single-digit transcription errors and most adjacent
//! transpositions.
//!
//! # Algorithm
//!
//! 1. Starting from the rightmost digit (check digit), moving left
//! 2. Double every second digit
//! 3. If doubling results in a number > 9, subtract 9
//! 4. Sum all digits
//! 5. If the sum is divisible by 10, the number is valid

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates a sequence of digit values (0-9) using the Luhn algorithm.
///
/// An empty slice, or one holding a value above 9, is never valid.
///
/// # Example
///
/// ```
/// use cardcheck::luhn::validate;
///
/// let digits = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2];
/// assert!(validate(&digits));
///
/// let invalid = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 1];
/// assert!(!validate(&invalid));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() || digits.iter().any(|&d| d > 9) {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Computes the Luhn sum (not reduced modulo 10) for a sequence of digits.
///
/// # Panics
///
/// Panics if any value is above 9.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            // Position 0 is the check digit and is never doubled
            if i % 2 == 1 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum()
}

/// Generates the check digit for a partial number.
///
/// Given digits without the check digit, computes the digit that makes the
/// full number pass Luhn validation. Panics if any value is above 9.
///
/// # Example
///
/// ```
/// use cardcheck::luhn::generate_check_digit;
///
/// let partial = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4];
/// assert_eq!(generate_check_digit(&partial), 2);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Every existing digit moves one position left once the check digit is
    // appended, so the doubling parity flips.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 0 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}

/// Checks a string of ASCII digits with the Luhn algorithm.
///
/// Returns false for an empty string or if any character is not an ASCII
/// digit; no separators are stripped.
///
/// # Example
///
/// ```
/// use cardcheck::luhn::is_valid_luhn_number;
///
/// assert!(is_valid_luhn_number("4242424242424242"));
/// assert!(!is_valid_luhn_number("4242424242424241"));
/// assert!(!is_valid_luhn_number("4242-4242-4242-4242"));
/// ```
pub fn is_valid_luhn_number(number: &str) -> bool {
    let mut digits = Vec::with_capacity(number.len());
    for b in number.bytes() {
        if !b.is_ascii_digit() {
            return false;
        }
        digits.push(b - b'0');
    }

    validate(&digits)
}
