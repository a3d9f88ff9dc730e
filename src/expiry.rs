//! Card expiry date validation against an injected reference date.
//!
//! Nothing in this module reads the system clock. Every comparison is made
//! against a [`ReferenceDate`] supplied by the caller, which keeps validation
//! deterministic. Composition roots that want "now" can build one with
//! `ReferenceDate::today()` (requires the `clock` feature).
//!
//! A card expires at the end of its expiry month: a card expiring in the
//! reference month is still valid.
//!
//! # Supported Formats
//!
//! [`parse_expiry`] accepts:
//!
//! - `MM/YY` - e.g., "12/25"
//! - `MM/YYYY` - e.g., "12/2025"
//! - `MMYY` - e.g., "1225"
//! - `MMYYYY` - e.g., "122025"
//! - `MM-YY` - e.g., "12-25"
//! - `MM-YYYY` - e.g., "12-2025"
//!
//! # Example
//!
//! ```
//! use cardcheck::expiry::{has_month_passed, parse_expiry, ReferenceDate};
//!
//! let today = ReferenceDate::new(2024, 6).unwrap();
//!
//! assert!(!has_month_passed(2024, 6, today));
//! assert!(has_month_passed(2024, 5, today));
//!
//! let expiry = parse_expiry("12/30", today).unwrap();
//! assert_eq!(expiry.year(), 2030);
//! assert!(!expiry.is_expired(today));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::DateError;

/// Largest full year accepted by [`is_expiry_data_valid`].
///
/// Two-digit year expansion can roll forward a century, so years past this
/// point cannot be distinguished from expanded ones.
pub const MAX_VALID_YEAR: i32 = 9980;

/// Largest year a [`ReferenceDate`] may hold.
pub const MAX_REFERENCE_YEAR: i32 = 9999;

/// The externally supplied "current" year and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReferenceDate {
    year: i32,
    month: i32,
}

impl ReferenceDate {
    /// Creates a reference date.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidMonth`] if `month` is not 1-12 and
    /// [`DateError::InvalidYear`] if `year` is outside `0..=MAX_REFERENCE_YEAR`.
    pub fn new(year: i32, month: i32) -> Result<Self, DateError> {
        if !(0..=MAX_REFERENCE_YEAR).contains(&year) {
            return Err(DateError::InvalidYear(year));
        }
        if !is_valid_month(month) {
            return Err(DateError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// Returns the current UTC year and month from the system clock.
    ///
    /// Only composition roots should call this; library code takes a
    /// `ReferenceDate` as a parameter.
    #[cfg(feature = "clock")]
    pub fn today() -> Self {
        use chrono::Datelike;

        let now = chrono::Utc::now();
        Self {
            year: now.year(),
            month: now.month() as i32,
        }
    }

    /// Returns the four-digit year.
    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> i32 {
        self.month
    }
}

impl fmt::Display for ReferenceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for ReferenceDate {
    type Err = DateError;

    /// Parses `YYYY-MM` or `YYYY/MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DateError::Empty);
        }

        let (year, month) = s
            .split_once('-')
            .or_else(|| s.split_once('/'))
            .ok_or(DateError::InvalidFormat)?;

        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(DateError::InvalidFormat);
        }

        let year: i32 = year.parse().map_err(|_| DateError::InvalidFormat)?;
        let month: i32 = month.parse().map_err(|_| DateError::InvalidFormat)?;

        Self::new(year, month)
    }
}

/// Returns true if `month` is between 1 and 12 inclusive.
#[inline]
pub const fn is_valid_month(month: i32) -> bool {
    month >= 1 && month <= 12
}

/// Expands a two-digit year into the reference date's century.
///
/// Years outside `0..=99` are returned unchanged. With a reference year of
/// 2024, `24` becomes 2024 and `5` becomes 2005.
#[inline]
pub const fn normalize_year(year: i32, reference: ReferenceDate) -> i32 {
    if year >= 0 && year < 100 {
        (reference.year / 100) * 100 + year
    } else {
        year
    }
}

/// Returns true if `year` (two or four digits) is before the reference year.
#[inline]
pub const fn has_year_passed(year: i32, reference: ReferenceDate) -> bool {
    normalize_year(year, reference) < reference.year
}

/// Returns true if the `(year, month)` pair is strictly before the reference
/// month.
pub const fn has_month_passed(year: i32, month: i32, reference: ReferenceDate) -> bool {
    if has_year_passed(year, reference) {
        return true;
    }

    normalize_year(year, reference) == reference.year && month < reference.month
}

/// Converts a two-digit year to four digits, windowed around the reference.
///
/// Near the end of a century small inputs roll forward (in 2090, `18` means
/// 2118); near the start large inputs roll back (in 2017, `95` means 1995).
/// Otherwise the reference century is used.
pub const fn convert_two_digit_year_to_four(input_year: i32, reference: ReferenceDate) -> i32 {
    let mut century_base = reference.year / 100;
    if reference.year % 100 > 80 && input_year < 20 {
        century_base += 1;
    } else if reference.year % 100 < 20 && input_year > 80 {
        century_base -= 1;
    }
    (century_base * 100).saturating_add(input_year)
}

/// Returns true if a full four-digit `(month, year)` has not yet expired.
///
/// Months outside 1-12 and years outside `0..=MAX_VALID_YEAR` are invalid.
/// No two-digit expansion is applied.
pub const fn is_expiry_data_valid(month: i32, year: i32, reference: ReferenceDate) -> bool {
    if !is_valid_month(month) {
        return false;
    }
    if year < 0 || year > MAX_VALID_YEAR {
        return false;
    }

    if year != reference.year {
        return year > reference.year;
    }
    month >= reference.month
}

/// A parsed expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryDate {
    /// Month (1-12)
    month: u8,
    /// Four-digit year (e.g., 2025)
    year: u16,
}

impl ExpiryDate {
    /// Creates a new expiry date.
    ///
    /// Returns `None` if the month is invalid (not 1-12).
    pub fn new(month: u8, year: u16) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { month, year })
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the four-digit year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns true if the card expired before the reference month.
    pub fn is_expired(&self, reference: ReferenceDate) -> bool {
        has_month_passed(self.year as i32, self.month as i32, reference)
    }

    /// Returns the number of months from the reference month until expiry.
    ///
    /// Returns 0 if already expired or expiring in the reference month.
    pub fn months_until_expiry(&self, reference: ReferenceDate) -> u32 {
        let expiry_months = self.year as i64 * 12 + self.month as i64;
        let current_months = reference.year as i64 * 12 + reference.month as i64;

        (expiry_months - current_months).max(0) as u32
    }

    /// Formats as MM/YY.
    pub fn format_short(&self) -> String {
        format!("{:02}/{:02}", self.month, self.year % 100)
    }

    /// Formats as MM/YYYY.
    pub fn format_long(&self) -> String {
        format!("{:02}/{:04}", self.month, self.year)
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year % 100)
    }
}

/// Errors that can occur while parsing an expiry string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryError {
    /// The input string is empty.
    Empty,
    /// Invalid format - couldn't parse month/year.
    InvalidFormat,
    /// Month is out of range (must be 1-12).
    InvalidMonth(u8),
    /// The date is before the reference month.
    Expired {
        /// The expiry month.
        month: u8,
        /// The expiry year.
        year: u16,
    },
}

impl fmt::Display for ExpiryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "expiry date is empty"),
            Self::InvalidFormat => {
                write!(f, "invalid expiry format (expected MM/YY or MM/YYYY)")
            }
            Self::InvalidMonth(m) => {
                write!(f, "invalid month {}: must be 1-12", m)
            }
            Self::Expired { month, year } => {
                write!(f, "card expired ({:02}/{})", month, year)
            }
        }
    }
}

impl std::error::Error for ExpiryError {}

/// An expiry string split into month and year, before any century
/// expansion.
///
/// Parsing needs no reference date, so this can be used to reject malformed
/// input up front; [`resolve`](Self::resolve) then applies the century
/// window.
///
/// # Example
///
/// ```
/// use cardcheck::expiry::{RawExpiry, ReferenceDate};
///
/// let raw: RawExpiry = "1230".parse().unwrap();
/// assert_eq!(raw.month(), 12);
/// assert!(raw.is_two_digit_year());
///
/// let today = ReferenceDate::new(2024, 1).unwrap();
/// assert_eq!(raw.resolve(today).unwrap().year(), 2030);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawExpiry {
    month: u8,
    year: u16,
    two_digit_year: bool,
}

impl RawExpiry {
    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the year as typed.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns true if the year was typed with two digits.
    #[inline]
    pub const fn is_two_digit_year(&self) -> bool {
        self.two_digit_year
    }

    /// Expands a two-digit year with [`convert_two_digit_year_to_four`]
    /// relative to `reference`.
    pub fn resolve(&self, reference: ReferenceDate) -> Result<ExpiryDate, ExpiryError> {
        let year = if self.two_digit_year {
            convert_two_digit_year_to_four(i32::from(self.year), reference)
        } else {
            i32::from(self.year)
        };

        let year = u16::try_from(year).map_err(|_| ExpiryError::InvalidFormat)?;
        Ok(ExpiryDate {
            month: self.month,
            year,
        })
    }
}

impl FromStr for RawExpiry {
    type Err = ExpiryError;

    /// Accepts `MM/YY`, `MM/YYYY`, `MMYY`, `MMYYYY` and the `-` forms.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ExpiryError::Empty);
        }

        if let Some((month_str, year_str)) = input.split_once('/').or_else(|| input.split_once('-')) {
            return parse_month_year(month_str.trim(), year_str.trim());
        }

        if !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ExpiryError::InvalidFormat);
        }

        match input.len() {
            // MMYY
            4 => parse_month_year(&input[0..2], &input[2..4]),
            // MMYYYY
            6 => parse_month_year(&input[0..2], &input[2..6]),
            _ => Err(ExpiryError::InvalidFormat),
        }
    }
}

fn parse_month_year(month_str: &str, year_str: &str) -> Result<RawExpiry, ExpiryError> {
    if month_str.is_empty() || month_str.len() > 2 || !month_str.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ExpiryError::InvalidFormat);
    }
    let month: u8 = month_str.parse().map_err(|_| ExpiryError::InvalidFormat)?;

    if !(1..=12).contains(&month) {
        return Err(ExpiryError::InvalidMonth(month));
    }

    if !year_str.bytes().all(|b| b.is_ascii_digit()) || !matches!(year_str.len(), 2 | 4) {
        return Err(ExpiryError::InvalidFormat);
    }
    let year: u16 = year_str.parse().map_err(|_| ExpiryError::InvalidFormat)?;

    Ok(RawExpiry {
        month,
        year,
        two_digit_year: year_str.len() == 2,
    })
}

/// Parses an expiry date string.
///
/// Two-digit years are expanded with [`convert_two_digit_year_to_four`]
/// relative to `reference`. The result is not checked for expiry; see
/// [`validate_expiry`].
///
/// # Example
///
/// ```
/// use cardcheck::expiry::{parse_expiry, ReferenceDate};
///
/// let today = ReferenceDate::new(2024, 1).unwrap();
///
/// let expiry = parse_expiry("12/25", today).unwrap();
/// assert_eq!(expiry.month(), 12);
/// assert_eq!(expiry.year(), 2025);
///
/// let expiry = parse_expiry("01/2030", today).unwrap();
/// assert_eq!(expiry.year(), 2030);
/// ```
pub fn parse_expiry(input: &str, reference: ReferenceDate) -> Result<ExpiryDate, ExpiryError> {
    input.parse::<RawExpiry>()?.resolve(reference)
}

/// Parses an expiry string and rejects dates before the reference month.
///
/// # Example
///
/// ```
/// use cardcheck::expiry::{validate_expiry, ReferenceDate};
///
/// let today = ReferenceDate::new(2024, 6).unwrap();
/// assert!(validate_expiry("06/24", today).is_ok());
/// assert!(validate_expiry("05/24", today).is_err());
/// ```
pub fn validate_expiry(input: &str, reference: ReferenceDate) -> Result<ExpiryDate, ExpiryError> {
    let expiry = parse_expiry(input, reference)?;

    if expiry.is_expired(reference) {
        return Err(ExpiryError::Expired {
            month: expiry.month,
            year: expiry.year,
        });
    }

    Ok(expiry)
}
