//! Structured diagnostics for a validation run.
//!
//! The boolean predicates on [`CardValidator`](crate::CardValidator) answer
//! "is this valid?". A [`ValidationReport`] answers "what failed?" by
//! recording one [`Check`] tag per failed sub-check, so a form can highlight
//! the right field without re-running narrower predicates.

use std::collections::BTreeSet;
use std::fmt;

/// A sub-check that can fail during card validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Check {
    /// The number was absent or blank.
    NumberMissing,
    /// The number contained something other than digits and separators.
    NumberNotNumeric,
    /// The number failed the Luhn checksum.
    NumberChecksum,
    /// The number had the wrong digit count for its network.
    NumberLength,
    /// The expiry month was absent or outside 1-12.
    ExpMonth,
    /// The expiry year was absent or already over.
    ExpYear,
    /// The expiry month and year are both plausible but already elapsed.
    ExpiryElapsed,
    /// A CVC was supplied but blank.
    CvcMissing,
    /// The CVC contained non-digit characters.
    CvcNotNumeric,
    /// The CVC had the wrong length for the network.
    CvcLength,
}

impl Check {
    /// Returns a short description of the failure.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::NumberMissing => "card number is missing",
            Self::NumberNotNumeric => "card number contains invalid characters",
            Self::NumberChecksum => "card number failed the Luhn check",
            Self::NumberLength => "card number has the wrong length for its network",
            Self::ExpMonth => "expiry month is invalid",
            Self::ExpYear => "expiry year is invalid",
            Self::ExpiryElapsed => "card has expired",
            Self::CvcMissing => "CVC is missing",
            Self::CvcNotNumeric => "CVC contains invalid characters",
            Self::CvcLength => "CVC has the wrong length for the card network",
        }
    }

    /// Returns true if this check concerns the card number.
    pub const fn is_number_check(&self) -> bool {
        matches!(
            self,
            Self::NumberMissing | Self::NumberNotNumeric | Self::NumberChecksum | Self::NumberLength
        )
    }

    /// Returns true if this check concerns the expiry date.
    pub const fn is_expiry_check(&self) -> bool {
        matches!(self, Self::ExpMonth | Self::ExpYear | Self::ExpiryElapsed)
    }

    /// Returns true if this check concerns the CVC.
    pub const fn is_cvc_check(&self) -> bool {
        matches!(self, Self::CvcMissing | Self::CvcNotNumeric | Self::CvcLength)
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// The set of checks that failed for one card.
///
/// An empty report means the card is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationReport {
    failures: BTreeSet<Check>,
}

impl ValidationReport {
    /// Creates an empty (valid) report.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, result: Result<(), Check>) {
        if let Err(check) = result {
            self.failures.insert(check);
        }
    }

    /// Returns true if no check failed.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns true if `check` failed.
    #[inline]
    pub fn contains(&self, check: Check) -> bool {
        self.failures.contains(&check)
    }

    /// Iterates over the failed checks in a stable order.
    pub fn failures(&self) -> impl Iterator<Item = Check> + '_ {
        self.failures.iter().copied()
    }

    /// Returns the number of failed checks.
    #[inline]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Returns true if nothing failed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns true if no number check failed.
    pub fn is_number_valid(&self) -> bool {
        !self.failures.iter().any(Check::is_number_check)
    }

    /// Returns true if no expiry check failed.
    pub fn is_expiry_valid(&self) -> bool {
        !self.failures.iter().any(Check::is_expiry_check)
    }

    /// Returns true if no CVC check failed.
    pub fn is_cvc_valid(&self) -> bool {
        !self.failures.iter().any(Check::is_cvc_check)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "valid");
        }

        let descriptions: Vec<&str> = self.failures().map(|c| c.description()).collect();
        write!(f, "invalid: {}", descriptions.join("; "))
    }
}
