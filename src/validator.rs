//! Card validation orchestration.
//!
//! A [`CardValidator`] borrows one [`CardInput`] and a [`ReferenceDate`] and
//! answers boolean questions about it:
//!
//! 1. Number: non-blank, digits only after stripping whitespace and hyphens,
//!    Luhn checksum, and the exact length its network requires
//! 2. Expiry: month in 1-12, year not over, month not elapsed
//! 3. CVC: digits only, length for the network
//!
//! Invalid input is never an error. Every predicate returns `false` and
//! [`CardValidator::report`] says which sub-checks failed.
//!
//! The network is classified from the number exactly as the caller supplied
//! it, separators included, while the checksum and length checks run on the
//! separator-free copy. A separator inside the prefix region therefore
//! changes the network and with it the required length.

use std::fmt;

use tracing::{debug, trace};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::cvc::check_cvc;
use crate::expiry::{has_month_passed, has_year_passed, is_valid_month, ReferenceDate};
use crate::luhn;
use crate::mask::mask_number;
use crate::network::{classify, CardNetwork};
use crate::normalize::{is_whole_positive_number, non_blank, remove_separators};
use crate::report::{Check, ValidationReport};

/// The card fields a caller wants validated.
///
/// Every field is optional; absent fields simply fail their checks. The
/// number may contain spaces and hyphens. Fields are zeroed on drop.
///
/// # Example
///
/// ```
/// use cardcheck::CardInput;
///
/// let input = CardInput::new("4242 4242 4242 4242")
///     .with_expiry(12, 2030)
///     .with_cvc("123");
///
/// // Debug output never exposes the number or CVC
/// let debug = format!("{:?}", input);
/// assert!(!debug.contains("4242 4242 4242 4242"));
/// ```
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardInput {
    /// Card number, possibly with spaces and hyphens.
    pub number: Option<String>,
    /// Expiry month (1-12).
    pub exp_month: Option<i32>,
    /// Expiry year, two or four digits.
    pub exp_year: Option<i32>,
    /// Card verification code.
    pub cvc: Option<String>,
}

impl CardInput {
    /// Creates an input holding only a card number.
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: Some(number.into()),
            exp_month: None,
            exp_year: None,
            cvc: None,
        }
    }

    /// Sets the expiry month and year.
    pub fn with_expiry(mut self, month: i32, year: i32) -> Self {
        self.exp_month = Some(month);
        self.exp_year = Some(year);
        self
    }

    /// Sets the CVC.
    pub fn with_cvc(mut self, cvc: impl Into<String>) -> Self {
        self.cvc = Some(cvc.into());
        self
    }

    /// Returns true if a non-blank CVC was supplied.
    ///
    /// A blank CVC counts as not supplied, so flows that never collect a CVC
    /// can pass an empty field.
    #[inline]
    pub fn has_cvc(&self) -> bool {
        non_blank(self.cvc.as_deref()).is_some()
    }
}

impl fmt::Debug for CardInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardInput")
            .field("number", &self.number.as_deref().map(mask_number))
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .field("cvc", &self.cvc.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Validates one card against a reference date.
///
/// Construct one per validation request; it holds no state beyond the
/// borrowed input.
///
/// # Example
///
/// ```
/// use cardcheck::{CardInput, CardNetwork, CardValidator, ReferenceDate};
///
/// let today = ReferenceDate::new(2024, 1).unwrap();
/// let input = CardInput::new("4242424242424242")
///     .with_expiry(12, 2030)
///     .with_cvc("123");
///
/// let validator = CardValidator::new(&input, today);
/// assert_eq!(validator.network(), Some(CardNetwork::Visa));
/// assert!(validator.validate_all());
/// ```
pub struct CardValidator<'a> {
    input: &'a CardInput,
    reference: ReferenceDate,
}

impl<'a> CardValidator<'a> {
    /// Creates a validator for `input`, judging expiry against `reference`.
    #[inline]
    pub fn new(input: &'a CardInput, reference: ReferenceDate) -> Self {
        Self { input, reference }
    }

    /// Returns the input being validated.
    #[inline]
    pub fn input(&self) -> &'a CardInput {
        self.input
    }

    /// Returns the reference date used for expiry checks.
    #[inline]
    pub fn reference(&self) -> ReferenceDate {
        self.reference
    }

    /// Classifies the number as supplied.
    ///
    /// `None` when the number is absent or blank.
    #[inline]
    pub fn network(&self) -> Option<CardNetwork> {
        self.input.number.as_deref().and_then(classify)
    }

    /// Returns true if the number is well-formed, passes Luhn, and has the
    /// length its network requires.
    pub fn validate_number(&self) -> bool {
        let result = self.check_input_number();
        trace!(
            number = %self.masked_number(),
            valid = result.is_ok(),
            "number checked"
        );
        result.is_ok()
    }

    /// Returns true if a CVC is present and valid for the network.
    ///
    /// If the number is blank any 3 or 4 digit CVC is accepted.
    pub fn validate_cvc(&self) -> bool {
        let valid = self
            .input
            .cvc
            .as_deref()
            .is_some_and(|cvc| check_cvc(cvc, self.network()).is_ok());
        trace!(network = ?self.network(), valid, "cvc checked");
        valid
    }

    /// Returns true if the expiry month is present and in 1-12.
    #[inline]
    pub fn validate_exp_month(&self) -> bool {
        self.input.exp_month.is_some_and(is_valid_month)
    }

    /// Returns true if the expiry year is present and not before the
    /// reference year. Two-digit years are read in the reference century.
    #[inline]
    pub fn validate_exp_year(&self) -> bool {
        self.input
            .exp_year
            .is_some_and(|year| !has_year_passed(year, self.reference))
    }

    /// Returns true if month and year are valid and the expiry month has not
    /// elapsed. A card expiring in the reference month is still valid.
    pub fn validate_expiry_date(&self) -> bool {
        let valid = self.check_expiry().is_empty();
        trace!(reference = %self.reference, valid, "expiry checked");
        valid
    }

    /// Combines the number, expiry and (if one was supplied) CVC verdicts.
    pub fn validate_all(&self) -> bool {
        let valid = self.validate_number()
            && self.validate_expiry_date()
            && (!self.input.has_cvc() || self.validate_cvc());

        debug!(
            network = ?self.network(),
            number = %self.masked_number(),
            cvc_supplied = self.input.has_cvc(),
            valid,
            "card validated"
        );
        valid
    }

    /// Runs every applicable check and records each failure.
    ///
    /// Unlike the predicates this does not stop at the first failing field.
    /// `report().is_valid()` always agrees with [`validate_all`](Self::validate_all).
    pub fn report(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        report.record(self.check_input_number().map(|_| ()));

        for check in self.check_expiry() {
            report.record(Err(check));
        }

        if let Some(cvc) = non_blank(self.input.cvc.as_deref()) {
            report.record(check_cvc(cvc, self.network()));
        }

        debug!(
            network = ?self.network(),
            number = %self.masked_number(),
            %report,
            "card report built"
        );
        report
    }

    fn check_input_number(&self) -> Result<CardNetwork, Check> {
        self.input
            .number
            .as_deref()
            .map_or(Err(Check::NumberMissing), check_number)
    }

    fn check_expiry(&self) -> Vec<Check> {
        let month_ok = self.validate_exp_month();
        let year_ok = self.validate_exp_year();

        let mut failures = Vec::new();
        if !month_ok {
            failures.push(Check::ExpMonth);
        }
        if !year_ok {
            failures.push(Check::ExpYear);
        }

        if let (true, true, Some(month), Some(year)) =
            (month_ok, year_ok, self.input.exp_month, self.input.exp_year)
        {
            if has_month_passed(year, month, self.reference) {
                failures.push(Check::ExpiryElapsed);
            }
        }

        failures
    }

    fn masked_number(&self) -> String {
        self.input.number.as_deref().map(mask_number).unwrap_or_default()
    }
}

impl fmt::Debug for CardValidator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardValidator")
            .field("input", self.input)
            .field("network", &self.network())
            .field("reference", &self.reference)
            .finish()
    }
}

/// Checks a card number and reports which sub-check failed first.
///
/// Returns the network on success. Needs no reference date.
///
/// # Example
///
/// ```
/// use cardcheck::{check_number, CardNetwork, Check};
///
/// assert_eq!(check_number("4242 4242 4242 4242"), Ok(CardNetwork::Visa));
/// assert_eq!(check_number("4242424242424241"), Err(Check::NumberChecksum));
/// ```
pub fn check_number(number: &str) -> Result<CardNetwork, Check> {
    let number = non_blank(Some(number)).ok_or(Check::NumberMissing)?;
    let Some(network) = classify(number) else {
        return Err(Check::NumberMissing);
    };

    let normalized = Zeroizing::new(remove_separators(number));
    if normalized.is_empty() {
        return Err(Check::NumberMissing);
    }
    if !is_whole_positive_number(&normalized) {
        return Err(Check::NumberNotNumeric);
    }
    if !luhn::is_valid_luhn_number(&normalized) {
        return Err(Check::NumberChecksum);
    }
    if !network.is_valid_length(normalized.len()) {
        return Err(Check::NumberLength);
    }

    Ok(network)
}

/// Returns true if `number` is a valid card number.
///
/// Shorthand for building a validator around a number-only input.
///
/// # Example
///
/// ```
/// use cardcheck::validate_number;
///
/// assert!(validate_number("4242-4242-4242-4242"));
/// assert!(!validate_number("4242424242424241"));
/// assert!(!validate_number(""));
/// ```
#[inline]
pub fn validate_number(number: &str) -> bool {
    check_number(number).is_ok()
}

/// Returns true if `cvc` is valid for `network`.
///
/// Pass `None` when the number is blank and so has no classification.
#[inline]
pub fn validate_cvc(cvc: &str, network: Option<CardNetwork>) -> bool {
    check_cvc(cvc, network).is_ok()
}
