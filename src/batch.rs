//! Batch processing for many card inputs at once.
//!
//! Every input gets its own [`CardValidator`]. The only shared state is the
//! read-only reference date, so the `parallel` feature can fan the work out
//! with rayon without any synchronization.

use tracing::debug;

use crate::expiry::ReferenceDate;
use crate::report::ValidationReport;
use crate::validator::{CardInput, CardValidator};

/// Validates batches of cards against one reference date.
///
/// # Example
///
/// ```
/// use cardcheck::{BatchValidator, CardInput, ReferenceDate};
///
/// let batch = BatchValidator::new(ReferenceDate::new(2024, 1).unwrap());
/// let cards = vec![
///     CardInput::new("4242424242424242").with_expiry(12, 2030),
///     CardInput::new("4242424242424241").with_expiry(12, 2030),
/// ];
///
/// assert_eq!(batch.validate_all(&cards), vec![true, false]);
/// assert_eq!(batch.count_valid(&cards), (1, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchValidator {
    reference: ReferenceDate,
}

impl BatchValidator {
    /// Creates a batch validator that judges expiry against `reference`.
    #[inline]
    pub fn new(reference: ReferenceDate) -> Self {
        Self { reference }
    }

    /// Returns the reference date.
    #[inline]
    pub fn reference(&self) -> ReferenceDate {
        self.reference
    }

    /// Runs `validate_all` on each card, preserving input order.
    pub fn validate_all(&self, cards: &[CardInput]) -> Vec<bool> {
        debug!(count = cards.len(), "validating batch");
        cards.iter().map(|card| self.validate_one(card)).collect()
    }

    /// Builds a report for each card, preserving input order.
    pub fn reports(&self, cards: &[CardInput]) -> Vec<ValidationReport> {
        cards
            .iter()
            .map(|card| CardValidator::new(card, self.reference).report())
            .collect()
    }

    /// Counts valid and invalid cards without collecting per-card results.
    ///
    /// # Returns
    ///
    /// Tuple of (valid_count, invalid_count)
    pub fn count_valid(&self, cards: &[CardInput]) -> (usize, usize) {
        let valid = cards.iter().filter(|card| self.validate_one(card)).count();
        (valid, cards.len() - valid)
    }

    /// Validates cards in parallel using rayon.
    ///
    /// # Feature
    ///
    /// Requires the `parallel` feature to be enabled.
    #[cfg(feature = "parallel")]
    pub fn validate_parallel(&self, cards: &[CardInput]) -> Vec<bool> {
        use rayon::prelude::*;
        debug!(count = cards.len(), "validating batch in parallel");
        cards.par_iter().map(|card| self.validate_one(card)).collect()
    }

    /// Counts valid and invalid cards in parallel.
    ///
    /// # Feature
    ///
    /// Requires the `parallel` feature to be enabled.
    #[cfg(feature = "parallel")]
    pub fn count_valid_parallel(&self, cards: &[CardInput]) -> (usize, usize) {
        use rayon::prelude::*;
        let valid = cards
            .par_iter()
            .filter(|card| self.validate_one(card))
            .count();
        (valid, cards.len() - valid)
    }

    #[inline]
    fn validate_one(&self, card: &CardInput) -> bool {
        CardValidator::new(card, self.reference).validate_all()
    }
}
