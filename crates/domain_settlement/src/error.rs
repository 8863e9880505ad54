//! Settlement domain errors

use core_kernel::{Currency, MoneyError};
use thiserror::Error;

/// Errors that can occur in the settlement domain
///
/// Given well-formed single-currency input, balance aggregation and debt
/// simplification cannot fail; these cover malformed snapshots only.
#[derive(Debug, Error)]
pub enum SettlementError {
    /// An expense is not in the group's currency
    #[error("Currency mismatch: group settles in {expected}, expense is in {found}")]
    CurrencyMismatch {
        expected: Currency,
        found: Currency,
    },

    /// Money error
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
