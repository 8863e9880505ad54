//! Expense domain errors

use core_kernel::{MemberId, Money, MoneyError};
use thiserror::Error;

/// Errors that can occur in the expense domain
#[derive(Debug, Error)]
pub enum ExpenseError {
    /// The share has already been fully repaid
    #[error("Share is already fully paid")]
    AlreadyPaid,

    /// A partial payment was larger than the outstanding balance
    #[error("Payment of {requested} exceeds the remaining {remaining}")]
    ExceedsRemaining {
        requested: Money,
        remaining: Money,
    },

    /// Expense or payment amounts must be strictly positive
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Money),

    /// An expense needs someone to split between
    #[error("An expense needs at least one participant")]
    NoParticipants,

    /// The same member was listed twice as a participant
    #[error("Duplicate participant: {member_id}")]
    DuplicateParticipant {
        member_id: MemberId,
    },

    /// Payer or participant is not an accepted member of the group
    #[error("{member_id} is not an active member of the group")]
    NotAGroupMember {
        member_id: MemberId,
    },

    /// Member is already part of the group
    #[error("{member_id} is already a member of the group")]
    AlreadyAMember {
        member_id: MemberId,
    },

    /// Money error
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
