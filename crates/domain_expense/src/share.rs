//! Expense shares and the share payment ledger
//!
//! A share is one member's portion of an expense. It tracks how much of
//! that portion has been repaid and holds the payment history that got it
//! there. The recording operations here are the only way `paid_amount`
//! moves, which keeps the ledger invariants local:
//!
//! - `0 <= paid_amount <= share_amount`
//! - `is_paid == (paid_amount >= share_amount)`
//! - the sum of recorded payment amounts equals `paid_amount`
//!
//! Callers that persist shares must wrap read-validate-write in a single
//! transaction (see [`crate::ports::ExpenseStore::record_payment`]); two
//! racing payments must not both pass the remaining-amount check.

use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{ExpenseId, MemberId, Money, ShareId};

use crate::error::ExpenseError;
use crate::payment::{Payment, PaymentReceipt};

/// One member's portion of an expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Share {
    /// Unique identifier
    pub id: ShareId,
    /// Owning expense
    pub expense_id: ExpenseId,
    /// The member this portion belongs to
    pub member_id: MemberId,
    /// The member's portion of the expense total
    pub share_amount: Money,
    /// Cumulative amount repaid, monotonically non-decreasing
    pub paid_amount: Money,
    /// True once the share is fully repaid
    pub is_paid: bool,
    /// Repayment history, oldest first
    pub payments: Vec<Payment>,
}

impl Share {
    /// Creates an unpaid share
    pub fn new(expense_id: ExpenseId, member_id: MemberId, share_amount: Money) -> Self {
        Self {
            id: ShareId::new_v7(),
            expense_id,
            member_id,
            share_amount,
            paid_amount: Money::zero(share_amount.currency()),
            is_paid: false,
            payments: Vec::new(),
        }
    }

    /// Creates a share that is settled from the start
    ///
    /// Used for the payer's own share: they front the whole expense, so
    /// their portion is never owed to anyone. A single payment record is
    /// written so the payment history still accounts for the full
    /// `paid_amount`.
    pub fn settled(expense_id: ExpenseId, member_id: MemberId, share_amount: Money) -> Self {
        let mut share = Self::new(expense_id, member_id, share_amount);
        share
            .payments
            .push(Payment::new(share.id, share_amount, Some("Fronted by payer".to_string())));
        share.paid_amount = share_amount;
        share.is_paid = true;
        share
    }

    /// Amount still outstanding on this share
    pub fn remaining(&self) -> Money {
        self.share_amount - self.paid_amount
    }

    /// Settles the share in one payment for the exact outstanding amount
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseError::AlreadyPaid`] if the share is already settled;
    /// the share is left untouched.
    pub fn record_full_payment(&mut self) -> Result<PaymentReceipt, ExpenseError> {
        if self.is_paid {
            return Err(ExpenseError::AlreadyPaid);
        }

        let remaining = self.remaining();
        let payment = Payment::new(self.id, remaining, Some("Full payment".to_string()));

        self.paid_amount = self.share_amount;
        self.is_paid = true;
        self.payments.push(payment.clone());

        debug!(share = %self.id, amount = %remaining, "share settled in full");

        Ok(PaymentReceipt {
            payment,
            remaining: Money::zero(self.share_amount.currency()),
            share_settled: true,
        })
    }

    /// Records a repayment of `amount` against this share
    ///
    /// A payment for exactly the outstanding amount settles the share.
    ///
    /// # Errors
    ///
    /// - [`ExpenseError::NonPositiveAmount`] if `amount <= 0`
    /// - [`ExpenseError::AlreadyPaid`] if the share is already settled
    /// - [`ExpenseError::ExceedsRemaining`] if `amount` is greater than the
    ///   outstanding balance
    ///
    /// The share is left untouched on every error path.
    pub fn record_partial_payment(
        &mut self,
        amount: Money,
        note: Option<String>,
    ) -> Result<PaymentReceipt, ExpenseError> {
        if !amount.is_positive() {
            return Err(ExpenseError::NonPositiveAmount(amount));
        }
        if self.is_paid {
            return Err(ExpenseError::AlreadyPaid);
        }

        // Checked arithmetic first: a currency mismatch must surface as a
        // Money error, not slip through an unordered comparison.
        let new_paid = self.paid_amount.checked_add(&amount)?;
        let remaining = self.remaining();
        if amount > remaining {
            return Err(ExpenseError::ExceedsRemaining {
                requested: amount,
                remaining,
            });
        }

        let payment = Payment::new(self.id, amount, note);
        self.paid_amount = new_paid;
        self.is_paid = self.paid_amount >= self.share_amount;
        self.payments.push(payment.clone());

        let remaining = self.remaining();
        debug!(
            share = %self.id,
            amount = %amount,
            remaining = %remaining,
            settled = self.is_paid,
            "partial payment recorded"
        );

        Ok(PaymentReceipt {
            payment,
            remaining,
            share_settled: self.is_paid,
        })
    }
}
