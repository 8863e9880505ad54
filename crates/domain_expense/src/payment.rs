//! Payment records
//!
//! A payment is an immutable record of one repayment event against a share.
//! Shares accumulate payments; the sum of a share's payment amounts always
//! equals its `paid_amount`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Money, PaymentId, ShareId};

/// A single repayment against a share
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Share being repaid
    pub share_id: ShareId,
    /// Amount repaid
    pub amount: Money,
    /// When the payment happened
    pub paid_at: DateTime<Utc>,
    /// Optional note
    pub note: Option<String>,
}

impl Payment {
    /// Creates a new payment record
    pub fn new(share_id: ShareId, amount: Money, note: Option<String>) -> Self {
        Self {
            id: PaymentId::new_v7(),
            share_id,
            amount,
            paid_at: Utc::now(),
            note,
        }
    }
}

/// The outcome handed back to the caller of a payment-recording operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// The payment that was recorded
    pub payment: Payment,
    /// Amount still outstanding on the share after this payment
    pub remaining: Money,
    /// True if this payment settled the share in full
    pub share_settled: bool,
}
