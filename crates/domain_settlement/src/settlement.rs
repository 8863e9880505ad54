//! Debt simplification
//!
//! Turns a balance sheet into point-to-point transfers that settle the
//! group. Greedy matching: the largest-outstanding creditor and debtor at
//! the heads of the queues are paired off until one side is exhausted.
//! Member queues are built in ascending member-id order, so the output is
//! a deterministic function of the balance sheet contents. The plan is at
//! most `nonzero_members - 1` transfers; it is a greedy approximation, not
//! a guaranteed global minimum.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

use core_kernel::{MemberId, Money};
use domain_expense::{Expense, Group};

use crate::balance::{compute_balances, BalanceSheet};
use crate::error::SettlementError;

/// Balances within this tolerance of zero count as settled
pub const SETTLEMENT_EPSILON: Decimal = dec!(0.01);

/// A suggested payment from one member to another
///
/// Always recomputed from current balances, never stored as authoritative
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementTransfer {
    /// The member who pays
    pub from: MemberId,
    /// The member who receives
    pub to: MemberId,
    /// Transfer amount
    pub amount: Money,
}

/// Balances and the transfer plan that settles them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settlement {
    pub balances: BalanceSheet,
    pub transfers: Vec<SettlementTransfer>,
}

/// Computes the transfers that settle every balance on the sheet
///
/// Pure and side-effect free; safe to recompute on every request.
pub fn simplify_debts(sheet: &BalanceSheet) -> Vec<SettlementTransfer> {
    let currency = sheet.currency();

    // Queues keep insertion order, which is ascending member id
    let mut creditors: VecDeque<(MemberId, Decimal)> = VecDeque::new();
    let mut debtors: VecDeque<(MemberId, Decimal)> = VecDeque::new();

    for (member_id, balance) in sheet.iter() {
        let amount = balance.amount();
        if amount > SETTLEMENT_EPSILON {
            creditors.push_back((*member_id, amount));
        } else if amount < -SETTLEMENT_EPSILON {
            debtors.push_back((*member_id, -amount));
        }
    }

    let mut transfers = Vec::new();

    loop {
        let Some(creditor) = creditors.front_mut() else { break };
        let Some(debtor) = debtors.front_mut() else { break };

        let transfer = creditor.1.min(debtor.1);
        if transfer > SETTLEMENT_EPSILON {
            transfers.push(SettlementTransfer {
                from: debtor.0,
                to: creditor.0,
                amount: Money::new(transfer, currency),
            });
        }

        creditor.1 -= transfer;
        debtor.1 -= transfer;

        if creditor.1 <= SETTLEMENT_EPSILON {
            creditors.pop_front();
        }
        if debtor.1 <= SETTLEMENT_EPSILON {
            debtors.pop_front();
        }
    }

    debug!(transfers = transfers.len(), "debts simplified");

    transfers
}

/// Computes balances and the settlement plan in one call
pub fn settle(group: &Group, expenses: &[Expense]) -> Result<Settlement, SettlementError> {
    let balances = compute_balances(group, expenses)?;
    let transfers = simplify_debts(&balances);
    Ok(Settlement {
        balances,
        transfers,
    })
}
