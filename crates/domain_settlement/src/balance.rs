//! Balance aggregation
//!
//! Folds a group's expenses into one signed net balance per active member.
//! Positive means the member is owed money, negative means they owe. The
//! fold is zero-sum by construction: every amount credited to a payer is
//! offset exactly by the amounts debited across payer and debtors.
//!
//! Balances are a view, never stored: any mutation to an expense, share,
//! or payment in the group invalidates them, and callers recompute from a
//! fresh snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use core_kernel::{Currency, MemberId, Money};
use domain_expense::{Expense, Group};

use crate::error::SettlementError;

/// Per-member net balances for one group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheet {
    currency: Currency,
    entries: BTreeMap<MemberId, Money>,
}

/// One row of a balance report, carrying the member's display name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceLine {
    pub member_id: MemberId,
    pub display_name: String,
    pub amount: Money,
}

impl BalanceSheet {
    fn seeded(currency: Currency, members: impl IntoIterator<Item = MemberId>) -> Self {
        Self {
            currency,
            entries: members
                .into_iter()
                .map(|id| (id, Money::zero(currency)))
                .collect(),
        }
    }

    /// The currency every balance is denominated in
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Looks up a member's balance; `None` for members outside the sheet
    pub fn balance_of(&self, member_id: MemberId) -> Option<Money> {
        self.entries.get(&member_id).copied()
    }

    /// Iterates balances in ascending member-id order
    pub fn iter(&self) -> impl Iterator<Item = (&MemberId, &Money)> {
        self.entries.iter()
    }

    /// Number of members on the sheet
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no members are on the sheet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances; stays within a rounding epsilon of zero
    pub fn total(&self) -> Money {
        self.entries
            .values()
            .fold(Money::zero(self.currency), |acc, m| acc + *m)
    }

    /// Returns true if every balance is within `epsilon` of zero
    pub fn is_settled(&self, epsilon: Decimal) -> bool {
        self.entries.values().all(|m| m.amount().abs() <= epsilon)
    }

    /// Report rows with display names, ordered by member id
    pub fn report(&self, group: &Group) -> Vec<BalanceLine> {
        self.entries
            .iter()
            .map(|(member_id, amount)| BalanceLine {
                member_id: *member_id,
                display_name: group
                    .member(*member_id)
                    .map(|m| m.display_name.clone())
                    .unwrap_or_default(),
                amount: *amount,
            })
            .collect()
    }

    fn credit(&mut self, member_id: MemberId, amount: Money) -> Result<(), SettlementError> {
        if let Some(balance) = self.entries.get_mut(&member_id) {
            *balance = balance.checked_add(&amount)?;
        } else {
            debug!(member = %member_id, amount = %amount, "skipping contribution for inactive member");
        }
        Ok(())
    }

    fn debit(&mut self, member_id: MemberId, amount: Money) -> Result<(), SettlementError> {
        if let Some(balance) = self.entries.get_mut(&member_id) {
            *balance = balance.checked_sub(&amount)?;
        } else {
            debug!(member = %member_id, amount = %amount, "skipping contribution for inactive member");
        }
        Ok(())
    }
}

/// Computes net balances for a group from a snapshot of its expenses
///
/// For every expense, the payer is credited the full amount they fronted;
/// each share then debits its repaid portion back against the payer (the
/// repayments reduced what the payer is owed) and its unpaid remainder
/// against the share's member. Contributions that reference members outside
/// the group's current active set are dropped, not errors: they belong to
/// members who have since left.
///
/// # Errors
///
/// Returns [`SettlementError::CurrencyMismatch`] if any expense is not in
/// the group's currency.
pub fn compute_balances(
    group: &Group,
    expenses: &[Expense],
) -> Result<BalanceSheet, SettlementError> {
    let mut sheet = BalanceSheet::seeded(group.currency, group.active_member_ids());

    for expense in expenses {
        if expense.amount.currency() != group.currency {
            return Err(SettlementError::CurrencyMismatch {
                expected: group.currency,
                found: expense.amount.currency(),
            });
        }

        sheet.credit(expense.paid_by, expense.amount)?;

        for share in &expense.shares {
            if share.paid_amount.is_positive() {
                sheet.debit(expense.paid_by, share.paid_amount)?;
            }

            let unpaid = share.remaining();
            if unpaid.is_positive() {
                sheet.debit(share.member_id, unpaid)?;
            }
        }
    }

    debug!(
        group = %group.id,
        members = sheet.len(),
        expenses = expenses.len(),
        "balances computed"
    );

    Ok(sheet)
}
