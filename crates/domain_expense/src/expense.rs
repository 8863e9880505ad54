//! Expenses and even splitting
//!
//! An expense belongs to one group, is fronted in full by one member, and
//! owns one share per participating member. Splitting goes through
//! [`Money::allocate`] so the share amounts always sum exactly to the
//! expense total; leftover cents land on the first participants in the
//! order they were given.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use core_kernel::{ExpenseId, GroupId, MemberId, Money, ShareId};

use crate::error::ExpenseError;
use crate::group::Group;
use crate::share::Share;

/// A cost fronted by one member and split across participants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,
    /// Owning group
    pub group_id: GroupId,
    /// What the money was spent on
    pub description: String,
    /// The member who fronted the whole amount
    pub paid_by: MemberId,
    /// Total amount of the expense
    pub amount: Money,
    /// The day the expense happened
    pub date: NaiveDate,
    /// One share per participating member
    pub shares: Vec<Share>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Creates an expense split evenly across `participants`
    ///
    /// The payer and every participant must be active members of `group`.
    /// When the payer is among the participants, their own share is created
    /// already settled: they fronted the money, so their portion is not owed
    /// to anyone.
    ///
    /// # Errors
    ///
    /// - [`ExpenseError::NonPositiveAmount`] if `amount <= 0`
    /// - [`ExpenseError::NoParticipants`] if `participants` is empty
    /// - [`ExpenseError::DuplicateParticipant`] if a member is listed twice
    /// - [`ExpenseError::NotAGroupMember`] if the payer or a participant is
    ///   not currently active in the group
    /// - [`ExpenseError::Money`] if `amount` is not in the group's currency
    pub fn split_evenly(
        group: &Group,
        paid_by: MemberId,
        description: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        participants: &[MemberId],
    ) -> Result<Self, ExpenseError> {
        if !amount.is_positive() {
            return Err(ExpenseError::NonPositiveAmount(amount));
        }
        if participants.is_empty() {
            return Err(ExpenseError::NoParticipants);
        }
        if amount.currency() != group.currency {
            return Err(core_kernel::MoneyError::CurrencyMismatch(
                group.currency.to_string(),
                amount.currency().to_string(),
            )
            .into());
        }
        if !group.is_active_member(paid_by) {
            return Err(ExpenseError::NotAGroupMember { member_id: paid_by });
        }

        let mut seen = BTreeSet::new();
        for member_id in participants {
            if !group.is_active_member(*member_id) {
                return Err(ExpenseError::NotAGroupMember {
                    member_id: *member_id,
                });
            }
            if !seen.insert(*member_id) {
                return Err(ExpenseError::DuplicateParticipant {
                    member_id: *member_id,
                });
            }
        }

        let id = ExpenseId::new_v7();
        let portions = amount.allocate(participants.len() as u32)?;

        let shares = participants
            .iter()
            .zip(portions)
            .map(|(member_id, portion)| {
                if *member_id == paid_by {
                    Share::settled(id, *member_id, portion)
                } else {
                    Share::new(id, *member_id, portion)
                }
            })
            .collect();

        Ok(Self {
            id,
            group_id: group.id,
            description: description.into(),
            paid_by,
            amount,
            date,
            shares,
            created_at: Utc::now(),
        })
    }

    /// Looks up a share by id
    pub fn share(&self, share_id: ShareId) -> Option<&Share> {
        self.shares.iter().find(|s| s.id == share_id)
    }

    /// Looks up a share by id for mutation
    pub fn share_mut(&mut self, share_id: ShareId) -> Option<&mut Share> {
        self.shares.iter_mut().find(|s| s.id == share_id)
    }

    /// Looks up a member's share
    pub fn share_of(&self, member_id: MemberId) -> Option<&Share> {
        self.shares.iter().find(|s| s.member_id == member_id)
    }

    /// Sum of all share amounts; always equals the expense amount
    pub fn total_shares(&self) -> Money {
        self.shares
            .iter()
            .fold(Money::zero(self.amount.currency()), |acc, s| {
                acc + s.share_amount
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::GroupMember;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    fn group_of(names: &[&str]) -> (Group, Vec<MemberId>) {
        let mut group = Group::new("Trip", Currency::USD);
        let ids: Vec<MemberId> = names
            .iter()
            .map(|name| {
                let id = MemberId::new();
                group.add_member(GroupMember::accepted(id, *name)).unwrap();
                id
            })
            .collect();
        (group, ids)
    }

    #[test]
    fn test_even_split_absorbs_remainder_on_first_share() {
        let (group, ids) = group_of(&["Alice", "Bob", "Cara"]);

        let expense = Expense::split_evenly(
            &group,
            ids[0],
            "Groceries",
            usd(dec!(100.00)),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            &ids,
        )
        .unwrap();

        let amounts: Vec<_> = expense.shares.iter().map(|s| s.share_amount.amount()).collect();
        assert_eq!(amounts, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
        assert_eq!(expense.total_shares(), expense.amount);
    }

    #[test]
    fn test_payer_share_is_settled_on_creation() {
        let (group, ids) = group_of(&["Alice", "Bob"]);

        let expense = Expense::split_evenly(
            &group,
            ids[0],
            "Tickets",
            usd(dec!(60.00)),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            &ids,
        )
        .unwrap();

        let payer_share = expense.share_of(ids[0]).unwrap();
        assert!(payer_share.is_paid);
        assert_eq!(payer_share.paid_amount, payer_share.share_amount);

        let other_share = expense.share_of(ids[1]).unwrap();
        assert!(!other_share.is_paid);
    }

    #[test]
    fn test_payer_need_not_participate() {
        let (group, ids) = group_of(&["Alice", "Bob", "Cara"]);

        let expense = Expense::split_evenly(
            &group,
            ids[0],
            "Bob and Cara's cab",
            usd(dec!(30.00)),
            NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            &ids[1..],
        )
        .unwrap();

        assert_eq!(expense.shares.len(), 2);
        assert!(expense.share_of(ids[0]).is_none());
        assert!(expense.shares.iter().all(|s| !s.is_paid));
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let (group, ids) = group_of(&["Alice", "Bob"]);

        let result = Expense::split_evenly(
            &group,
            ids[0],
            "Nothing",
            usd(dec!(0.00)),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            &ids,
        );

        assert!(matches!(result, Err(ExpenseError::NonPositiveAmount(_))));
    }

    #[test]
    fn test_rejects_empty_participants() {
        let (group, ids) = group_of(&["Alice"]);

        let result = Expense::split_evenly(
            &group,
            ids[0],
            "Solo",
            usd(dec!(10.00)),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            &[],
        );

        assert!(matches!(result, Err(ExpenseError::NoParticipants)));
    }

    #[test]
    fn test_rejects_inactive_participant() {
        let (mut group, ids) = group_of(&["Alice", "Bob"]);
        group.member_mut(ids[1]).unwrap().leave();

        let result = Expense::split_evenly(
            &group,
            ids[0],
            "Dinner",
            usd(dec!(50.00)),
            NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
            &ids,
        );

        assert!(matches!(result, Err(ExpenseError::NotAGroupMember { .. })));
    }

    #[test]
    fn test_rejects_duplicate_participant() {
        let (group, ids) = group_of(&["Alice", "Bob"]);

        let result = Expense::split_evenly(
            &group,
            ids[0],
            "Dinner",
            usd(dec!(50.00)),
            NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
            &[ids[1], ids[1]],
        );

        assert!(matches!(result, Err(ExpenseError::DuplicateParticipant { .. })));
    }

    #[test]
    fn test_rejects_wrong_currency() {
        let (group, ids) = group_of(&["Alice", "Bob"]);

        let result = Expense::split_evenly(
            &group,
            ids[0],
            "Dinner",
            Money::new(dec!(50.00), Currency::EUR),
            NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            &ids,
        );

        assert!(matches!(result, Err(ExpenseError::Money(_))));
    }
}
