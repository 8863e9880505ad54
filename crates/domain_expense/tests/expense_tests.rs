//! Comprehensive tests for domain_expense

use core_kernel::{Currency, MemberId, Money, PortError};
use rust_decimal_macros::dec;

use domain_expense::expense::Expense;
use domain_expense::group::{Group, GroupMember, MembershipStatus};
use domain_expense::share::Share;
use domain_expense::ExpenseError;

use test_utils::{
    assert_money_sum_equals, ExpenseBuilder, GroupBuilder, GroupFixtures, MemberFixtures,
    MoneyFixtures,
};

fn usd(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount, Currency::USD)
}

// ============================================================================
// Group Membership Tests
// ============================================================================

mod membership_tests {
    use super::*;

    #[test]
    fn test_invited_member_becomes_active_on_accept() {
        let bob = MemberFixtures::bob();
        let mut group = GroupBuilder::new()
            .with_membership(GroupMember::invited(bob, "Bob"))
            .build();

        assert!(!group.is_active_member(bob));

        group.member_mut(bob).unwrap().accept();
        assert!(group.is_active_member(bob));
    }

    #[test]
    fn test_rejected_member_never_counts() {
        let bob = MemberFixtures::bob();
        let mut group = GroupBuilder::new()
            .with_membership(GroupMember::invited(bob, "Bob"))
            .build();

        group.member_mut(bob).unwrap().reject();

        assert!(!group.is_active_member(bob));
        assert_eq!(group.member(bob).unwrap().status, MembershipStatus::Rejected);
    }

    #[test]
    fn test_active_member_ids_are_sorted() {
        let (group, ids) = GroupFixtures::four_member_group();
        let sorted: Vec<MemberId> = group.active_member_ids().into_iter().collect();
        assert_eq!(sorted, ids.to_vec());
    }

    #[test]
    fn test_duplicate_membership_is_rejected() {
        let alice = MemberFixtures::alice();
        let mut group = GroupBuilder::new().with_named_member(alice, "Alice").build();

        let result = group.add_member(GroupMember::invited(alice, "Alice again"));
        assert!(matches!(result, Err(ExpenseError::AlreadyAMember { .. })));
    }
}

// ============================================================================
// Even Split Tests
// ============================================================================

mod split_tests {
    use super::*;

    #[test]
    fn test_one_hundred_three_ways() {
        let (group, ids) = GroupFixtures::four_member_group();

        let expense = ExpenseBuilder::new(ids[0])
            .with_amount(MoneyFixtures::usd_100())
            .with_participants(&ids[..3])
            .build(&group)
            .unwrap();

        let amounts: Vec<_> = expense
            .shares
            .iter()
            .map(|s| s.share_amount)
            .collect();
        assert_eq!(amounts[0].amount(), dec!(33.34));
        assert_eq!(amounts[1].amount(), dec!(33.33));
        assert_eq!(amounts[2].amount(), dec!(33.33));
        assert_money_sum_equals(&amounts, &MoneyFixtures::usd_100());
    }

    #[test]
    fn test_every_member_gets_exactly_one_share() {
        let (group, ids) = GroupFixtures::four_member_group();

        let expense = ExpenseBuilder::new(ids[1])
            .with_amount(usd(dec!(80.00)))
            .build(&group)
            .unwrap();

        assert_eq!(expense.shares.len(), 4);
        for id in ids {
            assert!(expense.share_of(id).is_some());
        }
    }

    #[test]
    fn test_payer_share_is_prepaid_others_are_not() {
        let (group, ids) = GroupFixtures::four_member_group();

        let expense = ExpenseBuilder::new(ids[1])
            .with_amount(usd(dec!(80.00)))
            .build(&group)
            .unwrap();

        for share in &expense.shares {
            if share.member_id == ids[1] {
                assert!(share.is_paid);
                assert_eq!(share.paid_amount, share.share_amount);
                assert_eq!(share.payments.len(), 1);
            } else {
                assert!(!share.is_paid);
                assert!(share.paid_amount.is_zero());
                assert!(share.payments.is_empty());
            }
        }
    }

    #[test]
    fn test_split_rejects_payer_outside_group() {
        let (group, _) = GroupFixtures::four_member_group();
        let stranger = MemberId::new();

        let result = ExpenseBuilder::new(stranger).build(&group);
        assert!(matches!(result, Err(ExpenseError::NotAGroupMember { .. })));
    }

    #[test]
    fn test_split_rejects_invited_participant() {
        let alice = MemberFixtures::alice();
        let bob = MemberFixtures::bob();
        let group = GroupBuilder::new()
            .with_named_member(alice, "Alice")
            .with_membership(GroupMember::invited(bob, "Bob"))
            .build();

        let result = ExpenseBuilder::new(alice)
            .with_participants(&[alice, bob])
            .build(&group);

        assert!(matches!(
            result,
            Err(ExpenseError::NotAGroupMember { member_id }) if member_id == bob
        ));
    }

    #[test]
    fn test_split_rejects_foreign_currency() {
        let (group, ids) = GroupFixtures::four_member_group();

        let result = ExpenseBuilder::new(ids[0])
            .with_amount(MoneyFixtures::eur_100())
            .build(&group);

        assert!(matches!(result, Err(ExpenseError::Money(_))));
    }
}

// ============================================================================
// Share Ledger Tests
// ============================================================================

mod ledger_tests {
    use super::*;

    fn unpaid_share(amount: rust_decimal::Decimal) -> Share {
        Share::new(
            core_kernel::ExpenseId::new(),
            MemberFixtures::bob(),
            usd(amount),
        )
    }

    #[test]
    fn test_full_payment_records_exact_remainder() {
        let mut share = unpaid_share(dec!(33.34));

        let receipt = share.record_full_payment().unwrap();

        assert_eq!(receipt.payment.amount, usd(dec!(33.34)));
        assert_eq!(receipt.payment.note.as_deref(), Some("Full payment"));
        assert!(receipt.share_settled);
    }

    #[test]
    fn test_full_payment_twice_is_already_paid() {
        let mut share = unpaid_share(dec!(20.00));
        share.record_full_payment().unwrap();

        let before_payments = share.payments.len();
        let result = share.record_full_payment();

        assert!(matches!(result, Err(ExpenseError::AlreadyPaid)));
        assert_eq!(share.payments.len(), before_payments);
        assert_eq!(share.paid_amount, usd(dec!(20.00)));
    }

    #[test]
    fn test_partial_payments_accumulate() {
        let mut share = unpaid_share(dec!(50.00));

        share.record_partial_payment(usd(dec!(20.00)), None).unwrap();
        let receipt = share
            .record_partial_payment(usd(dec!(10.00)), Some("venmo".into()))
            .unwrap();

        assert_eq!(share.paid_amount, usd(dec!(30.00)));
        assert_eq!(receipt.remaining, usd(dec!(20.00)));
        assert!(!receipt.share_settled);
        assert_eq!(share.payments.len(), 2);
    }

    #[test]
    fn test_exact_remaining_partial_payment_settles_share() {
        let mut share = unpaid_share(dec!(50.00));
        share.record_partial_payment(usd(dec!(20.00)), None).unwrap();

        let receipt = share.record_partial_payment(usd(dec!(30.00)), None).unwrap();

        assert!(receipt.share_settled);
        assert!(share.is_paid);
        assert!(share.remaining().is_zero());
    }

    #[test]
    fn test_one_cent_over_remaining_fails() {
        let mut share = unpaid_share(dec!(50.00));
        share.record_partial_payment(usd(dec!(20.00)), None).unwrap();

        let result = share.record_partial_payment(usd(dec!(30.01)), None);

        match result {
            Err(ExpenseError::ExceedsRemaining { requested, remaining }) => {
                assert_eq!(requested, usd(dec!(30.01)));
                assert_eq!(remaining, usd(dec!(30.00)));
            }
            other => panic!("Expected ExceedsRemaining, got {other:?}"),
        }
        assert_eq!(share.paid_amount, usd(dec!(20.00)));
    }

    #[test]
    fn test_partial_payment_on_settled_share_fails() {
        let mut share = unpaid_share(dec!(10.00));
        share.record_full_payment().unwrap();

        let result = share.record_partial_payment(usd(dec!(0.01)), None);
        assert!(matches!(result, Err(ExpenseError::AlreadyPaid)));
    }

    #[test]
    fn test_history_always_accounts_for_paid_amount() {
        let mut share = unpaid_share(dec!(41.00));
        share.record_partial_payment(usd(dec!(0.50)), None).unwrap();
        share.record_partial_payment(usd(dec!(40.49)), None).unwrap();
        share.record_full_payment().unwrap();

        let history: Vec<Money> = share.payments.iter().map(|p| p.amount).collect();
        assert_money_sum_equals(&history, &share.paid_amount);
    }
}

// ============================================================================
// Ledger Property Tests
// ============================================================================

mod ledger_proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn partial_payments_never_exceed_share_amount(
            share_minor in 100i64..100_000i64,
            payments in proptest::collection::vec(1i64..50_000i64, 1..10)
        ) {
            let mut share = Share::new(
                core_kernel::ExpenseId::new(),
                MemberId::new(),
                Money::from_minor(share_minor, Currency::USD),
            );

            for payment_minor in payments {
                let amount = Money::from_minor(payment_minor, Currency::USD);
                let _ = share.record_partial_payment(amount, None);
                prop_assert!(share.paid_amount <= share.share_amount);
                prop_assert_eq!(share.is_paid, share.paid_amount >= share.share_amount);
            }
        }

        #[test]
        fn payment_history_sums_to_paid_amount(
            share_minor in 100i64..100_000i64,
            payments in proptest::collection::vec(1i64..50_000i64, 1..10)
        ) {
            let mut share = Share::new(
                core_kernel::ExpenseId::new(),
                MemberId::new(),
                Money::from_minor(share_minor, Currency::USD),
            );

            for payment_minor in payments {
                let _ = share.record_partial_payment(
                    Money::from_minor(payment_minor, Currency::USD),
                    None,
                );
            }

            let total = share
                .payments
                .iter()
                .fold(Money::zero(Currency::USD), |acc, p| acc + p.amount);
            prop_assert_eq!(total, share.paid_amount);
        }
    }
}

// ============================================================================
// Port Contract Tests
// ============================================================================

mod port_tests {
    use super::*;
    use async_trait::async_trait;
    use domain_expense::payment::Payment;
    use domain_expense::ports::ExpenseStore;
    use std::sync::Mutex;

    /// In-memory store used to exercise the atomic record_payment contract
    struct InMemoryExpenseStore {
        expenses: Mutex<Vec<Expense>>,
    }

    impl InMemoryExpenseStore {
        fn new(expenses: Vec<Expense>) -> Self {
            Self {
                expenses: Mutex::new(expenses),
            }
        }
    }

    impl core_kernel::DomainPort for InMemoryExpenseStore {}

    #[async_trait]
    impl ExpenseStore for InMemoryExpenseStore {
        async fn load_group_expenses(
            &self,
            group_id: core_kernel::GroupId,
        ) -> Result<Vec<Expense>, PortError> {
            let expenses = self.expenses.lock().expect("store poisoned");
            Ok(expenses
                .iter()
                .filter(|e| e.group_id == group_id)
                .cloned()
                .collect())
        }

        async fn record_payment(
            &self,
            share: &Share,
            payment: &Payment,
        ) -> Result<(), PortError> {
            // The lock is the transactional boundary: validate against the
            // stored share, not the caller's snapshot
            let mut expenses = self.expenses.lock().expect("store poisoned");
            let stored = expenses
                .iter_mut()
                .find_map(|e| e.share_mut(share.id))
                .ok_or_else(|| PortError::not_found("Share", share.id))?;

            if payment.amount > stored.remaining() {
                return Err(PortError::conflict("payment exceeds remaining on stored share"));
            }
            stored
                .record_partial_payment(payment.amount, payment.note.clone())
                .map_err(|e| PortError::conflict(e.to_string()))?;
            Ok(())
        }
    }

    fn scenario_store() -> (InMemoryExpenseStore, Group, [MemberId; 4], Share) {
        let (group, ids, expenses) = GroupFixtures::trip_scenario();
        let share = expenses[0]
            .share_of(ids[1])
            .expect("Bob participates in the cabin expense")
            .clone();
        (InMemoryExpenseStore::new(expenses), group, ids, share)
    }

    #[tokio::test]
    async fn test_load_group_expenses_scopes_by_group() {
        let (store, group, _, _) = scenario_store();

        let expenses = store.load_group_expenses(group.id).await.unwrap();
        assert_eq!(expenses.len(), 2);

        let other = store
            .load_group_expenses(core_kernel::GroupId::new())
            .await
            .unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_racing_payments_cannot_both_commit() {
        test_utils::init_test_tracing();
        let (store, _, _, share) = scenario_store();
        let remaining = share.remaining();

        // Both requests were validated against the same stale snapshot
        let first = Payment::new(share.id, remaining, None);
        let second = Payment::new(share.id, remaining, None);

        store.record_payment(&share, &first).await.unwrap();
        let error = store.record_payment(&share, &second).await.unwrap_err();

        assert!(matches!(error, PortError::Conflict { .. }));
        assert!(error.is_transient(), "lost races must be retryable");
    }

    #[tokio::test]
    async fn test_record_payment_unknown_share_is_not_found() {
        let (store, _, _, share) = scenario_store();
        let mut orphan = share.clone();
        orphan.id = core_kernel::ShareId::new();

        let payment = Payment::new(orphan.id, usd(dec!(1.00)), None);
        let error = store.record_payment(&orphan, &payment).await.unwrap_err();

        assert!(error.is_not_found());
        assert!(!error.is_transient());
    }
}

// ============================================================================
// Serialization Tests
// ============================================================================

mod serde_tests {
    use super::*;

    #[test]
    fn test_expense_round_trips_through_json() {
        let (group, ids) = GroupFixtures::four_member_group();
        let expense = ExpenseBuilder::new(ids[0])
            .with_amount(usd(dec!(75.50)))
            .build(&group)
            .unwrap();

        let json = serde_json::to_string(&expense).unwrap();
        let back: Expense = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, expense.id);
        assert_eq!(back.amount, expense.amount);
        assert_eq!(back.shares.len(), expense.shares.len());
    }

    #[test]
    fn test_membership_status_serializes_as_variant_name() {
        let json = serde_json::to_string(&MembershipStatus::Accepted).unwrap();
        assert_eq!(json, "\"Accepted\"");
    }
}
