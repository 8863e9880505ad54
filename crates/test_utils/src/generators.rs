//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::NaiveDate;
use core_kernel::{Currency, MemberId, Money};
use proptest::prelude::*;
use uuid::Uuid;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::JPY),
        Just(Currency::CHF),
        Just(Currency::AUD),
        Just(Currency::CAD),
    ]
}

/// Strategy for generating valid positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..100_000_00i64
}

/// Strategy for generating valid USD Money values
pub fn usd_money_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|amount| Money::from_minor(amount, Currency::USD))
}

/// Strategy for generating a pool of distinct member ids
///
/// Ids are derived from small integers so they are distinct and ordered.
pub fn member_pool_strategy(max_members: usize) -> impl Strategy<Value = Vec<MemberId>> {
    (2..=max_members).prop_map(|count| {
        (1..=count as u128)
            .map(|n| MemberId::from_uuid(Uuid::from_u128(n)))
            .collect()
    })
}

/// Strategy for generating expense dates within a year
pub fn expense_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u32..365u32).prop_map(|days| {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(days as u64))
            .unwrap()
    })
}

/// The raw ingredients of one randomly-generated expense
///
/// `payer` and `participants` are indices into a member pool; the caller
/// resolves them against the pool it generated.
#[derive(Debug, Clone)]
pub struct ExpenseSpec {
    pub payer_index: usize,
    pub participant_indices: Vec<usize>,
    pub amount_minor: i64,
}

/// Strategy for generating expense specs over a pool of `pool_size` members
pub fn expense_spec_strategy(pool_size: usize) -> impl Strategy<Value = ExpenseSpec> {
    (
        0..pool_size,
        proptest::sample::subsequence((0..pool_size).collect::<Vec<_>>(), 1..=pool_size),
        positive_amount_minor_strategy(),
    )
        .prop_map(|(payer_index, participant_indices, amount_minor)| ExpenseSpec {
            payer_index,
            participant_indices,
            amount_minor,
        })
}

/// Strategy for generating a batch of expense specs
pub fn expense_batch_strategy(
    pool_size: usize,
    max_expenses: usize,
) -> impl Strategy<Value = Vec<ExpenseSpec>> {
    proptest::collection::vec(expense_spec_strategy(pool_size), 1..=max_expenses)
}
