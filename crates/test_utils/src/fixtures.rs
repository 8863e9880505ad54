//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the
//! settlement system. These fixtures are designed to be consistent and
//! predictable for unit tests; member ids are fixed so that ordering-
//! sensitive assertions (settlement output is sorted by member id) hold
//! across runs.

use chrono::NaiveDate;
use core_kernel::{Currency, MemberId, Money};
use domain_expense::{Expense, Group, GroupMember};
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Creates a standard USD amount for testing
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }

    /// Creates a zero amount
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// Creates a EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }
}

/// Fixture for date test data
pub struct DateFixtures;

impl DateFixtures {
    /// Standard expense date
    pub fn expense_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    /// A later expense date for multi-expense scenarios
    pub fn later_expense_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }
}

/// Fixture for member test data
///
/// Ids are fixed and strictly increasing: alice < bob < cara < dane.
pub struct MemberFixtures;

impl MemberFixtures {
    pub fn alice() -> MemberId {
        MemberId::from_uuid(Uuid::from_u128(0x01))
    }

    pub fn bob() -> MemberId {
        MemberId::from_uuid(Uuid::from_u128(0x02))
    }

    pub fn cara() -> MemberId {
        MemberId::from_uuid(Uuid::from_u128(0x03))
    }

    pub fn dane() -> MemberId {
        MemberId::from_uuid(Uuid::from_u128(0x04))
    }
}

/// Fixture for group test data
pub struct GroupFixtures;

impl GroupFixtures {
    /// A USD group with Alice, Bob, Cara, and Dane all accepted
    pub fn four_member_group() -> (Group, [MemberId; 4]) {
        let ids = [
            MemberFixtures::alice(),
            MemberFixtures::bob(),
            MemberFixtures::cara(),
            MemberFixtures::dane(),
        ];
        let mut group = Group::new("Ski trip", Currency::USD);
        for (id, name) in ids.iter().zip(["Alice", "Bob", "Cara", "Dane"]) {
            group
                .add_member(GroupMember::accepted(*id, name))
                .expect("fixture member ids are distinct");
        }
        (group, ids)
    }

    /// The canonical two-expense scenario over the four-member group
    ///
    /// Alice pays 120.00 split across Alice/Bob/Cara; Bob pays 60.00 split
    /// across Alice/Bob. Dane participates in nothing.
    pub fn trip_scenario() -> (Group, [MemberId; 4], Vec<Expense>) {
        let (group, ids) = Self::four_member_group();
        let [alice, bob, cara, _dane] = ids;

        let expenses = vec![
            Expense::split_evenly(
                &group,
                alice,
                "Cabin",
                Money::new(dec!(120.00), Currency::USD),
                DateFixtures::expense_date(),
                &[alice, bob, cara],
            )
            .expect("fixture expense is valid"),
            Expense::split_evenly(
                &group,
                bob,
                "Lift passes",
                Money::new(dec!(60.00), Currency::USD),
                DateFixtures::later_expense_date(),
                &[alice, bob],
            )
            .expect("fixture expense is valid"),
        ];

        (group, ids, expenses)
    }
}
