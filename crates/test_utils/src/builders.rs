//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. These builders allow tests to specify only the relevant
//! fields while using defaults for everything else.

use chrono::NaiveDate;
use core_kernel::{Currency, MemberId, Money};
use domain_expense::{Expense, ExpenseError, Group, GroupMember};
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal_macros::dec;

use crate::fixtures::DateFixtures;

/// Builder for test groups
pub struct GroupBuilder {
    name: String,
    currency: Currency,
    members: Vec<GroupMember>,
}

impl Default for GroupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            name: "Test group".to_string(),
            currency: Currency::USD,
            members: Vec::new(),
        }
    }

    /// Sets the group name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the group currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Adds an accepted member with a generated display name
    pub fn with_member(mut self, member_id: MemberId) -> Self {
        let name: String = Name().fake();
        self.members.push(GroupMember::accepted(member_id, name));
        self
    }

    /// Adds an accepted member with the given display name
    pub fn with_named_member(mut self, member_id: MemberId, name: impl Into<String>) -> Self {
        self.members.push(GroupMember::accepted(member_id, name));
        self
    }

    /// Adds a membership record in a specific state
    pub fn with_membership(mut self, member: GroupMember) -> Self {
        self.members.push(member);
        self
    }

    /// Builds the group
    pub fn build(self) -> Group {
        let mut group = Group::new(self.name, self.currency);
        for member in self.members {
            group
                .add_member(member)
                .expect("builder members must be distinct");
        }
        group
    }
}

/// Builder for test expenses, split evenly at build time
pub struct ExpenseBuilder {
    paid_by: MemberId,
    description: String,
    amount: Money,
    date: NaiveDate,
    participants: Vec<MemberId>,
}

impl ExpenseBuilder {
    /// Creates a new builder with default values
    pub fn new(paid_by: MemberId) -> Self {
        Self {
            paid_by,
            description: "Test expense".to_string(),
            amount: Money::new(dec!(100.00), Currency::USD),
            date: DateFixtures::expense_date(),
            participants: Vec::new(),
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the total amount
    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    /// Sets the expense date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Sets the participants
    pub fn with_participants(mut self, participants: &[MemberId]) -> Self {
        self.participants = participants.to_vec();
        self
    }

    /// Builds the expense against the given group
    pub fn build(self, group: &Group) -> Result<Expense, ExpenseError> {
        let participants = if self.participants.is_empty() {
            group.active_member_ids().into_iter().collect()
        } else {
            self.participants
        };
        Expense::split_evenly(
            group,
            self.paid_by,
            self.description,
            self.amount,
            self.date,
            &participants,
        )
    }
}
