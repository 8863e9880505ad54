//! Expense Domain
//!
//! This crate models shared-expense groups: membership, expenses split
//! across participants, and the payment ledger each share carries.
//!
//! # Key Concepts
//!
//! - **Group**: a set of members sharing expenses
//! - **Expense**: a cost fronted by one member, split into shares
//! - **Share**: one member's portion of an expense, repaid over time
//! - **Payment**: an immutable record of a single repayment
//!
//! Balances over this data are computed by `domain_settlement`; nothing
//! here is ever derived state.

pub mod error;
pub mod expense;
pub mod group;
pub mod payment;
pub mod ports;
pub mod share;

pub use error::ExpenseError;
pub use expense::Expense;
pub use group::{Group, GroupMember, MembershipStatus};
pub use payment::{Payment, PaymentReceipt};
pub use ports::{ExpenseStore, MembershipProvider};
pub use share::Share;
