//! Settlement Domain
//!
//! This crate turns a snapshot of a group's expenses into net balances and
//! a settlement plan:
//!
//! - **Balance aggregation**: fold expenses, shares, and repayments into
//!   one signed balance per active member (zero-sum by construction)
//! - **Debt simplification**: greedy creditor/debtor matching producing at
//!   most `nonzero_members - 1` transfers
//!
//! Both computations are pure and synchronous: they own no state, perform
//! no I/O, and may run concurrently on independent snapshots. The original
//! system grew three diverging copies of this logic inside request
//! handlers; this crate is the single canonical implementation.

pub mod balance;
pub mod error;
pub mod settlement;

pub use balance::{compute_balances, BalanceLine, BalanceSheet};
pub use error::SettlementError;
pub use settlement::{
    settle, simplify_debts, Settlement, SettlementTransfer, SETTLEMENT_EPSILON,
};
