//! Core Kernel - Foundational types and utilities for the settlement system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Common identifiers and value objects
//! - Port error classification for storage-facing seams

pub mod money;
pub mod identifiers;
pub mod error;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{GroupId, MemberId, ExpenseId, ShareId, PaymentId};
pub use error::CoreError;
pub use ports::{PortError, DomainPort};
