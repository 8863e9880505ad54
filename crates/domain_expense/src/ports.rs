//! Ports consumed by the expense domain
//!
//! The core never owns storage. Adapters elsewhere implement these traits
//! over whatever engine the deployment uses; the domain only states the
//! contracts it needs from them.

use async_trait::async_trait;

use core_kernel::{DomainPort, GroupId, MemberId, PortError};

use crate::expense::Expense;
use crate::group::GroupMember;
use crate::payment::Payment;
use crate::share::Share;

/// Storage seam for expenses, shares, and payments
#[async_trait]
pub trait ExpenseStore: DomainPort {
    /// Loads all of a group's expenses, each with its shares and payments
    async fn load_group_expenses(&self, group_id: GroupId) -> Result<Vec<Expense>, PortError>;

    /// Persists the outcome of a payment-recording operation
    ///
    /// Implementations MUST make the read-validate-write sequence atomic per
    /// share (row lock or optimistic version check): two racing payments
    /// whose combined amount exceeds the share must not both commit. A lost
    /// race surfaces as [`PortError::Conflict`], which is transient — the
    /// caller may reload the share and retry.
    async fn record_payment(&self, share: &Share, payment: &Payment) -> Result<(), PortError>;
}

/// Membership seam: who currently counts in a group
#[async_trait]
pub trait MembershipProvider: DomainPort {
    /// Returns the currently accepted members of the group
    async fn active_members(&self, group_id: GroupId) -> Result<Vec<GroupMember>, PortError>;

    /// Returns true if the member is currently accepted in the group
    async fn is_active_member(
        &self,
        group_id: GroupId,
        member_id: MemberId,
    ) -> Result<bool, PortError> {
        Ok(self
            .active_members(group_id)
            .await?
            .iter()
            .any(|m| m.member_id == member_id))
    }
}
