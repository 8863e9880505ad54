//! Groups and membership
//!
//! A group is the unit that shares expenses. Membership goes through a
//! lifecycle (invited, accepted, rejected, left) and only accepted members
//! participate in splits and balances; shares held by members who have since
//! left stay on record but stop contributing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use core_kernel::{Currency, GroupId, MemberId};

use crate::error::ExpenseError;

/// Lifecycle state of a group membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipStatus {
    /// Invitation sent, not yet answered
    Invited,
    /// Active member
    Accepted,
    /// Invitation declined
    Rejected,
    /// Was a member, has left the group
    Left,
}

/// A member of a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMember {
    /// Member identifier
    pub member_id: MemberId,
    /// Display name
    pub display_name: String,
    /// Membership lifecycle state
    pub status: MembershipStatus,
    /// When the membership was created
    pub joined_at: DateTime<Utc>,
}

impl GroupMember {
    /// Creates a pending membership (invitation sent)
    pub fn invited(member_id: MemberId, display_name: impl Into<String>) -> Self {
        Self {
            member_id,
            display_name: display_name.into(),
            status: MembershipStatus::Invited,
            joined_at: Utc::now(),
        }
    }

    /// Creates a membership that is already active
    pub fn accepted(member_id: MemberId, display_name: impl Into<String>) -> Self {
        Self {
            status: MembershipStatus::Accepted,
            ..Self::invited(member_id, display_name)
        }
    }

    /// Accepts the invitation
    pub fn accept(&mut self) {
        self.status = MembershipStatus::Accepted;
    }

    /// Declines the invitation
    pub fn reject(&mut self) {
        self.status = MembershipStatus::Rejected;
    }

    /// Leaves the group
    pub fn leave(&mut self) {
        self.status = MembershipStatus::Left;
    }

    /// Returns true if this member currently participates in the group
    pub fn is_active(&self) -> bool {
        self.status == MembershipStatus::Accepted
    }
}

/// A set of members sharing expenses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier
    pub id: GroupId,
    /// Group name
    pub name: String,
    /// Home currency; every expense in the group uses it
    pub currency: Currency,
    /// Memberships, including past and pending ones
    pub members: Vec<GroupMember>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Creates an empty group
    pub fn new(name: impl Into<String>, currency: Currency) -> Self {
        Self {
            id: GroupId::new_v7(),
            name: name.into(),
            currency,
            members: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a membership record
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseError::AlreadyAMember`] if the member already has a
    /// membership record, in any state.
    pub fn add_member(&mut self, member: GroupMember) -> Result<(), ExpenseError> {
        if self.members.iter().any(|m| m.member_id == member.member_id) {
            return Err(ExpenseError::AlreadyAMember {
                member_id: member.member_id,
            });
        }
        self.members.push(member);
        Ok(())
    }

    /// Looks up a membership record
    pub fn member(&self, member_id: MemberId) -> Option<&GroupMember> {
        self.members.iter().find(|m| m.member_id == member_id)
    }

    /// Looks up a membership record for mutation
    pub fn member_mut(&mut self, member_id: MemberId) -> Option<&mut GroupMember> {
        self.members.iter_mut().find(|m| m.member_id == member_id)
    }

    /// Marks a member as having left the group
    ///
    /// Their historical shares stay on record but stop contributing to
    /// balances.
    pub fn mark_left(&mut self, member_id: MemberId) -> Result<(), ExpenseError> {
        match self.member_mut(member_id) {
            Some(member) => {
                member.leave();
                Ok(())
            }
            None => Err(ExpenseError::NotAGroupMember { member_id }),
        }
    }

    /// Iterates over currently active members
    pub fn active_members(&self) -> impl Iterator<Item = &GroupMember> {
        self.members.iter().filter(|m| m.is_active())
    }

    /// Returns the ids of currently active members, ordered by member id
    pub fn active_member_ids(&self) -> BTreeSet<MemberId> {
        self.active_members().map(|m| m.member_id).collect()
    }

    /// Returns true if the member is currently active in the group
    pub fn is_active_member(&self, member_id: MemberId) -> bool {
        self.member(member_id).is_some_and(|m| m.is_active())
    }
}
