//! Resolved caller identity.
//!
//! # Responsibility
//! - Carry the identity-provider result into core operations as a
//!   plain value; the core holds no ambient per-request state.
//!
//! # Invariants
//! - Identity resolution itself happens outside this crate; an
//!   unresolved caller is represented as `None` at the operation
//!   boundary, never as an empty subject.

use serde::{Deserialize, Serialize};

/// Identity of the caller invoking an operation.
///
/// `organization_id` is the caller's current membership and is only
/// consulted at the moment of the call; documents keep their own
/// creation-time snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// Identity subject, unique per user.
    pub subject: String,
    /// Current organization membership, if any.
    pub organization_id: Option<String>,
}

impl Caller {
    /// Creates a caller with no organization membership.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            organization_id: None,
        }
    }

    /// Returns the caller with organization membership attached.
    pub fn with_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }
}
