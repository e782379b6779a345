//! Document domain model.
//!
//! # Responsibility
//! - Define the single persisted entity of the core: the document
//!   record with its ownership snapshot.
//!
//! # Invariants
//! - `id` is stable and never reused for another document.
//! - `owner_id` is always present and never changes after creation.
//! - `organization_id` reflects only the creator's membership at
//!   creation time; later membership changes do not touch it.
//! - `initial_content` is write-once at creation and never read or
//!   mutated by this core (it is consumed by the external
//!   collaboration service keyed by document id).

use crate::model::identity::Caller;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier assigned to every document at creation.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type DocumentId = Uuid;

/// Title assigned when a document is created without one.
pub const DEFAULT_TITLE: &str = "Untitled Document";

/// Canonical document record.
///
/// Access permissions are fully determined by the live `owner_id` plus
/// the creation-time `organization_id` snapshot; no other field
/// participates in authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Stable global ID, also the address of the externally-owned body.
    pub id: DocumentId,
    /// Display title; the only field rename may touch.
    pub title: String,
    /// Identity subject of the creating caller.
    pub owner_id: String,
    /// Organization membership of the creator at creation time.
    pub organization_id: Option<String>,
    /// Seed content handed to the external collaboration service.
    pub initial_content: Option<String>,
}

impl Document {
    /// Creates a new document for `caller` with a generated stable ID.
    ///
    /// # Invariants
    /// - `title` defaults to [`DEFAULT_TITLE`] when `None`.
    /// - Owner and organization are snapshotted from `caller`.
    pub fn new(caller: &Caller, title: Option<String>, initial_content: Option<String>) -> Self {
        Self::with_id(Uuid::new_v4(), caller, title, initial_content)
    }

    /// Creates a document with a caller-provided stable ID.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(
        id: DocumentId,
        caller: &Caller,
        title: Option<String>,
        initial_content: Option<String>,
    ) -> Self {
        Self {
            id,
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            owner_id: caller.subject.clone(),
            organization_id: caller.organization_id.clone(),
            initial_content,
        }
    }

    /// Returns whether `subject` is the owning identity.
    pub fn is_owned_by(&self, subject: &str) -> bool {
        self.owner_id == subject
    }
}
