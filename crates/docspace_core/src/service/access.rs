//! Authorization guard for mutating document operations.
//!
//! # Responsibility
//! - Decide permit/deny for rename and remove given a resolved caller
//!   and the target document.
//!
//! # Invariants
//! - Owners may always mutate their documents, organization or not.
//! - Non-owners may mutate iff the document's organization snapshot
//!   equals the caller's current organization as optional values.
//!   Two absent organizations compare equal, so organization-less
//!   callers can mutate each other's personal documents. This mirrors
//!   the upstream behavior on purpose; see DESIGN.md before tightening.

use crate::model::document::Document;
use crate::model::identity::Caller;

/// Returns whether `caller` may rename or remove `document`.
pub fn can_mutate(caller: &Caller, document: &Document) -> bool {
    let is_owner = document.is_owned_by(&caller.subject);
    is_owner || document.organization_id == caller.organization_id
}
