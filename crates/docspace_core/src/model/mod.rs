//! Domain records for the document-management core.
//!
//! # Responsibility
//! - Define the canonical document record and the resolved caller
//!   identity passed into every operation.
//!
//! # Invariants
//! - Every document is identified by a stable `DocumentId`.
//! - Ownership and organization membership are snapshotted at creation
//!   and never rewritten afterwards.

pub mod document;
pub mod identity;
