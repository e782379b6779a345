//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition
//!   to DB transport errors.
//! - Continuation cursors are produced and parsed only inside this
//!   layer; callers treat them as opaque tokens.

pub mod document_repo;
