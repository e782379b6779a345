//! Title search support.
//!
//! # Responsibility
//! - Build FTS5 match expressions from caller-supplied search terms.
//! - Classify FTS5 syntax failures so the repository can surface them
//!   as data errors rather than opaque SQLite failures.

pub mod fts;
