//! Document-management core for a collaborative editor backend.
//! This crate is the single source of truth for document access rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{Document, DocumentId, DEFAULT_TITLE};
pub use model::identity::Caller;
pub use repo::document_repo::{
    Cursor, DocumentPage, DocumentRepository, DocumentScan, PageRequest, RepoError, RepoResult,
    SqliteDocumentRepository,
};
pub use service::access::can_mutate;
pub use service::document_service::{CreateDocument, DocumentService, ServiceError};
pub use service::query::select_scan;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
