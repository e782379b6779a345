//! Document use-case service.
//!
//! # Responsibility
//! - Expose the four core operations: create, list, rename, remove.
//! - Enforce identity resolution before any store access.
//! - Apply the authorization guard to both mutating operations.
//!
//! # Invariants
//! - Every failure terminates the operation with no partial state
//!   change; mutations are single-field/single-record atomic.
//! - `Unauthorized` covers both missing identity and guard denial and
//!   is not distinguished further in responses.

use crate::model::document::{Document, DocumentId};
use crate::model::identity::Caller;
use crate::repo::document_repo::{DocumentPage, DocumentRepository, PageRequest, RepoError};
use crate::service::access::can_mutate;
use crate::service::query::select_scan;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for document use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Identity did not resolve, or the guard denied a mutation.
    Unauthorized,
    /// A mutating operation targeted a nonexistent document.
    NotFound(DocumentId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::NotFound(_) => write!(f, "Document not found"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Request model for document creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDocument {
    /// Display title; defaults to `"Untitled Document"` when absent.
    pub title: Option<String>,
    /// Seed content for the external collaboration service.
    pub initial_content: Option<String>,
}

/// Document service facade over repository implementations.
///
/// The caller identity is resolved once per request by an external
/// collaborator and threaded in as `Option<&Caller>`; `None` means
/// identity did not resolve and every operation fails `Unauthorized`
/// before touching the store.
pub struct DocumentService<R: DocumentRepository> {
    repo: R,
}

impl<R: DocumentRepository> DocumentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one document owned by the caller and returns its id.
    ///
    /// # Contract
    /// - `title` defaults to `"Untitled Document"` when absent.
    /// - Owner and organization are snapshotted from the caller at
    ///   insert time; no other validation is performed.
    /// - Never idempotent: each call creates a new document.
    pub fn create(
        &self,
        caller: Option<&Caller>,
        request: CreateDocument,
    ) -> Result<DocumentId, ServiceError> {
        let caller = caller.ok_or(ServiceError::Unauthorized)?;
        let document = Document::new(caller, request.title, request.initial_content);
        let id = self.repo.insert(&document)?;
        debug!(
            "event=document_created module=service document={} has_org={}",
            id,
            document.organization_id.is_some()
        );
        Ok(id)
    }

    /// Lists or searches the caller's visible documents, paginated.
    ///
    /// Routing picks one of four index scans from (has-search,
    /// has-organization); an empty page is a valid result, never
    /// NotFound.
    pub fn list(
        &self,
        caller: Option<&Caller>,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<DocumentPage, ServiceError> {
        let caller = caller.ok_or(ServiceError::Unauthorized)?;
        let scan = select_scan(caller, search);
        Ok(self.repo.scan(&scan, page)?)
    }

    /// Renames one document after the guard permits the caller.
    pub fn rename(
        &self,
        caller: Option<&Caller>,
        id: DocumentId,
        title: &str,
    ) -> Result<(), ServiceError> {
        let caller = caller.ok_or(ServiceError::Unauthorized)?;
        let document = self.repo.get(id)?.ok_or(ServiceError::NotFound(id))?;

        if !can_mutate(caller, &document) {
            debug!("event=document_mutation_denied module=service op=rename document={id}");
            return Err(ServiceError::Unauthorized);
        }

        Ok(self.repo.rename(id, title)?)
    }

    /// Removes one document after the guard permits the caller.
    ///
    /// Removing an already-removed id surfaces NotFound consistently.
    pub fn remove(&self, caller: Option<&Caller>, id: DocumentId) -> Result<(), ServiceError> {
        let caller = caller.ok_or(ServiceError::Unauthorized)?;
        let document = self.repo.get(id)?.ok_or(ServiceError::NotFound(id))?;

        if !can_mutate(caller, &document) {
            debug!("event=document_mutation_denied module=service op=remove document={id}");
            return Err(ServiceError::Unauthorized);
        }

        Ok(self.repo.delete(id)?)
    }
}
