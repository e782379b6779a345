//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate identity checks, authorization, and repository calls
//!   into the four document operations.
//! - Keep presentation/transport layers decoupled from storage
//!   details.

pub mod access;
pub mod document_service;
pub mod query;
