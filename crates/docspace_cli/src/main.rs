//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `docspace_core` linkage.
//! - Run one in-memory create/list/rename/remove pass for quick local
//!   sanity checks.

use docspace_core::db::open_db_in_memory;
use docspace_core::{
    Caller, CreateDocument, DocumentService, PageRequest, SqliteDocumentRepository,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("docspace_core version={}", docspace_core::core_version());

    let conn = open_db_in_memory()?;
    let repo = SqliteDocumentRepository::try_new(&conn)?;
    let service = DocumentService::new(repo);

    let caller = Caller::new("smoke-user").with_organization("smoke-org");
    let id = service.create(
        Some(&caller),
        CreateDocument {
            title: Some("Smoke Test".to_string()),
            initial_content: None,
        },
    )?;
    println!("created document={id}");

    let page = service.list(
        Some(&caller),
        Some("smoke"),
        &PageRequest {
            cursor: None,
            page_size: 10,
        },
    )?;
    println!("search hits={}", page.items.len());

    service.rename(Some(&caller), id, "Smoke Test v2")?;
    service.remove(Some(&caller), id)?;
    println!("smoke pass=ok");

    Ok(())
}
