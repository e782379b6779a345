use docspace_core::db::migrations::latest_version;
use docspace_core::db::open_db_in_memory;
use docspace_core::{
    Caller, Document, DocumentRepository, DocumentScan, PageRequest, RepoError,
    SqliteDocumentRepository, DEFAULT_TITLE,
};
use rusqlite::Connection;
use uuid::Uuid;

#[test]
fn insert_and_get_roundtrip_preserves_snapshot_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();

    let caller = Caller::new("u1").with_organization("orgA");
    let doc = Document::new(
        &caller,
        Some("Launch Plan".to_string()),
        Some("# Kickoff".to_string()),
    );
    let id = repo.insert(&doc).unwrap();

    let loaded = repo.get(id).unwrap().unwrap();
    assert_eq!(loaded.id, doc.id);
    assert_eq!(loaded.title, "Launch Plan");
    assert_eq!(loaded.owner_id, "u1");
    assert_eq!(loaded.organization_id.as_deref(), Some("orgA"));
    assert_eq!(loaded.initial_content.as_deref(), Some("# Kickoff"));
}

#[test]
fn insert_without_title_persists_default_title() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();

    let doc = Document::new(&Caller::new("u1"), None, None);
    let id = repo.insert(&doc).unwrap();

    let loaded = repo.get(id).unwrap().unwrap();
    assert_eq!(loaded.title, DEFAULT_TITLE);
    assert_eq!(loaded.organization_id, None);
}

#[test]
fn rename_patches_title_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();

    let caller = Caller::new("u1").with_organization("orgA");
    let doc = Document::new(&caller, Some("Draft".to_string()), Some("seed".to_string()));
    repo.insert(&doc).unwrap();

    repo.rename(doc.id, "Final").unwrap();

    let loaded = repo.get(doc.id).unwrap().unwrap();
    assert_eq!(loaded.title, "Final");
    assert_eq!(loaded.owner_id, "u1");
    assert_eq!(loaded.organization_id.as_deref(), Some("orgA"));
    assert_eq!(loaded.initial_content.as_deref(), Some("seed"));
}

#[test]
fn rename_missing_document_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();

    let missing = Uuid::new_v4();
    let err = repo.rename(missing, "anything").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn delete_removes_record_and_repeat_delete_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();

    let doc = Document::new(&Caller::new("u1"), Some("Gone".to_string()), None);
    repo.insert(&doc).unwrap();

    repo.delete(doc.id).unwrap();
    assert!(repo.get(doc.id).unwrap().is_none());

    let err = repo.delete(doc.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == doc.id));
}

#[test]
fn listing_follows_insertion_order_with_disjoint_pages() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();

    let caller = Caller::new("u1");
    let first = Document::new(&caller, Some("first".to_string()), None);
    let second = Document::new(&caller, Some("second".to_string()), None);
    let third = Document::new(&caller, Some("third".to_string()), None);
    repo.insert(&first).unwrap();
    repo.insert(&second).unwrap();
    repo.insert(&third).unwrap();

    let scan = DocumentScan::ByOwner("u1".to_string());
    let page_one = repo
        .scan(
            &scan,
            &PageRequest {
                cursor: None,
                page_size: 2,
            },
        )
        .unwrap();
    assert_eq!(page_one.items.len(), 2);
    assert_eq!(page_one.items[0].id, first.id);
    assert_eq!(page_one.items[1].id, second.id);
    let cursor = page_one.next_cursor.expect("more rows should remain");

    // Inserts between page fetches must not shift earlier rows into
    // the next page.
    let fourth = Document::new(&caller, Some("fourth".to_string()), None);
    repo.insert(&fourth).unwrap();

    let page_two = repo
        .scan(
            &scan,
            &PageRequest {
                cursor: Some(cursor),
                page_size: 2,
            },
        )
        .unwrap();
    assert_eq!(page_two.items.len(), 2);
    assert_eq!(page_two.items[0].id, third.id);
    assert_eq!(page_two.items[1].id, fourth.id);
    assert!(page_two.next_cursor.is_none());
}

#[test]
fn listing_scopes_do_not_leak_across_owners_or_organizations() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();

    let org_member = Caller::new("u1").with_organization("orgA");
    let personal = Caller::new("u2");
    let in_org = Document::new(&org_member, Some("org doc".to_string()), None);
    let not_in_org = Document::new(&personal, Some("personal doc".to_string()), None);
    repo.insert(&in_org).unwrap();
    repo.insert(&not_in_org).unwrap();

    let org_page = repo
        .scan(
            &DocumentScan::ByOrganization("orgA".to_string()),
            &PageRequest::default(),
        )
        .unwrap();
    assert_eq!(org_page.items.len(), 1);
    assert_eq!(org_page.items[0].id, in_org.id);

    let owner_page = repo
        .scan(
            &DocumentScan::ByOwner("u2".to_string()),
            &PageRequest::default(),
        )
        .unwrap();
    assert_eq!(owner_page.items.len(), 1);
    assert_eq!(owner_page.items[0].id, not_in_org.id);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteDocumentRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_documents_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteDocumentRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("documents"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_documents_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE documents (
            uuid TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            owner_id TEXT NOT NULL,
            organization_id TEXT,
            created_at INTEGER NOT NULL DEFAULT 0,
            updated_at INTEGER NOT NULL DEFAULT 0
        );
        CREATE VIRTUAL TABLE documents_title_fts USING fts5(title);",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteDocumentRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "documents",
            column: "initial_content"
        })
    ));
}
