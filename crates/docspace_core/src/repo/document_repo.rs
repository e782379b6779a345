//! Document repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide point-wise CRUD APIs over the `documents` table.
//! - Expose the closed set of paginated index scans consumed by the
//!   query router: by-owner, by-organization, title search scoped by
//!   owner, title search scoped by organization.
//! - Own the continuation-cursor format end to end.
//!
//! # Invariants
//! - All mutations are single-statement, single-record atomic.
//! - Plain listings follow index insertion order; search scans are
//!   ranked by relevance, then recency, then id.
//! - A cursor is only valid for the query shape that produced it.

use crate::db::DbError;
use crate::model::document::{Document, DocumentId};
use crate::search::fts::{build_match_expression, is_match_syntax_error};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const DOCUMENT_SELECT_SQL: &str = "SELECT
    rowid,
    uuid,
    title,
    owner_id,
    organization_id,
    initial_content
FROM documents";

const PAGE_SIZE_DEFAULT: u32 = 20;
const PAGE_SIZE_MAX: u32 = 100;

const KEYSET_CURSOR_PREFIX: char = 'k';
const RANK_CURSOR_PREFIX: char = 'r';

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for document persistence and scan operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(DocumentId),
    InvalidData(String),
    InvalidCursor(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(_) => write!(f, "Document not found"),
            Self::InvalidData(message) => write!(f, "invalid persisted document data: {message}"),
            Self::InvalidCursor(message) => write!(f, "invalid continuation cursor: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection is not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Opaque continuation token for paginated scans.
///
/// Produced and parsed only by the repository. Callers may round-trip
/// the token text to clients but must not interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    token: String,
}

impl Cursor {
    /// Rehydrates a cursor from a token previously handed to a client.
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Returns the token text for transport to clients.
    pub fn as_token(&self) -> &str {
        &self.token
    }

    fn keyset(last_rowid: i64) -> Self {
        Self {
            token: format!("{KEYSET_CURSOR_PREFIX}{last_rowid}"),
        }
    }

    fn rank_offset(offset: u32) -> Self {
        Self {
            token: format!("{RANK_CURSOR_PREFIX}{offset}"),
        }
    }

    fn parse_keyset(&self) -> RepoResult<i64> {
        self.token
            .strip_prefix(KEYSET_CURSOR_PREFIX)
            .and_then(|rest| rest.parse::<i64>().ok())
            .ok_or_else(|| RepoError::InvalidCursor(self.token.clone()))
    }

    fn parse_rank_offset(&self) -> RepoResult<u32> {
        self.token
            .strip_prefix(RANK_CURSOR_PREFIX)
            .and_then(|rest| rest.parse::<u32>().ok())
            .ok_or_else(|| RepoError::InvalidCursor(self.token.clone()))
    }
}

/// Pagination request for a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Continuation cursor returned by a prior page of the same scan.
    pub cursor: Option<Cursor>,
    /// Requested page size. Zero falls back to the default and values
    /// above the hard maximum are clamped.
    pub page_size: u32,
}

/// One page of scan results plus the continuation cursor, when more
/// rows remain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPage {
    pub items: Vec<Document>,
    pub next_cursor: Option<Cursor>,
}

/// The closed set of index scans the store supports.
///
/// The query router maps caller identity and search input onto exactly
/// one of these; no other retrieval path exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentScan {
    /// Insertion-ordered listing of one owner's documents.
    ByOwner(String),
    /// Insertion-ordered listing of one organization's documents.
    ByOrganization(String),
    /// Ranked title search restricted to one owner.
    SearchByOwner { owner_id: String, term: String },
    /// Ranked title search restricted to one organization.
    SearchByOrganization {
        organization_id: String,
        term: String,
    },
}

/// Repository interface for document storage.
pub trait DocumentRepository {
    /// Inserts one document and returns its stable id.
    fn insert(&self, document: &Document) -> RepoResult<DocumentId>;
    /// Gets one document by id.
    fn get(&self, id: DocumentId) -> RepoResult<Option<Document>>;
    /// Patches only the title of an existing document.
    fn rename(&self, id: DocumentId, title: &str) -> RepoResult<()>;
    /// Hard-deletes one document.
    fn delete(&self, id: DocumentId) -> RepoResult<()>;
    /// Runs one paginated index scan.
    fn scan(&self, scan: &DocumentScan, page: &PageRequest) -> RepoResult<DocumentPage>;
}

/// SQLite-backed document repository.
pub struct SqliteDocumentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentRepository<'conn> {
    /// Constructs a repository after verifying the connection has been
    /// migrated and carries the expected schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl DocumentRepository for SqliteDocumentRepository<'_> {
    fn insert(&self, document: &Document) -> RepoResult<DocumentId> {
        self.conn.execute(
            "INSERT INTO documents (
                uuid,
                title,
                owner_id,
                organization_id,
                initial_content
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                document.id.to_string(),
                document.title.as_str(),
                document.owner_id.as_str(),
                document.organization_id.as_deref(),
                document.initial_content.as_deref(),
            ],
        )?;

        Ok(document.id)
    }

    fn get(&self, id: DocumentId) -> RepoResult<Option<Document>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DOCUMENT_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_document_row(row)?));
        }

        Ok(None)
    }

    fn rename(&self, id: DocumentId, title: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE documents
             SET
                title = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![id.to_string(), title],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete(&self, id: DocumentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM documents WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn scan(&self, scan: &DocumentScan, page: &PageRequest) -> RepoResult<DocumentPage> {
        match scan {
            DocumentScan::ByOwner(owner_id) => self.scan_listing("owner_id", owner_id, page),
            DocumentScan::ByOrganization(organization_id) => {
                self.scan_listing("organization_id", organization_id, page)
            }
            DocumentScan::SearchByOwner { owner_id, term } => {
                self.scan_search("owner_id", owner_id, term, page)
            }
            DocumentScan::SearchByOrganization {
                organization_id,
                term,
            } => self.scan_search("organization_id", organization_id, term, page),
        }
    }
}

impl SqliteDocumentRepository<'_> {
    /// Insertion-ordered listing with keyset continuation over rowid.
    ///
    /// Keyset pagination keeps successive pages disjoint even when new
    /// documents are inserted between page fetches.
    fn scan_listing(
        &self,
        scope_column: &'static str,
        scope_value: &str,
        page: &PageRequest,
    ) -> RepoResult<DocumentPage> {
        let after_rowid = match page.cursor.as_ref() {
            Some(cursor) => cursor.parse_keyset()?,
            None => 0,
        };
        let limit = normalize_page_size(page.page_size);

        let mut stmt = self.conn.prepare(&format!(
            "{DOCUMENT_SELECT_SQL}
             WHERE {scope_column} = ?1
               AND rowid > ?2
             ORDER BY rowid ASC
             LIMIT ?3;"
        ))?;

        // One extra row decides whether a continuation cursor exists.
        let mut rows = stmt.query(params![
            scope_value,
            after_rowid,
            i64::from(limit) + 1
        ])?;
        let mut items = Vec::new();
        let mut last_rowid = after_rowid;
        let mut has_more = false;

        while let Some(row) = rows.next()? {
            if items.len() == limit as usize {
                has_more = true;
                break;
            }
            last_rowid = row.get("rowid")?;
            items.push(parse_document_row(row)?);
        }

        let next_cursor = has_more.then(|| Cursor::keyset(last_rowid));
        Ok(DocumentPage { items, next_cursor })
    }

    /// Ranked title search with rank-offset continuation.
    ///
    /// Ordering is relevance (`bm25`), then recency, then id, so the
    /// offset cursor stays deterministic for a fixed query.
    fn scan_search(
        &self,
        scope_column: &'static str,
        scope_value: &str,
        term: &str,
        page: &PageRequest,
    ) -> RepoResult<DocumentPage> {
        let Some(match_expr) = build_match_expression(term) else {
            return Ok(DocumentPage {
                items: Vec::new(),
                next_cursor: None,
            });
        };

        let offset = match page.cursor.as_ref() {
            Some(cursor) => cursor.parse_rank_offset()?,
            None => 0,
        };
        let limit = normalize_page_size(page.page_size);

        let sql = format!(
            "SELECT
                d.rowid AS rowid,
                d.uuid AS uuid,
                d.title AS title,
                d.owner_id AS owner_id,
                d.organization_id AS organization_id,
                d.initial_content AS initial_content
             FROM documents_title_fts
             JOIN documents d ON d.rowid = documents_title_fts.rowid
             WHERE documents_title_fts MATCH ?1
               AND d.{scope_column} = ?2
             ORDER BY bm25(documents_title_fts), d.updated_at DESC, d.uuid ASC
             LIMIT ?3 OFFSET ?4;"
        );
        let bind_values: Vec<Value> = vec![
            Value::Text(match_expr.clone()),
            Value::Text(scope_value.to_string()),
            Value::Integer(i64::from(limit) + 1),
            Value::Integer(i64::from(offset)),
        ];

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt
            .query(params_from_iter(bind_values))
            .map_err(|err| map_match_error(err, &match_expr))?;
        let mut items = Vec::new();
        let mut has_more = false;

        while let Some(row) = rows
            .next()
            .map_err(|err| map_match_error(err, &match_expr))?
        {
            if items.len() == limit as usize {
                has_more = true;
                break;
            }
            items.push(parse_document_row(row)?);
        }

        let next_cursor = has_more.then(|| Cursor::rank_offset(offset + limit));
        Ok(DocumentPage { items, next_cursor })
    }
}

/// Normalizes requested page size according to the store contract.
pub fn normalize_page_size(page_size: u32) -> u32 {
    match page_size {
        0 => PAGE_SIZE_DEFAULT,
        value if value > PAGE_SIZE_MAX => PAGE_SIZE_MAX,
        value => value,
    }
}

fn parse_document_row(row: &Row<'_>) -> RepoResult<Document> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in documents.uuid"))
    })?;

    Ok(Document {
        id,
        title: row.get("title")?,
        owner_id: row.get("owner_id")?,
        organization_id: row.get("organization_id")?,
        initial_content: row.get("initial_content")?,
    })
}

fn map_match_error(err: rusqlite::Error, match_expr: &str) -> RepoError {
    if is_match_syntax_error(&err) {
        return RepoError::InvalidData(format!(
            "search index rejected match expression `{match_expr}`: {err}"
        ));
    }

    RepoError::Db(DbError::Sqlite(err))
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version: u32 =
        conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = crate::db::migrations::latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in ["documents", "documents_title_fts"] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    for column in [
        "uuid",
        "title",
        "owner_id",
        "organization_id",
        "initial_content",
        "created_at",
        "updated_at",
    ] {
        if !table_has_column(conn, "documents", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "documents",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &'static str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type IN ('table', 'view') AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
