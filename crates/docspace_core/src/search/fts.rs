//! FTS5 match-expression construction for title search.
//!
//! # Responsibility
//! - Turn free-form caller input into a safe FTS5 match expression.
//! - Detect FTS5 syntax errors in SQLite failures.
//!
//! # Invariants
//! - Every term is quoted, so caller input can never reach FTS5 query
//!   syntax (type-as-you-search input stays valid).
//! - Blank input yields no expression; the caller decides how to treat
//!   an empty search.

/// Builds an FTS5 match expression from a caller-supplied search term.
///
/// Whitespace-separated words are individually quoted and AND-joined.
/// Returns `None` for blank input.
pub fn build_match_expression(term: &str) -> Option<String> {
    let terms = term
        .split_whitespace()
        .filter(|word| !word.is_empty())
        .map(escape_fts_term)
        .collect::<Vec<_>>();

    if terms.is_empty() {
        return None;
    }

    Some(terms.join(" AND "))
}

fn escape_fts_term(raw: &str) -> String {
    let escaped = raw.replace('"', "\"\"");
    format!("\"{escaped}\"")
}

/// Returns whether a SQLite failure stems from FTS5 query syntax.
pub fn is_match_syntax_error(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => {
            let msg = message.to_lowercase();
            (msg.contains("fts5") && msg.contains("syntax"))
                || msg.contains("malformed match expression")
                || msg.contains("unterminated")
        }
        _ => false,
    }
}
