//! Query router for the list operation.
//!
//! # Responsibility
//! - Map caller identity and optional search input onto exactly one
//!   of the store's four index scans.
//!
//! # Invariants
//! - Strategy precedence is fixed: organization search, then personal
//!   search, then organization listing, then personal listing.
//! - A blank or whitespace-only search term counts as no search term.

use crate::model::identity::Caller;
use crate::repo::document_repo::DocumentScan;

/// Selects the index scan for one list call.
///
/// Pure function of (has-search, has-organization); no other branching
/// participates in strategy selection.
pub fn select_scan(caller: &Caller, search: Option<&str>) -> DocumentScan {
    let term = search
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string);

    match (term, caller.organization_id.as_ref()) {
        (Some(term), Some(organization_id)) => DocumentScan::SearchByOrganization {
            organization_id: organization_id.clone(),
            term,
        },
        (Some(term), None) => DocumentScan::SearchByOwner {
            owner_id: caller.subject.clone(),
            term,
        },
        (None, Some(organization_id)) => DocumentScan::ByOrganization(organization_id.clone()),
        (None, None) => DocumentScan::ByOwner(caller.subject.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::select_scan;
    use crate::model::identity::Caller;
    use crate::repo::document_repo::DocumentScan;

    #[test]
    fn search_with_organization_routes_to_organization_search() {
        let caller = Caller::new("u1").with_organization("orgA");
        let scan = select_scan(&caller, Some("plan"));
        assert_eq!(
            scan,
            DocumentScan::SearchByOrganization {
                organization_id: "orgA".to_string(),
                term: "plan".to_string(),
            }
        );
    }

    #[test]
    fn search_without_organization_routes_to_owner_search() {
        let caller = Caller::new("u1");
        let scan = select_scan(&caller, Some("plan"));
        assert_eq!(
            scan,
            DocumentScan::SearchByOwner {
                owner_id: "u1".to_string(),
                term: "plan".to_string(),
            }
        );
    }

    #[test]
    fn no_search_with_organization_routes_to_organization_listing() {
        let caller = Caller::new("u1").with_organization("orgA");
        let scan = select_scan(&caller, None);
        assert_eq!(scan, DocumentScan::ByOrganization("orgA".to_string()));
    }

    #[test]
    fn no_search_without_organization_routes_to_owner_listing() {
        let caller = Caller::new("u1");
        let scan = select_scan(&caller, None);
        assert_eq!(scan, DocumentScan::ByOwner("u1".to_string()));
    }

    #[test]
    fn blank_search_term_counts_as_no_search() {
        let caller = Caller::new("u1").with_organization("orgA");
        let scan = select_scan(&caller, Some("   "));
        assert_eq!(scan, DocumentScan::ByOrganization("orgA".to_string()));
    }
}
