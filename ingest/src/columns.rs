//! FILENAME: ingest/src/columns.rs
//! PURPOSE: Candidate header names and the fuzzy column resolver.
//! CONTEXT: Upstream exports are not consistent about header spelling
//! ("Employee" vs "CT Name" vs "Employee Name"). Each logical field carries a
//! priority-ordered candidate list; resolution is case-insensitive and
//! whitespace-trimmed on both sides, and never fails hard — callers fall back
//! to substring heuristics or degrade gracefully on None.

// ============================================================================
// CANDIDATE HEADER LISTS (priority order)
// ============================================================================

/// Employee identity column.
pub const EMPLOYEE_COLUMNS: &[&str] = &["CT Name", "Employee Name", "Employee"];

/// Program / client name column.
pub const PROGRAM_COLUMNS: &[&str] = &["Program Name", "Program", "Client"];

/// Role / job title column.
pub const ROLE_COLUMNS: &[&str] = &["Account Role", "Role"];

/// Allocated hours column, plus the fragment used as a last-resort match.
pub const HOURS_COLUMNS: &[&str] = &["Allocated Monthly Hours", "Allocated Hours", "Hours"];
pub const HOURS_FRAGMENT: &str = "Allocated";

/// Recurring revenue column.
pub const REVENUE_COLUMNS: &[&str] = &["Program MRR", "MRR", "Revenue"];

/// Assignment end date column.
pub const END_DATE_COLUMNS: &[&str] = &["Assignment End Date", "End Date"];

/// Scheduled hours-change date column.
pub const CHANGE_DATE_COLUMNS: &[&str] = &["Future Hours Date", "Change Date", "Effective Date"];

/// Future hour count column.
pub const FUTURE_HOURS_COLUMNS: &[&str] = &["Future Allocated Hours", "Future Hours"];

/// Wide-format capacity column.
pub const CAPACITY_COLUMNS: &[&str] = &["Capacity"];

/// Derived-column labels a re-exported wide file may carry; never treated as
/// program columns.
pub const DERIVED_COLUMNS: &[&str] = &["Current Hours to Target"];

// ============================================================================
// RESOLVER
// ============================================================================

/// Finds a column index from a list of candidates.
///
/// Candidates are tried in priority order; the first header equal to any
/// candidate (trimmed, case-insensitive) wins. Returns None when nothing
/// matches so callers can apply their own fallback.
pub fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    let clean: Vec<String> = headers
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    for candidate in candidates {
        let wanted = candidate.trim().to_lowercase();
        if let Some(idx) = clean.iter().position(|h| *h == wanted) {
            return Some(idx);
        }
    }
    None
}

/// Finds the first header containing `fragment` (exact substring match).
pub fn find_column_containing(headers: &[String], fragment: &str) -> Option<usize> {
    headers.iter().position(|h| h.contains(fragment))
}

/// Whether a header names a derived column rather than data.
pub fn is_derived_header(header: &str) -> bool {
    DERIVED_COLUMNS
        .iter()
        .any(|d| d.eq_ignore_ascii_case(header.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn resolves_case_insensitively_with_whitespace() {
        let h = headers(&["  ct name ", "Program", "Hours"]);
        assert_eq!(find_column(&h, EMPLOYEE_COLUMNS), Some(0));
        assert_eq!(find_column(&h, PROGRAM_COLUMNS), Some(1));
    }

    #[test]
    fn candidates_are_tried_in_priority_order() {
        // Both "CT Name" and "Employee" are present; the earlier candidate wins.
        let h = headers(&["Employee", "CT Name"]);
        assert_eq!(find_column(&h, EMPLOYEE_COLUMNS), Some(1));
    }

    #[test]
    fn missing_column_is_none_not_an_error() {
        let h = headers(&["Widget", "Gadget"]);
        assert_eq!(find_column(&h, EMPLOYEE_COLUMNS), None);
    }

    #[test]
    fn fragment_fallback_finds_allocated_variants() {
        let h = headers(&["CT Name", "Program", "Total Allocated (hrs)"]);
        assert_eq!(find_column(&h, HOURS_COLUMNS), None);
        assert_eq!(find_column_containing(&h, HOURS_FRAGMENT), Some(2));
    }

    #[test]
    fn derived_headers_are_recognized() {
        assert!(is_derived_header(" current hours to target "));
        assert!(!is_derived_header("Acme"));
    }
}
