//! FILENAME: tests/common/mod.rs
//! Frame-building fixtures for ingestion integration tests.

use chrono::NaiveDate;
use ingest::RawFrame;

/// Builds a frame from string slices.
pub fn frame(headers: &[&str], rows: &[&[&str]]) -> RawFrame {
    RawFrame::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

/// Fixed "now" so the future-state windows are deterministic.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
}

/// A realistic long-format export with revenue and future-state metadata.
pub fn long_export() -> RawFrame {
    frame(
        &[
            " CT Name ",
            "Program Name",
            "Account Role",
            "Allocated Monthly Hours",
            "Program MRR",
            "Assignment End Date",
            "Future Hours Date",
            "Future Allocated Hours",
        ],
        &[
            &["Alice Reyes", "Acme", "CP", "20", "$12,500", "", "", ""],
            &["Alice Reyes", "Acme", "CP", "20", "$12,500", "", "", ""],
            // Rolls off in 10 days; the future-hours value must be ignored.
            &["Alice Reyes", "Globex", "CP", "30", "$8,000", "2026-08-11", "", "45"],
            // Ramping up in 20 days.
            &["Ben Okafor", "Acme", "CE", "40", "$12,500", "", "2026-08-21", "60"],
            // Change scheduled too far out to count.
            &["Ben Okafor", "Globex", "CE", "10", "$8,000", "", "2026-12-01", "50"],
        ],
    )
}
