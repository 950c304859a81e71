//! FILENAME: ingest/src/pivot.rs
//! PURPOSE: Long-to-wide pivoting of transactional assignment rows.
//! CONTEXT: Long input carries one row per (employee, program) assignment.
//! The pivot sums duplicate pairs, produces a dense matrix (missing
//! combinations are 0), reattaches the first-observed role per employee, and
//! evaluates per-row future-state metadata before aggregation destroys it.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use engine::{evaluate_assignment, FutureStateRegistry, StaffingTable};

use crate::coerce::{coerce_date, coerce_hours, coerce_number};
use crate::frame::RawFrame;

/// Resolved column indices the pivot operates on. `employee`, `program`, and
/// `hours` are required; everything else is optional metadata.
#[derive(Debug, Clone, Copy)]
pub struct PivotColumns {
    pub employee: usize,
    pub program: usize,
    pub hours: usize,
    pub role: Option<usize>,
    pub end_date: Option<usize>,
    pub change_date: Option<usize>,
    pub future_hours: Option<usize>,
}

impl PivotColumns {
    fn has_future_metadata(&self) -> bool {
        self.end_date.is_some() || self.change_date.is_some() || self.future_hours.is_some()
    }
}

/// Pivots a long-format frame into the canonical wide table.
///
/// Employees and programs appear in first-observed order; zero-hour entries
/// are kept (filtering low-activity rows is a presentation concern). Rows
/// with an empty identity or program cell are skipped.
pub fn pivot(
    frame: &RawFrame,
    cols: PivotColumns,
    today: NaiveDate,
) -> (StaffingTable, FutureStateRegistry) {
    let mut employees: Vec<String> = Vec::new();
    let mut programs: Vec<String> = Vec::new();
    let mut sums: FxHashMap<(String, String), f64> = FxHashMap::default();
    let mut roles: FxHashMap<String, String> = FxHashMap::default();
    let mut future = FutureStateRegistry::new();

    for row in 0..frame.row_count() {
        let employee = frame.cell(row, cols.employee).trim();
        let program = frame.cell(row, cols.program).trim();
        if employee.is_empty() || program.is_empty() {
            log::warn!("skipping assignment row {} with blank employee/program", row + 2);
            continue;
        }

        if !employees.iter().any(|e| e == employee) {
            employees.push(employee.to_string());
        }
        if !programs.iter().any(|p| p == program) {
            programs.push(program.to_string());
        }

        let hours = coerce_hours(frame.cell(row, cols.hours));
        *sums
            .entry((employee.to_string(), program.to_string()))
            .or_insert(0.0) += hours;

        // Role is assumed invariant per employee; first observation wins.
        if let Some(role_col) = cols.role {
            let role = frame.cell(row, role_col).trim();
            if !role.is_empty() {
                roles
                    .entry(employee.to_string())
                    .or_insert_with(|| role.to_string());
            }
        }

        // Row-level metadata has to be captured here: after aggregation the
        // individual assignment rows no longer exist. Rows whose metadata
        // cells are all blank stay out of the registry so their pair defaults
        // to stable-at-current (current being the pair's SUMMED hours).
        if cols.has_future_metadata() {
            let end_raw = cols.end_date.map(|c| frame.cell(row, c).trim());
            let change_raw = cols.change_date.map(|c| frame.cell(row, c).trim());
            let future_raw = cols.future_hours.map(|c| frame.cell(row, c).trim());
            let carries_metadata = [end_raw, change_raw, future_raw]
                .iter()
                .flatten()
                .any(|cell| !cell.is_empty());
            if carries_metadata {
                let state = evaluate_assignment(
                    hours,
                    future_raw.and_then(coerce_number),
                    end_raw.and_then(coerce_date),
                    change_raw.and_then(coerce_date),
                    today,
                );
                future.insert(employee, program, state);
            }
        }
    }

    let mut table = StaffingTable::new();
    for program in &programs {
        table.add_program(program);
    }
    for employee in &employees {
        table.add_employee(employee, roles.get(employee).cloned());
    }
    for ((employee, program), hours) in &sums {
        table.set_allocation(employee, program, *hours);
    }

    (table, future)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::AssignmentStatus;

    fn frame(rows: Vec<Vec<&str>>) -> RawFrame {
        RawFrame::new(
            vec![
                "CT Name".to_string(),
                "Program Name".to_string(),
                "Allocated Monthly Hours".to_string(),
                "Account Role".to_string(),
            ],
            rows.into_iter()
                .map(|r| r.into_iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn plain_columns() -> PivotColumns {
        PivotColumns {
            employee: 0,
            program: 1,
            hours: 2,
            role: Some(3),
            end_date: None,
            change_date: None,
            future_hours: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
    }

    #[test]
    fn duplicate_pairs_are_summed_not_overwritten() {
        let frame = frame(vec![
            vec!["Alice", "Acme", "20", "CP"],
            vec!["Alice", "Acme", "20", "CP"],
        ]);
        let (table, _) = pivot(&frame, plain_columns(), today());
        assert_eq!(table.allocation("Alice", "Acme"), 40.0);
    }

    #[test]
    fn matrix_is_dense_with_zero_fill() {
        let frame = frame(vec![
            vec!["Alice", "Acme", "40", "CP"],
            vec!["Bob", "Globex", "25", "CE"],
        ]);
        let (table, _) = pivot(&frame, plain_columns(), today());
        assert_eq!(table.employee_count(), 2);
        assert_eq!(table.program_count(), 2);
        assert_eq!(table.allocation("Alice", "Globex"), 0.0);
        assert_eq!(table.allocation("Bob", "Acme"), 0.0);
    }

    #[test]
    fn zero_hour_entries_still_appear() {
        let frame = frame(vec![vec!["Alice", "Acme", "0", "CP"]]);
        let (table, _) = pivot(&frame, plain_columns(), today());
        assert!(table.contains_employee("Alice"));
        assert!(table.contains_program("Acme"));
    }

    #[test]
    fn first_observed_role_wins() {
        let frame = frame(vec![
            vec!["Alice", "Acme", "20", "CP"],
            vec!["Alice", "Globex", "20", "SCE"],
            vec!["Bob", "Acme", "10", ""],
        ]);
        let (table, _) = pivot(&frame, plain_columns(), today());
        assert_eq!(table.get("Alice").unwrap().role.as_deref(), Some("CP"));
        assert_eq!(table.get("Bob").unwrap().role, None);
    }

    #[test]
    fn unparsable_hours_read_as_zero() {
        let frame = frame(vec![
            vec!["Alice", "Acme", "n/a", "CP"],
            vec!["Alice", "Acme", "15", "CP"],
        ]);
        let (table, _) = pivot(&frame, plain_columns(), today());
        assert_eq!(table.allocation("Alice", "Acme"), 15.0);
    }

    #[test]
    fn blank_identity_rows_are_skipped() {
        let frame = frame(vec![
            vec!["", "Acme", "20", "CP"],
            vec!["Alice", "", "20", "CP"],
            vec!["Alice", "Acme", "20", "CP"],
        ]);
        let (table, _) = pivot(&frame, plain_columns(), today());
        assert_eq!(table.employee_count(), 1);
        assert_eq!(table.allocation("Alice", "Acme"), 20.0);
    }

    #[test]
    fn future_metadata_is_evaluated_per_row() {
        let frame = RawFrame::new(
            vec![
                "CT Name".to_string(),
                "Program Name".to_string(),
                "Hours".to_string(),
                "Assignment End Date".to_string(),
                "Future Allocated Hours".to_string(),
            ],
            vec![
                // Ends in 10 days: rolls off no matter what future hours say.
                vec!["Alice", "Acme", "40", "2026-08-11", "80"],
                vec!["Bob", "Acme", "30", "", "30"],
            ]
            .into_iter()
            .map(|r| r.into_iter().map(|c| c.to_string()).collect())
            .collect(),
        );
        let cols = PivotColumns {
            employee: 0,
            program: 1,
            hours: 2,
            role: None,
            end_date: Some(3),
            change_date: None,
            future_hours: Some(4),
        };
        let (_, future) = pivot(&frame, cols, today());

        let alice = future.get("Alice", "Acme").unwrap();
        assert_eq!(alice.projected_hours, 0.0);
        assert!(matches!(alice.status, AssignmentStatus::RollingOff { .. }));

        let bob = future.get("Bob", "Acme").unwrap();
        assert_eq!(bob.projected_hours, 30.0);
        assert_eq!(bob.status, AssignmentStatus::Stable);
    }

    #[test]
    fn no_metadata_columns_leave_registry_empty() {
        let frame = frame(vec![vec!["Alice", "Acme", "40", "CP"]]);
        let (_, future) = pivot(&frame, plain_columns(), today());
        assert!(future.is_empty());
    }
}
