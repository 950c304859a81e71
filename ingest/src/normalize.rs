//! FILENAME: ingest/src/normalize.rs
//! PURPOSE: The ingestion pipeline: raw frame in, canonical table out.
//! CONTEXT: Decides whether an upload is long/transactional (needs pivoting)
//! or already wide, extracts the revenue registry before numeric aggregation
//! can be polluted by it, and degrades step by step when expected columns are
//! missing. The normalizer itself never fails; unreadable files are the
//! persistence layer's problem.

use chrono::NaiveDate;

use engine::{
    recompute_utilization, FutureStateRegistry, RevenueMap, StaffingTable, STANDARD_CAPACITY,
};

use crate::coerce::{coerce_currency, coerce_hours, coerce_number};
use crate::columns::{
    find_column, find_column_containing, is_derived_header, CAPACITY_COLUMNS, CHANGE_DATE_COLUMNS,
    EMPLOYEE_COLUMNS, END_DATE_COLUMNS, FUTURE_HOURS_COLUMNS, HOURS_COLUMNS, HOURS_FRAGMENT,
    PROGRAM_COLUMNS, REVENUE_COLUMNS, ROLE_COLUMNS,
};
use crate::frame::RawFrame;
use crate::pivot::{pivot, PivotColumns};

/// The normalizer's complete output: the canonical table plus the registries
/// harvested from the raw data. These are the only contracts callers see.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ingested {
    pub table: StaffingTable,
    pub revenue: RevenueMap,
    pub future: FutureStateRegistry,
}

impl Ingested {
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Parses, pivots, and normalizes an uploaded frame.
///
/// `today` anchors the future-state windows; callers pass the current date.
/// Every step is best-effort: unresolvable columns degrade the result rather
/// than failing it, and a frame with nothing usable yields an empty table.
pub fn ingest(mut frame: RawFrame, today: NaiveDate) -> Ingested {
    if frame.is_empty() {
        return Ingested::default();
    }

    frame.trim_headers();

    // Revenue must come out before any numeric aggregation: a currency
    // column summed into the matrix would read as a gigantic allocation.
    let revenue = extract_revenue(&mut frame);

    let employee_col = find_column(frame.headers(), EMPLOYEE_COLUMNS);
    let program_col = find_column(frame.headers(), PROGRAM_COLUMNS);
    let role_col = find_column(frame.headers(), ROLE_COLUMNS);

    if let (Some(employee), Some(program)) = (employee_col, program_col) {
        // Long/transactional shape. Without a resolvable hours column there
        // is nothing to pivot; fall through to the wide path instead.
        let hours = find_column(frame.headers(), HOURS_COLUMNS)
            .or_else(|| find_column_containing(frame.headers(), HOURS_FRAGMENT));
        if let Some(hours) = hours {
            let cols = PivotColumns {
                employee,
                program,
                hours,
                role: role_col,
                end_date: find_column(frame.headers(), END_DATE_COLUMNS),
                change_date: find_column(frame.headers(), CHANGE_DATE_COLUMNS),
                future_hours: find_column(frame.headers(), FUTURE_HOURS_COLUMNS),
            };
            let (mut table, future) = pivot(&frame, cols, today);
            recompute_utilization(&mut table);
            return Ingested {
                table,
                revenue,
                future,
            };
        }
        log::warn!("long-format input without an hours column; treating as wide");
    }

    let mut table = from_wide(&frame, employee_col);
    recompute_utilization(&mut table);
    Ingested {
        table,
        revenue,
        future: FutureStateRegistry::new(),
    }
}

/// Harvests the revenue column into a program -> revenue map, aggregating
/// duplicates with max, then drops the column from the working frame.
fn extract_revenue(frame: &mut RawFrame) -> RevenueMap {
    let mut revenue = RevenueMap::default();
    let mrr_col = match find_column(frame.headers(), REVENUE_COLUMNS) {
        Some(col) => col,
        None => return revenue,
    };

    if let Some(program_col) = find_column(frame.headers(), PROGRAM_COLUMNS) {
        for row in 0..frame.row_count() {
            let program = frame.cell(row, program_col).trim();
            if program.is_empty() {
                continue;
            }
            let amount = coerce_currency(frame.cell(row, mrr_col));
            revenue
                .entry(program.to_string())
                .and_modify(|v| *v = v.max(amount))
                .or_insert(amount);
        }
    }

    frame.drop_column(mrr_col);
    revenue
}

/// Converts an already-wide frame into the canonical table.
///
/// The identity column becomes the row key; `Role` and `Capacity` columns map
/// to row metadata; every remaining column with numeric content anywhere
/// becomes an allocation column. Columns that never parse numerically (and
/// re-exported derived columns) are dropped with a warning.
fn from_wide(frame: &RawFrame, employee_col: Option<usize>) -> StaffingTable {
    let id_col = match employee_col {
        Some(col) => col,
        None => {
            log::warn!("no identity column resolved; using the first column as employee key");
            0
        }
    };
    let role_col = find_column(frame.headers(), ROLE_COLUMNS);
    let capacity_col = find_column(frame.headers(), CAPACITY_COLUMNS);

    let mut program_cols: Vec<(usize, String)> = Vec::new();
    for (col, header) in frame.headers().iter().enumerate() {
        if col == id_col || Some(col) == role_col || Some(col) == capacity_col {
            continue;
        }
        if header.is_empty() || is_derived_header(header) {
            continue;
        }
        let numeric = (0..frame.row_count()).any(|row| coerce_number(frame.cell(row, col)).is_some());
        if numeric {
            program_cols.push((col, header.clone()));
        } else {
            log::warn!("dropping column \"{}\": no numeric content", header);
        }
    }

    let mut table = StaffingTable::new();
    for (_, name) in &program_cols {
        table.add_program(name);
    }

    for row in 0..frame.row_count() {
        let name = frame.cell(row, id_col).trim();
        if name.is_empty() {
            log::warn!("skipping row {} with blank employee name", row + 2);
            continue;
        }
        if table.contains_employee(name) {
            log::warn!("skipping duplicate employee row for \"{}\"", name);
            continue;
        }

        let role = role_col
            .map(|c| frame.cell(row, c).trim())
            .filter(|r| !r.is_empty())
            .map(|r| r.to_string());
        table.add_employee(name, role);

        if let Some(cap_col) = capacity_col {
            let capacity =
                coerce_number(frame.cell(row, cap_col)).unwrap_or(STANDARD_CAPACITY);
            table.set_capacity(name, capacity);
        }
        for (col, program) in &program_cols {
            table.set_allocation(name, program, coerce_hours(frame.cell(row, *col)));
        }
    }

    table
}
