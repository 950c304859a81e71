//! FILENAME: engine/src/table.rs
//! PURPOSE: The canonical staffing table (employee rows x dynamic program columns).
//! CONTEXT: This file defines `StaffingTable`, the wide-format matrix every
//! other engine component operates on. A fixed set of per-row metadata (role,
//! capacity, derived utilization) is kept structurally separate from the
//! dynamically-keyed allocation columns, so "is this a program?" is never
//! answered by sniffing value types.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Standard monthly hours ceiling used when a data source carries no
/// capacity of its own.
pub const STANDARD_CAPACITY: f64 = 152.0;

/// Program name -> recurring revenue. Lives alongside the table with its own
/// lifecycle: entries survive table edits until their program column is
/// explicitly removed.
pub type RevenueMap = FxHashMap<String, f64>;

/// One employee row: identity, metadata, and a dense allocation mapping.
///
/// `allocations` always contains an entry for every program registered on the
/// owning table (missing combinations are stored as 0, never absent).
/// `utilization_pct` is derived; it has no public setter and is recomputed by
/// the metrics engine after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRow {
    pub name: String,
    pub role: Option<String>,
    pub capacity: f64,
    allocations: FxHashMap<String, f64>,
    utilization_pct: i64,
}

impl EmployeeRow {
    pub fn new(name: impl Into<String>, role: Option<String>) -> Self {
        EmployeeRow {
            name: name.into(),
            role,
            capacity: STANDARD_CAPACITY,
            allocations: FxHashMap::default(),
            utilization_pct: 0,
        }
    }

    /// Hours allocated to one program (0 for programs unknown to this row).
    pub fn allocation(&self, program: &str) -> f64 {
        self.allocations.get(program).copied().unwrap_or(0.0)
    }

    /// Total hours across all allocation columns.
    pub fn allocated_hours(&self) -> f64 {
        self.allocations.values().sum()
    }

    /// The derived utilization percentage (allocated / capacity * 100,
    /// rounded). Only meaningful after a recompute pass.
    pub fn utilization_pct(&self) -> i64 {
        self.utilization_pct
    }

    pub(crate) fn set_utilization(&mut self, pct: i64) {
        self.utilization_pct = pct;
    }

    fn set_allocation(&mut self, program: &str, hours: f64) {
        self.allocations.insert(program.to_string(), clamp_hours(hours));
    }
}

/// Coerces an hour value to a safe non-negative numeric.
/// NaN and negative inputs become 0 rather than poisoning downstream sums.
pub fn clamp_hours(hours: f64) -> f64 {
    if hours.is_nan() || hours < 0.0 {
        0.0
    } else {
        hours
    }
}

/// The canonical wide table: one row per employee, one column per program.
///
/// Employee identities and program names are unique within a table. Rows and
/// program columns keep their insertion order so repeated renders are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffingTable {
    programs: Vec<String>,
    rows: Vec<EmployeeRow>,
}

impl StaffingTable {
    /// Creates a new, empty table.
    pub fn new() -> Self {
        StaffingTable {
            programs: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn employee_count(&self) -> usize {
        self.rows.len()
    }

    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    /// Program columns in insertion order.
    pub fn programs(&self) -> &[String] {
        &self.programs
    }

    /// Employee rows in insertion order.
    pub fn rows(&self) -> &[EmployeeRow] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [EmployeeRow] {
        &mut self.rows
    }

    pub fn get(&self, employee: &str) -> Option<&EmployeeRow> {
        self.rows.iter().find(|r| r.name == employee)
    }

    fn get_mut(&mut self, employee: &str) -> Option<&mut EmployeeRow> {
        self.rows.iter_mut().find(|r| r.name == employee)
    }

    pub fn contains_employee(&self, employee: &str) -> bool {
        self.rows.iter().any(|r| r.name == employee)
    }

    pub fn contains_program(&self, program: &str) -> bool {
        self.programs.iter().any(|p| p == program)
    }

    /// Adds an employee with zero hours in every existing program column.
    /// Returns false (leaving the table untouched) if the identity is taken.
    pub fn add_employee(&mut self, name: &str, role: Option<String>) -> bool {
        if name.is_empty() || self.contains_employee(name) {
            return false;
        }
        let mut row = EmployeeRow::new(name, role);
        for program in &self.programs {
            row.allocations.insert(program.clone(), 0.0);
        }
        self.rows.push(row);
        true
    }

    /// Removes an employee row. Returns false if the identity is unknown.
    pub fn remove_employee(&mut self, name: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.name != name);
        self.rows.len() != before
    }

    /// Registers a program column, dense-filling 0 hours into every row.
    /// Returns false (leaving the table untouched) if the name is taken.
    pub fn add_program(&mut self, name: &str) -> bool {
        if name.is_empty() || self.contains_program(name) {
            return false;
        }
        self.programs.push(name.to_string());
        for row in &mut self.rows {
            row.allocations.insert(name.to_string(), 0.0);
        }
        true
    }

    /// Drops a program column from the registry and every row.
    /// Returns false if the program is unknown.
    pub fn remove_program(&mut self, name: &str) -> bool {
        let before = self.programs.len();
        self.programs.retain(|p| p != name);
        if self.programs.len() == before {
            return false;
        }
        for row in &mut self.rows {
            row.allocations.remove(name);
        }
        true
    }

    /// Writes one allocation cell, clamped non-negative. Returns false when
    /// either the employee or the program does not exist.
    pub fn set_allocation(&mut self, employee: &str, program: &str, hours: f64) -> bool {
        if !self.contains_program(program) {
            return false;
        }
        match self.get_mut(employee) {
            Some(row) => {
                row.set_allocation(program, hours);
                true
            }
            None => false,
        }
    }

    pub fn allocation(&self, employee: &str, program: &str) -> f64 {
        self.get(employee).map_or(0.0, |r| r.allocation(program))
    }

    /// Overwrites an employee's role. Used by ingestion; returns false for
    /// unknown identities.
    pub fn set_role(&mut self, employee: &str, role: Option<String>) -> bool {
        match self.get_mut(employee) {
            Some(row) => {
                row.role = role;
                true
            }
            None => false,
        }
    }

    /// Overwrites an employee's capacity. Used by ingestion when the source
    /// carries its own capacity column; nothing in the engine calls this after
    /// a table is built, so a recorded capacity is never silently replaced.
    pub fn set_capacity(&mut self, employee: &str, capacity: f64) -> bool {
        match self.get_mut(employee) {
            Some(row) => {
                row.capacity = capacity;
                true
            }
            None => false,
        }
    }
}
