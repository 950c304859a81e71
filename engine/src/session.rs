//! FILENAME: engine/src/session.rs
//! PURPOSE: The explicit session context: table + registries + undo history.
//! CONTEXT: All mutable state lives here and is owned by exactly one logical
//! user. Mutations validate, snapshot, apply, then recompute the derived
//! utilization column internally, so callers can never observe the table
//! between a change and its derived-column update.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::future::FutureStateRegistry;
use crate::history::HistoryStack;
use crate::metrics::{self, ProgramMargin};
use crate::rate_card::RateCard;
use crate::table::{RevenueMap, StaffingTable};
use rustc_hash::FxHashMap;

/// A mutation was aimed at an invalid target. The session state is untouched
/// whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("employee \"{0}\" already exists")]
    DuplicateEmployee(String),

    #[error("program \"{0}\" already exists")]
    DuplicateProgram(String),

    #[error("no employee named \"{0}\"")]
    UnknownEmployee(String),

    #[error("no program named \"{0}\"")]
    UnknownProgram(String),
}

/// The cell-level and structural edits a caller can apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    /// Overwrite one allocation cell (hours are clamped non-negative).
    SetCell {
        employee: String,
        program: String,
        hours: f64,
    },
    AddEmployee {
        name: String,
        role: Option<String>,
    },
    RemoveEmployee {
        name: String,
    },
    AddProgram {
        name: String,
        revenue: f64,
    },
    RemoveProgram {
        name: String,
    },
}

/// One user's working state. Created once per session from the persisted
/// default source or an upload; replaced wholesale on re-upload, mutated
/// incrementally otherwise.
#[derive(Debug, Clone, Default)]
pub struct Session {
    table: StaffingTable,
    revenue: RevenueMap,
    future: FutureStateRegistry,
    history: HistoryStack,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the session contents wholesale (upload / reset). History is
    /// cleared: undo never crosses a dataset boundary. Utilization is
    /// recomputed so the installed table is immediately consistent.
    pub fn install(
        &mut self,
        mut table: StaffingTable,
        revenue: RevenueMap,
        future: FutureStateRegistry,
    ) {
        metrics::recompute_utilization(&mut table);
        self.table = table;
        self.revenue = revenue;
        self.future = future;
        self.history.clear();
    }

    pub fn table(&self) -> &StaffingTable {
        &self.table
    }

    pub fn revenue(&self) -> &RevenueMap {
        &self.revenue
    }

    pub fn future(&self) -> &FutureStateRegistry {
        &self.future
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Applies one mutation: validate the target, snapshot the pre-mutation
    /// table, mutate, patch the registries, and recompute utilization.
    /// Invalid targets are rejected without touching state or history.
    pub fn apply(&mut self, op: Mutation) -> Result<(), MutationError> {
        match op {
            Mutation::SetCell {
                employee,
                program,
                hours,
            } => {
                if !self.table.contains_employee(&employee) {
                    return Err(MutationError::UnknownEmployee(employee));
                }
                if !self.table.contains_program(&program) {
                    return Err(MutationError::UnknownProgram(program));
                }
                self.history.push(self.table.clone());
                self.table.set_allocation(&employee, &program, hours);
            }
            Mutation::AddEmployee { name, role } => {
                if self.table.contains_employee(&name) {
                    log::debug!("add-employee rejected: \"{}\" already exists", name);
                    return Err(MutationError::DuplicateEmployee(name));
                }
                self.history.push(self.table.clone());
                self.table.add_employee(&name, role);
            }
            Mutation::RemoveEmployee { name } => {
                if !self.table.contains_employee(&name) {
                    return Err(MutationError::UnknownEmployee(name));
                }
                self.history.push(self.table.clone());
                self.table.remove_employee(&name);
                self.future.remove_employee(&name);
            }
            Mutation::AddProgram { name, revenue } => {
                if self.table.contains_program(&name) {
                    log::debug!("add-program rejected: \"{}\" already exists", name);
                    return Err(MutationError::DuplicateProgram(name));
                }
                self.history.push(self.table.clone());
                self.table.add_program(&name);
                self.revenue.insert(name, revenue);
            }
            Mutation::RemoveProgram { name } => {
                if !self.table.contains_program(&name) {
                    return Err(MutationError::UnknownProgram(name));
                }
                self.history.push(self.table.clone());
                self.table.remove_program(&name);
                // Orphaned revenue entries would silently resurrect if the
                // program were re-added later.
                self.revenue.remove(&name);
                self.future.remove_program(&name);
            }
        }

        metrics::recompute_utilization(&mut self.table);
        Ok(())
    }

    /// Restores the most recent snapshot. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.table = snapshot;
                true
            }
            None => {
                log::debug!("undo requested with empty history");
                false
            }
        }
    }

    /// The margin block for the presentation layer, derived on demand.
    pub fn margin_report(&self, rates: &RateCard) -> FxHashMap<String, ProgramMargin> {
        metrics::margin_report(&self.table, &self.revenue, &self.future, rates)
    }
}
