//! FILENAME: engine/src/future.rs
//! PURPOSE: Per-assignment future-state projection (rolling off / ramping / stable).
//! CONTEXT: Long-format sources may carry an end date, a change date, and a
//! future hour count per assignment row. Pivoting destroys that row-level
//! metadata, so it is evaluated up front and kept in a registry keyed by
//! (employee, program). The projected hours feed the forward-looking margin.

use chrono::{Duration, NaiveDate};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// An assignment ending within this many days counts as rolling off.
pub const ROLL_OFF_WINDOW_DAYS: i64 = 30;

/// A known hours change within this many days counts as ramping.
pub const RAMP_WINDOW_DAYS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RampDirection {
    Increasing,
    Decreasing,
}

/// What is known about an assignment's near-term trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssignmentStatus {
    /// No imminent change; projected hours equal current hours.
    Stable,
    /// End date within the roll-off window; projected hours are zero.
    RollingOff { end_date: NaiveDate },
    /// Hours change scheduled within the ramp window.
    Ramping {
        direction: RampDirection,
        target_hours: f64,
        change_date: NaiveDate,
    },
}

/// The projection for one (employee, program) assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureState {
    pub projected_hours: f64,
    pub status: AssignmentStatus,
}

impl FutureState {
    pub fn stable(current_hours: f64) -> Self {
        FutureState {
            projected_hours: current_hours,
            status: AssignmentStatus::Stable,
        }
    }
}

/// Evaluates one assignment row against a fixed three-way priority:
/// rolling off beats ramping beats stable. The windows are inclusive and an
/// end date already in the past still rolls the assignment off.
pub fn evaluate_assignment(
    current_hours: f64,
    future_hours: Option<f64>,
    end_date: Option<NaiveDate>,
    change_date: Option<NaiveDate>,
    today: NaiveDate,
) -> FutureState {
    if let Some(end) = end_date {
        if end <= today + Duration::days(ROLL_OFF_WINDOW_DAYS) {
            return FutureState {
                projected_hours: 0.0,
                status: AssignmentStatus::RollingOff { end_date: end },
            };
        }
    }

    let target = future_hours.unwrap_or(current_hours);
    if let Some(change) = change_date {
        if change <= today + Duration::days(RAMP_WINDOW_DAYS) && target != current_hours {
            let direction = if target > current_hours {
                RampDirection::Increasing
            } else {
                RampDirection::Decreasing
            };
            return FutureState {
                projected_hours: target,
                status: AssignmentStatus::Ramping {
                    direction,
                    target_hours: target,
                    change_date: change,
                },
            };
        }
    }

    FutureState::stable(current_hours)
}

/// (employee, program) -> projection. Absent pairs are implicitly stable at
/// their current hours; the registry only holds what ingestion evaluated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FutureStateRegistry {
    entries: FxHashMap<(String, String), FutureState>,
}

impl FutureStateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn insert(&mut self, employee: &str, program: &str, state: FutureState) {
        self.entries
            .insert((employee.to_string(), program.to_string()), state);
    }

    pub fn get(&self, employee: &str, program: &str) -> Option<&FutureState> {
        self.entries
            .get(&(employee.to_string(), program.to_string()))
    }

    /// Projected hours for a pair, defaulting to the pair's current hours
    /// when no projection was recorded.
    pub fn projected_hours(&self, employee: &str, program: &str, current_hours: f64) -> f64 {
        self.get(employee, program)
            .map_or(current_hours, |s| s.projected_hours)
    }

    /// Drops every entry for a removed program column.
    pub fn remove_program(&mut self, program: &str) {
        self.entries.retain(|(_, p), _| p != program);
    }

    /// Drops every entry for a removed employee.
    pub fn remove_employee(&mut self, employee: &str) {
        self.entries.retain(|(e, _), _| e != employee);
    }
}
