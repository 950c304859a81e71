//! FILENAME: engine/src/lib.rs
//! PURPOSE: Main library entry point for the staffing engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod future;
pub mod history;
pub mod metrics;
pub mod rate_card;
pub mod session;
pub mod table;

// Re-export commonly used types at the crate root
pub use future::{
    evaluate_assignment, AssignmentStatus, FutureState, FutureStateRegistry, RampDirection,
    RAMP_WINDOW_DAYS, ROLL_OFF_WINDOW_DAYS,
};
pub use history::{HistoryStack, MAX_HISTORY_SIZE};
pub use metrics::{
    group_utilization, margin_pct, margin_report, program_costs, program_hours,
    recompute_utilization, role_metrics, GroupUtilization, ProgramMargin, RoleMetrics,
};
pub use rate_card::{RateCard, TEAM_ROLES};
pub use session::{Mutation, MutationError, Session};
pub use table::{clamp_hours, EmployeeRow, RevenueMap, StaffingTable, STANDARD_CAPACITY};
