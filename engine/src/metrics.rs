//! FILENAME: engine/src/metrics.rs
//! PURPOSE: Derived-metric computation over the canonical staffing table.
//! CONTEXT: Everything here is a pure function of the table plus the
//! registries it is handed. Utilization is the only derived value stored on
//! the table itself; cost and margin figures are recomputed on demand and
//! never cached.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::future::FutureStateRegistry;
use crate::rate_card::RateCard;
use crate::table::{RevenueMap, StaffingTable, STANDARD_CAPACITY};

/// Recomputes `utilization_pct` for every row: allocated hours as a rounded
/// integer percentage of capacity, 0 when capacity is not positive.
///
/// Idempotent; must run after every structural or value mutation. The
/// mutation layer calls it internally so the table is never observable with
/// stale utilization.
pub fn recompute_utilization(table: &mut StaffingTable) {
    for row in table.rows_mut() {
        let total = row.allocated_hours();
        let pct = if row.capacity > 0.0 {
            (total / row.capacity * 100.0).round() as i64
        } else {
            0
        };
        row.set_utilization(pct);
    }
}

/// Contributing margin percentage for one program.
///
/// With no recorded revenue the value is a sentinel: -100 flags work with no
/// attached revenue, 0 means no activity at all. Both are exact by contract.
pub fn margin_pct(cost: f64, revenue: f64) -> f64 {
    if revenue > 0.0 {
        (revenue - cost) / revenue * 100.0
    } else if cost > 0.0 {
        -100.0
    } else {
        0.0
    }
}

/// Extended cost per program: sum over employees of hours x role rate.
pub fn program_costs(table: &StaffingTable, rates: &RateCard) -> FxHashMap<String, f64> {
    let mut costs: FxHashMap<String, f64> = table
        .programs()
        .iter()
        .map(|p| (p.clone(), 0.0))
        .collect();

    for row in table.rows() {
        let rate = rates.rate_for(row.role.as_deref().unwrap_or(""));
        if rate == 0.0 {
            continue;
        }
        for program in table.programs() {
            *costs.entry(program.clone()).or_insert(0.0) += row.allocation(program) * rate;
        }
    }
    costs
}

/// The per-program profitability block handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramMargin {
    pub revenue: f64,
    pub cost: f64,
    pub margin_pct: f64,
    /// Margin recomputed with each assignment's projected hours.
    pub margin_fut: f64,
    /// `margin_fut - margin_pct`; positive means the trend is improving.
    pub delta: f64,
}

/// Computes current and projected margin for every program column.
///
/// Projected cost substitutes each (employee, program) pair's projected hours
/// from the future-state registry, defaulting to current hours for pairs the
/// registry does not know.
pub fn margin_report(
    table: &StaffingTable,
    revenue: &RevenueMap,
    future: &FutureStateRegistry,
    rates: &RateCard,
) -> FxHashMap<String, ProgramMargin> {
    let mut report = FxHashMap::default();

    for program in table.programs() {
        let mut cost = 0.0;
        let mut cost_fut = 0.0;
        for row in table.rows() {
            let rate = rates.rate_for(row.role.as_deref().unwrap_or(""));
            let hours = row.allocation(program);
            cost += hours * rate;
            cost_fut += future.projected_hours(&row.name, program, hours) * rate;
        }

        let mrr = revenue.get(program).copied().unwrap_or(0.0);
        let current = margin_pct(cost, mrr);
        let projected = margin_pct(cost_fut, mrr);
        report.insert(
            program.clone(),
            ProgramMargin {
                revenue: mrr,
                cost,
                margin_pct: current,
                margin_fut: projected,
                delta: projected - current,
            },
        );
    }
    report
}

/// Result of the role-group utilization reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupUtilization {
    pub pct: f64,
    pub allocated_hours: f64,
    pub total_capacity: f64,
}

impl GroupUtilization {
    const EMPTY: GroupUtilization = GroupUtilization {
        pct: 0.0,
        allocated_hours: 0.0,
        total_capacity: 0.0,
    };
}

/// Utilization for the employees whose role is in `roles` (case-insensitive).
///
/// Capacity here is headcount x the standard constant, not the rows' own
/// capacity fields. Returns zeros when nothing matches.
pub fn group_utilization(table: &StaffingTable, roles: &[&str]) -> GroupUtilization {
    let wanted: Vec<String> = roles.iter().map(|r| r.trim().to_uppercase()).collect();

    let mut allocated = 0.0;
    let mut headcount = 0usize;
    for row in table.rows() {
        let role = match &row.role {
            Some(r) => r.trim().to_uppercase(),
            None => continue,
        };
        if wanted.iter().any(|w| *w == role) {
            allocated += row.allocated_hours();
            headcount += 1;
        }
    }

    if headcount == 0 {
        return GroupUtilization::EMPTY;
    }
    let total_capacity = headcount as f64 * STANDARD_CAPACITY;
    GroupUtilization {
        pct: allocated / total_capacity * 100.0,
        allocated_hours: allocated,
        total_capacity,
    }
}

/// Dashboard reading over a role group using the rows' real capacities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleMetrics {
    /// Mean of the derived utilization column over the group.
    pub avg_utilization: f64,
    /// Group capacity minus group allocated hours.
    pub unused_capacity: f64,
}

/// Average utilization and unused capacity for a role group. Unlike
/// `group_utilization`, this sums each matched row's recorded capacity.
pub fn role_metrics(table: &StaffingTable, roles: &[&str]) -> RoleMetrics {
    let wanted: Vec<String> = roles.iter().map(|r| r.trim().to_uppercase()).collect();

    let mut util_sum = 0.0;
    let mut capacity = 0.0;
    let mut allocated = 0.0;
    let mut headcount = 0usize;
    for row in table.rows() {
        let role = match &row.role {
            Some(r) => r.trim().to_uppercase(),
            None => continue,
        };
        if wanted.iter().any(|w| *w == role) {
            util_sum += row.utilization_pct() as f64;
            capacity += row.capacity;
            allocated += row.allocated_hours();
            headcount += 1;
        }
    }

    if headcount == 0 {
        return RoleMetrics {
            avg_utilization: 0.0,
            unused_capacity: 0.0,
        };
    }
    RoleMetrics {
        avg_utilization: util_sum / headcount as f64,
        unused_capacity: capacity - allocated,
    }
}

/// Total allocated hours per program column.
pub fn program_hours(table: &StaffingTable) -> FxHashMap<String, f64> {
    let mut totals: FxHashMap<String, f64> = table
        .programs()
        .iter()
        .map(|p| (p.clone(), 0.0))
        .collect();
    for row in table.rows() {
        for program in table.programs() {
            *totals.entry(program.clone()).or_insert(0.0) += row.allocation(program);
        }
    }
    totals
}
