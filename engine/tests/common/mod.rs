//! FILENAME: tests/common/mod.rs
//! Test fixtures for staffing-engine integration tests.

use engine::{FutureStateRegistry, RevenueMap, Session, StaffingTable};

/// A small team table mirroring the shape real uploads produce.
pub fn sample_table() -> StaffingTable {
    let mut table = StaffingTable::new();
    table.add_program("Accenture");
    table.add_program("Google");

    let people = [
        ("Mitch Ursick", "CSM", 10.0, 60.0),
        ("Noah Bisel", "CE", 80.0, 20.0),
        ("Kevin Steger", "CP", 20.0, 60.0),
        ("Nicki Williams", "CE", 0.0, 15.0),
    ];
    for (name, role, accenture, google) in people {
        table.add_employee(name, Some(role.to_string()));
        table.set_allocation(name, "Accenture", accenture);
        table.set_allocation(name, "Google", google);
    }
    table
}

pub fn sample_revenue() -> RevenueMap {
    let mut revenue = RevenueMap::default();
    revenue.insert("Accenture".to_string(), 25000.0);
    revenue.insert("Google".to_string(), 18000.0);
    revenue
}

/// A ready-to-mutate session over the sample data.
pub fn sample_session() -> Session {
    let mut session = Session::new();
    session.install(sample_table(), sample_revenue(), FutureStateRegistry::new());
    session
}
