//! FILENAME: persistence/src/lib.rs
//! PURPOSE: File-backed session bootstrap and CSV import.
//! CONTEXT: The engine itself never touches the filesystem. This crate reads
//! CSV files into raw frames, runs the ingestion pipeline, and installs the
//! result into a session. The persisted default table is read-only by design:
//! uploads and edits live in session memory and are never written back.

pub mod csv_reader;
pub mod error;

pub use csv_reader::{read_csv, read_csv_path};
pub use error::PersistenceError;

use std::path::Path;

use chrono::NaiveDate;
use engine::Session;
use ingest::Ingested;

/// Well-known file name of the persisted default table.
pub const DEFAULT_DATA_FILE: &str = "staffing_db.csv";

/// Reads and normalizes a CSV file, anchoring future-state windows at
/// `today`. Fails only on unreadable input; a readable file always produces
/// a (possibly empty) normalized result.
pub fn load_table_at(path: &Path, today: NaiveDate) -> Result<Ingested, PersistenceError> {
    let frame = read_csv_path(path)?;
    Ok(ingest::ingest(frame, today))
}

/// Reads and normalizes a CSV file against the current date.
pub fn load_table(path: &Path) -> Result<Ingested, PersistenceError> {
    load_table_at(path, chrono::Local::now().date_naive())
}

/// Opens a session from the persisted default table at `path`.
///
/// Missing or unreadable defaults are not fatal: the session just starts
/// empty. The default file is never written back to.
pub fn open_session(path: &Path) -> Session {
    let mut session = Session::new();
    if !path.exists() {
        return session;
    }
    match load_table(path) {
        Ok(ingested) => {
            session.install(ingested.table, ingested.revenue, ingested.future);
        }
        Err(err) => {
            log::warn!("could not load default table {}: {}", path.display(), err);
        }
    }
    session
}

/// Imports an uploaded CSV into an existing session, replacing its contents
/// wholesale. On failure the prior session state is left untouched and the
/// error is returned for the caller to surface.
pub fn import_file(session: &mut Session, path: &Path) -> Result<(), PersistenceError> {
    let ingested = load_table(path)?;
    session.install(ingested.table, ingested.revenue, ingested.future);
    Ok(())
}
