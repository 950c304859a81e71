//! FILENAME: persistence/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV read error: {0}")]
    CsvRead(#[from] csv::Error),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),
}
