// FILENAME: persistence/src/csv_reader.rs

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use ingest::RawFrame;

use crate::PersistenceError;

/// Reads CSV content into a raw frame.
///
/// The reader is flexible about row width (ragged rows are squared off by the
/// frame) but strict about CSV structure itself: a file the parser cannot
/// read at all is a hard error for the caller to surface.
pub fn read_csv<R: Read>(reader: R) -> Result<RawFrame, PersistenceError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(PersistenceError::InvalidFormat(
            "file has no usable header row".to_string(),
        ));
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(RawFrame::new(headers, rows))
}

/// Reads a CSV file from disk into a raw frame.
pub fn read_csv_path(path: &Path) -> Result<RawFrame, PersistenceError> {
    let file = File::open(path)?;
    read_csv(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_headers_and_rows() {
        let data = "Employee,Role,Acme\nAlice,CP,40\nBob,CE,20\n";
        let frame = read_csv(data.as_bytes()).unwrap();
        assert_eq!(frame.headers().len(), 3);
        assert_eq!(frame.row_count(), 2);
        assert_eq!(frame.cell(0, 0), "Alice");
        assert_eq!(frame.cell(1, 2), "20");
    }

    #[test]
    fn ragged_rows_are_tolerated() {
        let data = "Employee,Acme,Globex\nAlice,40\nBob,20,30,99\n";
        let frame = read_csv(data.as_bytes()).unwrap();
        assert_eq!(frame.cell(0, 2), "");
        assert_eq!(frame.cell(1, 2), "30");
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let data = "Employee,Program MRR\nAlice,\"$12,500\"\n";
        let frame = read_csv(data.as_bytes()).unwrap();
        assert_eq!(frame.cell(0, 1), "$12,500");
    }

    #[test]
    fn blank_header_row_is_invalid() {
        let err = read_csv(",,\n1,2,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidFormat(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_csv_path(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, PersistenceError::Io(_)));
    }
}
