//! CSV row contract shared with downstream report consumers (`with-csv`).
//!
//! Output rows carry exactly two columns, `email` then `status`, header
//! included. Existing consumers parse that shape; keep it stable.

use std::io;

use thiserror::Error;

use crate::verify::VerificationResult;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("input is missing an 'email' header column")]
    MissingEmailColumn,
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Reads addresses out of a CSV with an `email` header column (matched
/// case-insensitively). Values are trimmed; empty cells are skipped.
pub fn read_addresses<R: io::Read>(reader: R) -> Result<Vec<String>, ReportError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let column = headers
        .iter()
        .position(|name| name.trim().eq_ignore_ascii_case("email"))
        .ok_or(ReportError::MissingEmailColumn)?;

    let mut addresses = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if let Some(value) = record.get(column) {
            let value = value.trim();
            if !value.is_empty() {
                addresses.push(value.to_string());
            }
        }
    }
    Ok(addresses)
}

/// Writes the `email,status` rows, header first.
pub fn write_report<W: io::Write>(
    writer: W,
    results: &[VerificationResult],
) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["email", "status"])?;
    for result in results {
        csv_writer.write_record([result.email.as_str(), result.status.as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}
