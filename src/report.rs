//! Report rows and the CSV file they are written to.

use std::path::Path;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::runner::BatchOutcome;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report unwritable: {0}")]
    Io(String),
    #[error("report malformed: {0}")]
    Parse(String),
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            ReportError::Io(format!("{err}"))
        } else {
            ReportError::Parse(format!("{err}"))
        }
    }
}

/// One line of the report. Column titles come from the serde renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "Algorithm")]
    pub algorithm: String,
    #[serde(rename = "Key Length (bits)")]
    pub key_length: u32,
    #[serde(rename = "Records")]
    pub records: usize,
    #[serde(rename = "Encryption Time (s)", serialize_with = "shortest_decimal")]
    pub encryption_time: f64,
}

impl ReportRow {
    /// `records` is the requested batch size, even when fewer records were
    /// available to encrypt.
    pub fn from_outcome(outcome: &BatchOutcome, records: usize) -> Self {
        Self {
            algorithm: outcome.algorithm.tag().to_string(),
            key_length: outcome.key_length_bits,
            records,
            encryption_time: round_seconds(outcome.elapsed_secs()),
        }
    }
}

/// Rounds to two decimal places.
pub fn round_seconds(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

// Writes `2` rather than `2.0`.
fn shortest_decimal<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Writes all rows at once, replacing whatever was at `path`.
pub fn write_report(path: impl AsRef<Path>, rows: &[ReportRow]) -> Result<(), ReportError> {
    let path = path.as_ref();
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)?;
    writer.write_record(["Algorithm", "Key Length (bits)", "Records", "Encryption Time (s)"])?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .flush()
        .map_err(|e| ReportError::Io(format!("{e}")))?;
    log::debug!("wrote {} report rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn read_report(path: impl AsRef<Path>) -> Result<Vec<ReportRow>, ReportError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        let row: ReportRow = row?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::{read_report, round_seconds, write_report, ReportRow};
    use crate::crypto::Algorithm;
    use crate::runner::BatchOutcome;
    use std::fs;
    use std::time::Duration;

    fn row(algorithm: &str, key_length: u32, records: usize, time: f64) -> ReportRow {
        ReportRow {
            algorithm: algorithm.to_string(),
            key_length,
            records,
            encryption_time: time,
        }
    }

    #[test]
    fn rounding_is_idempotent() {
        for value in [0.0, 0.004, 0.005, 1.234_567, 12.999, 3000.125] {
            let once = round_seconds(value);
            assert_eq!(round_seconds(once), once);
        }
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_seconds(1.234_567), 1.23);
        assert_eq!(round_seconds(0.996), 1.0);
        assert_eq!(round_seconds(0.001), 0.0);
    }

    #[test]
    fn formats_outcome_with_requested_batch_size() {
        let outcome = BatchOutcome {
            algorithm: Algorithm::TripleDes,
            key_length_bits: 168,
            elapsed: Duration::from_millis(1_237),
            average_per_record: Some(0.1),
            ciphertexts: Vec::new(),
        };
        assert_eq!(
            ReportRow::from_outcome(&outcome, 3000),
            row("3DES", 168, 3000, 1.24)
        );
    }

    #[test]
    fn writes_fixed_header_and_plain_numbers() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("results.csv");
        write_report(&path, &[row("AES", 128, 3, 0.5), row("RC4", 256, 6, 2.0)])
            .expect("report should write");
        let contents = fs::read_to_string(&path).expect("read report");
        assert_eq!(
            contents,
            "Algorithm,Key Length (bits),Records,Encryption Time (s)\nAES,128,3,0.5\nRC4,256,6,2\n"
        );
    }

    #[test]
    fn empty_report_still_has_header() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("results.csv");
        write_report(&path, &[]).expect("report should write");
        let contents = fs::read_to_string(&path).expect("read report");
        assert_eq!(contents, "Algorithm,Key Length (bits),Records,Encryption Time (s)\n");
        assert!(read_report(&path).expect("read").is_empty());
    }

    #[test]
    fn overwrites_and_reads_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("results.csv");
        fs::write(&path, "stale contents that are not a report\n").expect("seed file");
        let rows = vec![row("DES", 56, 9000, 0.12), row("3DES", 168, 9000, 0.4)];
        write_report(&path, &rows).expect("report should write");
        assert_eq!(read_report(&path).expect("read"), rows);
    }

    #[test]
    fn unwritable_destination_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing-dir").join("results.csv");
        let err = write_report(&path, &[row("AES", 128, 3, 0.0)]).unwrap_err();
        assert!(format!("{err}").contains("report unwritable"));
    }
}
