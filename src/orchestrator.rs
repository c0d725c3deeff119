//! Drives a whole benchmark: load the records, run every trial in order,
//! then write the report once.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{BenchConfig, ConfigError, TrialSpec};
use crate::crypto::Algorithm;
use crate::driver::DriverError;
use crate::records::{load_records, Record, RecordError};
use crate::report::{write_report, ReportError, ReportRow};
use crate::runner::measure_encryption;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("record error: {0}")]
    Records(#[from] RecordError),
    #[error("encryption error: {0}")]
    Encryption(#[from] DriverError),
    #[error("report error: {0}")]
    Report(#[from] ReportError),
}

#[derive(Debug)]
pub struct RunSummary {
    pub records_loaded: usize,
    pub rows: Vec<ReportRow>,
    pub output_path: PathBuf,
}

/// Runs `trials` in the order given and returns one row per trial. Each trial
/// encrypts the first `batch_size` records, or all of them when fewer exist.
pub fn run_trials(records: &[Record], trials: &[TrialSpec]) -> Result<Vec<ReportRow>, BenchError> {
    let mut rows = Vec::with_capacity(trials.len());
    let mut current_batch: Option<usize> = None;
    let mut current_algorithm: Option<Algorithm> = None;

    for trial in trials {
        if current_batch != Some(trial.batch_size) {
            log::info!("Testing {} records:", trial.batch_size);
            current_batch = Some(trial.batch_size);
            current_algorithm = None;
        }
        if current_algorithm != Some(trial.algorithm) {
            log::info!("Algorithm: {}", trial.algorithm);
            current_algorithm = Some(trial.algorithm);
        }

        let subset = &records[..trial.batch_size.min(records.len())];
        let outcome = measure_encryption(subset, &trial.key, trial.algorithm)?;
        let row = ReportRow::from_outcome(&outcome, trial.batch_size);
        log::info!(
            "Key Size: {} bits, Records: {}, Time: {:.2} s",
            row.key_length,
            row.records,
            outcome.elapsed_secs()
        );
        if let Some(average) = outcome.average_per_record {
            log::debug!("{} average per record: {average:.9} s", trial.algorithm);
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Full run for `config`. Nothing is written unless every trial succeeds.
pub fn run_benchmark(config: &BenchConfig) -> Result<RunSummary, BenchError> {
    config.validate()?;
    let records = load_records(&config.input_path)?;
    log::info!(
        "Loaded {} records from {}",
        records.len(),
        config.input_path.display()
    );

    let rows = run_trials(&records, &config.trials())?;
    write_report(&config.output_path, &rows)?;
    log::info!(
        "Results have been exported to {}",
        config.output_path.display()
    );

    Ok(RunSummary {
        records_loaded: records.len(),
        rows,
        output_path: config.output_path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::{run_benchmark, run_trials, BenchError};
    use crate::config::{AlgorithmKeys, BenchConfig, TrialSpec};
    use crate::crypto::Algorithm;
    use crate::records::Record;

    fn records(count: usize) -> Vec<Record> {
        (0..count)
            .map(|i| [("id", i.to_string())].into_iter().collect())
            .collect()
    }

    #[test]
    fn one_row_per_trial_in_order() {
        let trials = vec![
            TrialSpec::new(2, Algorithm::Aes, "1234567890123456"),
            TrialSpec::new(2, Algorithm::Des, "12345678"),
            TrialSpec::new(4, Algorithm::Rc4, "12345678901234567890123456789012"),
        ];
        let rows = run_trials(&records(4), &trials).expect("trials should run");
        let triples: Vec<_> = rows
            .iter()
            .map(|r| (r.algorithm.as_str(), r.key_length, r.records))
            .collect();
        assert_eq!(triples, vec![("AES", 128, 2), ("DES", 56, 2), ("RC4", 256, 4)]);
        assert!(rows.iter().all(|r| r.encryption_time >= 0.0));
    }

    #[test]
    fn oversized_batch_uses_available_records() {
        let trials = vec![TrialSpec::new(50, Algorithm::TripleDes, "123456789012345678901234")];
        let rows = run_trials(&records(3), &trials).expect("trials should run");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].records, 50);
    }

    #[test]
    fn zero_batch_size_is_rejected_before_loading() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = BenchConfig {
            input_path: dir.path().join("absent.csv"),
            output_path: dir.path().join("out.csv"),
            batch_sizes: vec![0],
            algorithms: vec![AlgorithmKeys {
                algorithm: Algorithm::Aes,
                keys: vec!["k".to_string()],
            }],
        };
        assert!(matches!(run_benchmark(&config), Err(BenchError::Config(_))));
        assert!(!config.output_path.exists());
    }
}
