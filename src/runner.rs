//! Times one sequential encryption pass over a batch of records.

use std::time::{Duration, Instant};

use crate::crypto::Algorithm;
use crate::driver::{encrypt_record_with, DriverError};
use crate::records::Record;

#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub algorithm: Algorithm,
    pub key_length_bits: u32,
    pub elapsed: Duration,
    /// Seconds per record, unrounded. `None` for an empty batch.
    pub average_per_record: Option<f64>,
    /// Envelopes in the same order as the input records.
    pub ciphertexts: Vec<String>,
}

impl BatchOutcome {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Encrypts `records` one after another and measures the whole pass. The
/// first failing record aborts the batch.
pub fn measure_encryption(
    records: &[Record],
    key: &str,
    algorithm: Algorithm,
) -> Result<BatchOutcome, DriverError> {
    let start = Instant::now();
    let ciphertexts = records
        .iter()
        .map(|record| encrypt_record_with(record, key, algorithm))
        .collect::<Result<Vec<_>, _>>()?;
    let elapsed = start.elapsed();

    let average_per_record = if records.is_empty() {
        None
    } else {
        Some(elapsed.as_secs_f64() / records.len() as f64)
    };

    Ok(BatchOutcome {
        algorithm,
        key_length_bits: algorithm.key_length_bits(key),
        elapsed,
        average_per_record,
        ciphertexts,
    })
}
