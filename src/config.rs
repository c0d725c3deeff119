//! Benchmark configuration. Every field has a built-in default, so a config
//! file only needs to name what it overrides; with no file at all the
//! standard matrix runs against `birth_records.csv`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::Algorithm;

pub const CONFIG_ENV_VAR: &str = "CIPHER_BENCH_CONFIG";
pub const DEFAULT_INPUT_PATH: &str = "birth_records.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "encryption_benchmark_results.csv";

const DEFAULT_BATCH_SIZES: [usize; 9] = [3000, 6000, 9000, 12000, 15000, 18000, 21000, 25000, 30000];
const KEY_128: &str = "1234567890123456";
const KEY_256: &str = "12345678901234567890123456789012";
const KEY_DES: &str = "12345678";
const KEY_3DES: &str = "123456789012345678901234";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file unreadable: {0}")]
    Io(String),
    #[error("config parse failed: {0}")]
    Parse(String),
    #[error("batch sizes must be positive")]
    ZeroBatchSize,
}

/// Candidate keys benchmarked for one algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmKeys {
    pub algorithm: Algorithm,
    pub keys: Vec<String>,
}

impl AlgorithmKeys {
    fn new(algorithm: Algorithm, keys: &[&str]) -> Self {
        Self {
            algorithm,
            keys: keys.iter().map(|key| key.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BenchConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub batch_sizes: Vec<usize>,
    pub algorithms: Vec<AlgorithmKeys>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            batch_sizes: DEFAULT_BATCH_SIZES.to_vec(),
            algorithms: vec![
                AlgorithmKeys::new(Algorithm::Aes, &[KEY_128, KEY_256]),
                AlgorithmKeys::new(Algorithm::Des, &[KEY_DES]),
                AlgorithmKeys::new(Algorithm::TripleDes, &[KEY_3DES]),
                AlgorithmKeys::new(Algorithm::Rc4, &[KEY_128, KEY_256]),
            ],
        }
    }
}

/// A single benchmark run: encrypt the first `batch_size` records with
/// `algorithm` under `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialSpec {
    pub batch_size: usize,
    pub algorithm: Algorithm,
    pub key: String,
}

impl TrialSpec {
    pub fn new(batch_size: usize, algorithm: Algorithm, key: impl Into<String>) -> Self {
        Self {
            batch_size,
            algorithm,
            key: key.into(),
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_sizes.contains(&0) {
            return Err(ConfigError::ZeroBatchSize);
        }
        Ok(())
    }

    /// Expands the matrix: batch size outermost, then algorithm, then key.
    pub fn trials(&self) -> Vec<TrialSpec> {
        self.batch_sizes
            .iter()
            .flat_map(|&batch_size| {
                self.algorithms.iter().flat_map(move |entry| {
                    entry
                        .keys
                        .iter()
                        .map(move |key| TrialSpec::new(batch_size, entry.algorithm, key.as_str()))
                })
            })
            .collect()
    }
}

/// Loads and validates a JSON config file. Algorithm tags are checked while
/// parsing, so an unsupported tag is reported here rather than mid-run.
pub fn load_config(path: impl AsRef<Path>) -> Result<BenchConfig, ConfigError> {
    let raw_json = fs::read_to_string(&path).map_err(|e| ConfigError::Io(format!("{e}")))?;
    let config: BenchConfig =
        serde_json::from_str(&raw_json).map_err(|e| ConfigError::Parse(format!("{e}")))?;
    config.validate()?;
    Ok(config)
}

/// Uses the file named by `CIPHER_BENCH_CONFIG` when set, the defaults
/// otherwise.
pub fn config_from_env() -> Result<BenchConfig, ConfigError> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => {
            log::info!("Loading configuration from {}", Path::new(&path).display());
            load_config(path)
        }
        None => Ok(BenchConfig::default()),
    }
}
