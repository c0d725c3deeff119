//! Benchmark harness that measures how long it takes to encrypt tabular
//! records under AES, DES, 3DES and RC4. The ciphers come from RustCrypto
//! crates; this crate only loads records, times the encryption passes and
//! writes the results as a CSV report.

pub mod config;
pub mod crypto;
pub mod driver;
pub mod orchestrator;
pub mod records;
pub mod report;
pub mod runner;
