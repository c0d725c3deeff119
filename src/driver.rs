//! Encrypts a single record: canonical JSON in, salted base64 envelope out.

use thiserror::Error;

use crate::crypto::{encrypt_text, Algorithm, CipherError, UnsupportedAlgorithm};
use crate::records::Record;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Unsupported(#[from] UnsupportedAlgorithm),
    #[error("record serialization failed: {0}")]
    Serialize(String),
    #[error("cipher error: {0}")]
    Cipher(#[from] CipherError),
}

/// Encrypts `record` with the cipher named by `tag`. Unknown tags are
/// rejected before anything is serialized.
pub fn encrypt_record(record: &Record, key: &str, tag: &str) -> Result<String, DriverError> {
    let algorithm: Algorithm = tag.parse()?;
    encrypt_record_with(record, key, algorithm)
}

pub fn encrypt_record_with(
    record: &Record,
    key: &str,
    algorithm: Algorithm,
) -> Result<String, DriverError> {
    let plaintext = record
        .to_canonical_json()
        .map_err(|e| DriverError::Serialize(format!("{e}")))?;
    Ok(encrypt_text(algorithm, key, plaintext.as_bytes())?)
}
