//! OpenSSL salted envelope: `"Salted__" || salt || ciphertext`, base64
//! encoded with the padded standard alphabet.

use base64::{engine::general_purpose::STANDARD, Engine};

use super::ciphers::CipherError;
use super::kdf::SALT_LEN;

const MAGIC: &[u8; 8] = b"Salted__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaltedEnvelope {
    pub salt: [u8; SALT_LEN],
    pub ciphertext: Vec<u8>,
}

impl SaltedEnvelope {
    pub fn encode(&self) -> String {
        let mut raw = Vec::with_capacity(MAGIC.len() + SALT_LEN + self.ciphertext.len());
        raw.extend_from_slice(MAGIC);
        raw.extend_from_slice(&self.salt);
        raw.extend_from_slice(&self.ciphertext);
        STANDARD.encode(raw)
    }

    pub fn decode(encoded: &str) -> Result<Self, CipherError> {
        let raw = STANDARD
            .decode(encoded.trim().as_bytes())
            .map_err(|e| CipherError::Base64DecodeFailed(format!("{e}")))?;
        if raw.len() < MAGIC.len() + SALT_LEN || &raw[..MAGIC.len()] != MAGIC {
            return Err(CipherError::MalformedEnvelope(
                "missing Salted__ header".to_string(),
            ));
        }
        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&raw[MAGIC.len()..MAGIC.len() + SALT_LEN]);
        Ok(Self {
            salt,
            ciphertext: raw[MAGIC.len() + SALT_LEN..].to_vec(),
        })
    }
}
