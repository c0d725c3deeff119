//! The closed set of benchmarked ciphers and the key-length figure reported
//! for each of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported algorithm: {0}")]
pub struct UnsupportedAlgorithm(pub String);

/// Cipher selected by a benchmark trial. Tags are the exact strings used in
/// configuration files and in the report (`AES`, `DES`, `3DES`, `RC4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    Aes,
    Des,
    TripleDes,
    Rc4,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Aes,
        Algorithm::Des,
        Algorithm::TripleDes,
        Algorithm::Rc4,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Algorithm::Aes => "AES",
            Algorithm::Des => "DES",
            Algorithm::TripleDes => "3DES",
            Algorithm::Rc4 => "RC4",
        }
    }

    /// Bytes of key material derived from the passphrase.
    pub fn derived_key_len(self) -> usize {
        match self {
            Algorithm::Aes => 32,
            Algorithm::Des => 8,
            Algorithm::TripleDes => 24,
            Algorithm::Rc4 => 32,
        }
    }

    /// Bytes of IV derived alongside the key. RC4 takes none.
    pub fn derived_iv_len(self) -> usize {
        match self {
            Algorithm::Aes => 16,
            Algorithm::Des | Algorithm::TripleDes => 8,
            Algorithm::Rc4 => 0,
        }
    }

    pub fn key_length_bits(self, key: &str) -> u32 {
        key_length_bits(key, self.tag())
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Algorithm {
    type Err = UnsupportedAlgorithm;

    /// Tags are case-sensitive: `aes` is not a supported algorithm.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "AES" => Ok(Algorithm::Aes),
            "DES" => Ok(Algorithm::Des),
            "3DES" => Ok(Algorithm::TripleDes),
            "RC4" => Ok(Algorithm::Rc4),
            other => Err(UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = UnsupportedAlgorithm;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Algorithm> for String {
    fn from(value: Algorithm) -> Self {
        value.tag().to_string()
    }
}

/// Resolves the key length reported for a trial. DES and 3DES report their
/// nominal strength; AES reports the passphrase length capped at 256 bits;
/// RC4 and unknown tags report the raw passphrase length. The tag is matched
/// case-insensitively.
pub fn key_length_bits(key: &str, tag: &str) -> u32 {
    let raw_bits = u32::try_from(key.len().saturating_mul(8)).unwrap_or(u32::MAX);
    match tag.to_uppercase().as_str() {
        "DES" => 56,
        "3DES" => 168,
        "AES" => raw_bits.min(256),
        _ => raw_bits,
    }
}

#[cfg(test)]
mod tests {
    use super::{key_length_bits, Algorithm, UnsupportedAlgorithm};

    const KEY_16: &str = "1234567890123456";
    const KEY_32: &str = "12345678901234567890123456789012";
    const KEY_40: &str = "1234567890123456789012345678901234567890";

    #[test]
    fn resolves_aes_lengths_with_cap() {
        assert_eq!(key_length_bits(KEY_16, "AES"), 128);
        assert_eq!(key_length_bits(KEY_32, "AES"), 256);
        assert_eq!(key_length_bits(KEY_40, "AES"), 256);
    }

    #[test]
    fn resolves_rc4_lengths_uncapped() {
        assert_eq!(key_length_bits(KEY_16, "RC4"), 128);
        assert_eq!(key_length_bits(KEY_32, "RC4"), 256);
        assert_eq!(key_length_bits(KEY_40, "RC4"), 320);
    }

    #[test]
    fn des_family_lengths_ignore_key_material() {
        for key in ["", "12345678", KEY_40] {
            assert_eq!(key_length_bits(key, "DES"), 56);
            assert_eq!(key_length_bits(key, "3DES"), 168);
        }
    }

    #[test]
    fn unknown_tags_fall_back_to_raw_length() {
        assert_eq!(key_length_bits(KEY_16, "Blowfish"), 128);
        assert_eq!(key_length_bits("", "Blowfish"), 0);
    }

    #[test]
    fn resolver_ignores_tag_case() {
        assert_eq!(key_length_bits(KEY_40, "aes"), 256);
        assert_eq!(key_length_bits(KEY_16, "des"), 56);
    }

    #[test]
    fn counts_bytes_not_characters() {
        assert_eq!(key_length_bits("ключ", "RC4"), 64);
    }

    #[test]
    fn parses_tags_case_sensitively() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.tag().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!(
            "aes".parse::<Algorithm>(),
            Err(UnsupportedAlgorithm("aes".to_string()))
        );
    }

    #[test]
    fn serializes_as_tag() {
        let json = serde_json::to_string(&Algorithm::TripleDes).expect("serialize");
        assert_eq!(json, "\"3DES\"");
        let parsed: Algorithm = serde_json::from_str("\"RC4\"").expect("deserialize");
        assert_eq!(parsed, Algorithm::Rc4);
        assert!(serde_json::from_str::<Algorithm>("\"ROT13\"").is_err());
    }
}
