//! Passphrase-based encryption compatible with `openssl enc -md md5`.
//! Key derivation, the salted envelope and the cipher dispatch live in
//! separate submodules so each piece can be checked against OpenSSL output
//! on its own.

pub mod algorithm;
pub mod ciphers;
pub mod envelope;
pub mod kdf;

pub use algorithm::{key_length_bits, Algorithm, UnsupportedAlgorithm};
pub use ciphers::{decrypt_text, encrypt_text, encrypt_text_with_salt, CipherError};
