//! Cipher dispatch. Block ciphers run in CBC mode with PKCS#7 padding, RC4
//! runs as a plain stream cipher; key and IV always come from the passphrase
//! through [`evp_bytes_to_key`].

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit};
use des::{Des, TdesEde3};
use rand::rngs::OsRng;
use rand::RngCore;
use rc4::consts::U32;
use rc4::{Rc4, StreamCipher};
use thiserror::Error;

use super::algorithm::Algorithm;
use super::envelope::SaltedEnvelope;
use super::kdf::{evp_bytes_to_key, DerivedKey, SALT_LEN};

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),
    #[error("base64 decoding failed: {0}")]
    Base64DecodeFailed(String),
}

/// Encrypts `plaintext` under a fresh random salt and returns the base64
/// envelope.
pub fn encrypt_text(
    algorithm: Algorithm,
    passphrase: &str,
    plaintext: &[u8],
) -> Result<String, CipherError> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    encrypt_text_with_salt(algorithm, passphrase, plaintext, salt)
}

/// Deterministic variant of [`encrypt_text`] for a caller-chosen salt.
pub fn encrypt_text_with_salt(
    algorithm: Algorithm,
    passphrase: &str,
    plaintext: &[u8],
    salt: [u8; SALT_LEN],
) -> Result<String, CipherError> {
    let derived = derive(algorithm, passphrase, &salt);
    let ciphertext = match algorithm {
        Algorithm::Aes => cbc_encrypt::<Aes256>(&derived, plaintext)?,
        Algorithm::Des => cbc_encrypt::<Des>(&derived, plaintext)?,
        Algorithm::TripleDes => cbc_encrypt::<TdesEde3>(&derived, plaintext)?,
        Algorithm::Rc4 => rc4_apply(&derived, plaintext)?,
    };
    Ok(SaltedEnvelope { salt, ciphertext }.encode())
}

/// Reverses [`encrypt_text`]. Fails on a malformed envelope or, for the block
/// ciphers, on bad padding (usually a wrong passphrase).
pub fn decrypt_text(
    algorithm: Algorithm,
    passphrase: &str,
    encoded: &str,
) -> Result<Vec<u8>, CipherError> {
    let envelope = SaltedEnvelope::decode(encoded)?;
    let derived = derive(algorithm, passphrase, &envelope.salt);
    match algorithm {
        Algorithm::Aes => cbc_decrypt::<Aes256>(&derived, &envelope.ciphertext),
        Algorithm::Des => cbc_decrypt::<Des>(&derived, &envelope.ciphertext),
        Algorithm::TripleDes => cbc_decrypt::<TdesEde3>(&derived, &envelope.ciphertext),
        Algorithm::Rc4 => rc4_apply(&derived, &envelope.ciphertext),
    }
}

fn derive(algorithm: Algorithm, passphrase: &str, salt: &[u8; SALT_LEN]) -> DerivedKey {
    evp_bytes_to_key(
        passphrase.as_bytes(),
        salt,
        algorithm.derived_key_len(),
        algorithm.derived_iv_len(),
    )
}

fn cbc_encrypt<C>(derived: &DerivedKey, plaintext: &[u8]) -> Result<Vec<u8>, CipherError>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    let encryptor = cbc::Encryptor::<C>::new_from_slices(derived.key(), derived.iv())
        .map_err(|e| CipherError::InvalidKeyMaterial(format!("{e}")))?;
    Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn cbc_decrypt<C>(derived: &DerivedKey, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError>
where
    C: BlockDecryptMut + BlockCipher + KeyInit,
{
    let decryptor = cbc::Decryptor::<C>::new_from_slices(derived.key(), derived.iv())
        .map_err(|e| CipherError::InvalidKeyMaterial(format!("{e}")))?;
    decryptor
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|e| CipherError::DecryptionFailed(format!("{e}")))
}

fn rc4_apply(derived: &DerivedKey, input: &[u8]) -> Result<Vec<u8>, CipherError> {
    let mut cipher = Rc4::<U32>::new_from_slice(derived.key())
        .map_err(|e| CipherError::InvalidKeyMaterial(format!("{e}")))?;
    let mut buffer = input.to_vec();
    cipher.apply_keystream(&mut buffer);
    Ok(buffer)
}
