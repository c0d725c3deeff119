//! OpenSSL `EVP_BytesToKey` key derivation (MD5, single iteration), the
//! scheme `openssl enc -md md5` and CryptoJS apply to passphrase keys.

use md5::{Digest, Md5};
use zeroize::Zeroize;

pub const SALT_LEN: usize = 8;

/// Key and IV bytes derived from a passphrase. Both buffers are wiped on drop.
pub struct DerivedKey {
    key: Vec<u8>,
    iv: Vec<u8>,
}

impl DerivedKey {
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn iv(&self) -> &[u8] {
        &self.iv
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.key.zeroize();
        self.iv.zeroize();
    }
}

/// Derives `key_len + iv_len` bytes as `D_i = MD5(D_{i-1} || passphrase || salt)`
/// and splits the concatenation into key and IV.
pub fn evp_bytes_to_key(
    passphrase: &[u8],
    salt: &[u8; SALT_LEN],
    key_len: usize,
    iv_len: usize,
) -> DerivedKey {
    let total = key_len + iv_len;
    let mut material = Vec::with_capacity(total + 16);
    let mut previous: Option<[u8; 16]> = None;

    while material.len() < total {
        let mut hasher = Md5::new();
        if let Some(block) = &previous {
            hasher.update(block);
        }
        hasher.update(passphrase);
        hasher.update(salt);
        let block: [u8; 16] = hasher.finalize().into();
        material.extend_from_slice(&block);
        previous = Some(block);
    }

    let mut iv = material.split_off(key_len);
    let mut surplus = iv.split_off(iv_len);
    surplus.zeroize();
    DerivedKey { key: material, iv }
}
