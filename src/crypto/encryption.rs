//! AES-256-GCM authenticated encryption of secret strings.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce.  The
//! ciphertext (with its 16-byte auth tag) and the nonce are returned as
//! separate base64 strings inside an `EncryptedRecord`.

use aes_gcm::aead::{Aead, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::{Zeroize, Zeroizing};

use super::keys::DerivedKey;
use super::record::EncryptedRecord;
use crate::errors::{PassVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Encrypt `plaintext` under `key`.
pub fn encrypt(plaintext: &str, key: &DerivedKey) -> Result<EncryptedRecord> {
    let cipher = key.cipher();

    // Never derived from the key or plaintext.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|e| PassVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    Ok(EncryptedRecord {
        ciphertext: BASE64.encode(&ciphertext),
        nonce: BASE64.encode(nonce),
    })
}

/// Decrypt a record produced by `encrypt`.
///
/// Any failure (bad encoding, wrong nonce length, wrong key, tampered
/// data, non-UTF-8 output) yields `DecryptionFailed` and no plaintext.
pub fn decrypt(record: &EncryptedRecord, key: &DerivedKey) -> Result<Zeroizing<String>> {
    let nonce_bytes = BASE64
        .decode(&record.nonce)
        .map_err(|_| PassVaultError::DecryptionFailed)?;
    if nonce_bytes.len() != NONCE_LEN {
        return Err(PassVaultError::DecryptionFailed);
    }
    let ciphertext = BASE64
        .decode(&record.ciphertext)
        .map_err(|_| PassVaultError::DecryptionFailed)?;

    let nonce = Nonce::from_slice(&nonce_bytes);
    let plaintext = key
        .cipher()
        .decrypt(nonce, ciphertext.as_slice())
        .map_err(|_| PassVaultError::DecryptionFailed)?;

    String::from_utf8(plaintext).map(Zeroizing::new).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        PassVaultError::DecryptionFailed
    })
}
