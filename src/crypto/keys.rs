//! The session encryption key.
//!
//! A `DerivedKey` is produced only by the KDF and consumed only by the
//! cipher layer.  It has no public byte accessor, cannot be cloned or
//! serialized, and its memory is zeroed when the last owner drops it.

use std::fmt;

use aes_gcm::aead::KeyInit;
use aes_gcm::{Aes256Gcm, Key};
use zeroize::Zeroize;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub(crate) const KEY_LEN: usize = 32;

/// An opaque AES-256-GCM key derived from the master password.
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap freshly derived key bytes.  Callers must zeroize their copy.
    pub(crate) fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Build the AEAD instance for a single encrypt or decrypt call.
    /// Its expanded key state is wiped when it drops.
    pub(crate) fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.bytes))
    }

    fn wipe(&mut self) {
        self.bytes.zeroize();
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}
