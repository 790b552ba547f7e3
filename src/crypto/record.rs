//! The persisted form of one encrypted secret.

use serde::{Deserialize, Serialize};

/// A ciphertext and the nonce it was sealed with, both base64 text.
///
/// The two fields only make sense together: storing them apart, or
/// swapping them between records, makes the secret unrecoverable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedRecord {
    /// AES-256-GCM output (ciphertext followed by the 16-byte tag).
    pub ciphertext: String,

    /// The 12-byte nonce used for this record.
    #[serde(alias = "iv")]
    pub nonce: String,
}

impl EncryptedRecord {
    pub fn new(ciphertext: impl Into<String>, nonce: impl Into<String>) -> Self {
        Self {
            ciphertext: ciphertext.into(),
            nonce: nonce.into(),
        }
    }
}
