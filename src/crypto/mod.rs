//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 master key derivation (`kdf`)
//! - The opaque, zeroize-on-drop session key (`keys`)
//! - AES-256-GCM encryption and decryption of secrets (`encryption`)
//! - The paired ciphertext/nonce record type (`record`)

pub mod encryption;
pub mod kdf;
pub mod keys;
pub mod record;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use encryption::{decrypt, encrypt};
pub use kdf::{
    derive_key, derive_key_with_params, generate_salt, salt_from_identifier, Pbkdf2Params,
};
pub use keys::DerivedKey;
pub use record::EncryptedRecord;
