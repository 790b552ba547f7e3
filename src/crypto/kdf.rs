//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The master password and a 16-byte per-user salt are stretched into a
//! 256-bit AES-GCM key.  The salt is normally computed from a stable user
//! identifier (see `salt_from_identifier`) so the same password always
//! unlocks the same vault without a separately stored salt.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use super::keys::{DerivedKey, KEY_LEN};
use crate::errors::{PassVaultError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Default and minimum PBKDF2 round count.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Lowest round count accepted from configuration.
const MIN_ITERATIONS: u32 = 100_000;

/// Configurable PBKDF2 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pbkdf2Params {
    /// Number of HMAC-SHA256 rounds (default: 100 000).
    pub iterations: u32,
}

impl Default for Pbkdf2Params {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Derive a session key from a password and salt with default parameters.
pub fn derive_key(password: &str, salt: &[u8]) -> Result<DerivedKey> {
    derive_key_with_params(password, salt, &Pbkdf2Params::default())
}

/// Derive a session key with explicit PBKDF2 parameters.
///
/// The same password + salt + params always produce the same key.
/// A salt of the wrong length is rejected, never padded or replaced.
pub fn derive_key_with_params(
    password: &str,
    salt: &[u8],
    params: &Pbkdf2Params,
) -> Result<DerivedKey> {
    if password.is_empty() {
        return Err(PassVaultError::KeyDerivationFailed(
            "master password cannot be empty".into(),
        ));
    }
    if salt.len() != SALT_LEN {
        return Err(PassVaultError::KeyDerivationFailed(format!(
            "salt must be exactly {SALT_LEN} bytes (got {})",
            salt.len()
        )));
    }
    if params.iterations < MIN_ITERATIONS {
        return Err(PassVaultError::KeyDerivationFailed(format!(
            "PBKDF2 iterations must be at least {MIN_ITERATIONS} (got {})",
            params.iterations
        )));
    }

    let mut bytes = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, params.iterations, &mut bytes);
    let key = DerivedKey::from_bytes(bytes);
    bytes.zeroize();

    Ok(key)
}

/// Compute the deterministic salt for a user identifier (e.g. an email).
///
/// Takes the first 16 bytes of SHA-256 over the identifier exactly as
/// given.  Changing the identifier changes the salt, and with it the key.
pub fn salt_from_identifier(identifier: &str) -> [u8; SALT_LEN] {
    let digest = Sha256::digest(identifier.as_bytes());
    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&digest[..SALT_LEN]);
    salt
}

/// Generate a random 16-byte salt for callers without a stable identifier.
///
/// The caller is responsible for persisting it.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salt_matches_sha256_prefix() {
        let salt = salt_from_identifier("a@b.com");
        let digest = Sha256::digest(b"a@b.com");
        assert_eq!(&salt[..], &digest[..SALT_LEN]);
    }

    #[test]
    fn salt_is_not_normalized() {
        assert_ne!(
            salt_from_identifier("a@b.com"),
            salt_from_identifier("A@B.com")
        );
    }

    #[test]
    fn generated_salts_differ() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn rejects_empty_password() {
        let err = derive_key("", &[0u8; SALT_LEN]).unwrap_err();
        assert!(matches!(err, PassVaultError::KeyDerivationFailed(_)));
    }

    #[test]
    fn rejects_wrong_salt_length() {
        for len in [0usize, 15, 17, 32] {
            let salt = vec![7u8; len];
            let err = derive_key("hunter2", &salt).unwrap_err();
            assert!(
                matches!(
                    err,
                    PassVaultError::KeyDerivationFailed(ref msg) if msg.contains("16 bytes")
                ),
                "salt of length {len} must be rejected"
            );
        }
    }

    #[test]
    fn rejects_weak_iteration_count() {
        let params = Pbkdf2Params { iterations: 1_000 };
        let result = derive_key_with_params("hunter2", &[0u8; SALT_LEN], &params);
        assert!(result.is_err());
    }

    #[test]
    fn default_params_use_100k_rounds() {
        assert_eq!(Pbkdf2Params::default().iterations, 100_000);
    }
}
