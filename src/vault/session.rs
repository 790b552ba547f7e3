//! The Locked/Unlocked session that owns the derived key.
//!
//! A `VaultSession` starts Locked.  `unlock` derives a key from the master
//! password and the user's identifier and holds it until `lock` is called
//! or the session is dropped.  Nothing here is persisted.
//!
//! The key is held behind an `Arc` so an encrypt/decrypt already in flight
//! keeps the key it captured even if `lock` runs concurrently.  The key
//! memory is zeroed once the last handle goes away.

use std::sync::{Arc, PoisonError, RwLock};

use zeroize::Zeroizing;

use crate::crypto::kdf::{derive_key_with_params, salt_from_identifier, Pbkdf2Params};
use crate::crypto::{decrypt, encrypt, DerivedKey, EncryptedRecord};
use crate::errors::{PassVaultError, Result};

enum SessionState {
    Locked,
    Unlocked(Arc<DerivedKey>),
}

/// Holds at most one derived key for the lifetime of an unlocked session.
pub struct VaultSession {
    params: Pbkdf2Params,
    state: RwLock<SessionState>,
}

impl Default for VaultSession {
    fn default() -> Self {
        Self::new(Pbkdf2Params::default())
    }
}

impl VaultSession {
    /// Create a Locked session that will derive keys with `params`.
    pub fn new(params: Pbkdf2Params) -> Self {
        Self {
            params,
            state: RwLock::new(SessionState::Locked),
        }
    }

    /// Derive the key for `identifier` and move to Unlocked.
    ///
    /// Re-unlocking replaces the held key; every call derives from
    /// scratch.  On failure the previous state is left as it was.
    pub async fn unlock(&self, password: &str, identifier: &str) -> Result<()> {
        let salt = salt_from_identifier(identifier);
        self.unlock_with_salt(password, &salt).await
    }

    /// Like `unlock`, for callers that manage their own (e.g. random) salt.
    pub async fn unlock_with_salt(&self, password: &str, salt: &[u8]) -> Result<()> {
        let password = Zeroizing::new(password.to_owned());
        let salt = salt.to_vec();
        let params = self.params;

        // PBKDF2 is deliberately slow; keep it off the event loop.
        let key = tokio::task::spawn_blocking(move || {
            derive_key_with_params(&password, &salt, &params)
        })
        .await
        .map_err(|e| PassVaultError::TaskFailed(format!("key derivation task: {e}")))??;

        *self.state.write().unwrap_or_else(PoisonError::into_inner) =
            SessionState::Unlocked(Arc::new(key));
        tracing::info!(iterations = params.iterations, "vault session unlocked");
        Ok(())
    }

    /// Discard the held key.  A no-op when already Locked.
    pub fn lock(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if matches!(*state, SessionState::Unlocked(_)) {
            tracing::info!("vault session locked");
        }
        *state = SessionState::Locked;
    }

    /// `true` iff no key is currently held.
    pub fn is_locked(&self) -> bool {
        matches!(
            *self.state.read().unwrap_or_else(PoisonError::into_inner),
            SessionState::Locked
        )
    }

    /// A handle to the current key, or `VaultLocked`.
    pub fn key(&self) -> Result<Arc<DerivedKey>> {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            SessionState::Unlocked(key) => Ok(Arc::clone(key)),
            SessionState::Locked => Err(PassVaultError::VaultLocked),
        }
    }

    /// Encrypt `plaintext` under the session key.
    pub async fn encrypt(&self, plaintext: &str) -> Result<EncryptedRecord> {
        let key = self.key()?;
        encrypt(plaintext, &key)
    }

    /// Decrypt `record` under the session key.
    pub async fn decrypt(&self, record: &EncryptedRecord) -> Result<Zeroizing<String>> {
        let key = self.key()?;
        decrypt(record, &key)
    }

    /// Decrypt a record known to have been sealed under the right key.
    ///
    /// Authentication failure here means the master password was wrong,
    /// so it is reported as `InvalidMasterPassword`.
    pub async fn verify(&self, record: &EncryptedRecord) -> Result<Zeroizing<String>> {
        self.decrypt(record).await.map_err(|e| match e {
            PassVaultError::DecryptionFailed => PassVaultError::InvalidMasterPassword,
            other => other,
        })
    }
}
