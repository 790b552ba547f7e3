//! The record store: where sealed credentials live between sessions.
//!
//! `CredentialStore` is the seam the application talks to; the crypto
//! core never touches it.  `FileStore` keeps everything in one JSON
//! document on disk:
//!
//! ```text
//! { "version": 1, "created_at": ..., "verifier": {ciphertext, nonce}, "credentials": [...] }
//! ```
//!
//! The `verifier` is a fixed marker sealed at creation time.  Decrypting
//! it right after unlock tells a wrong master password apart before any
//! credential is touched.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::credential::Credential;
use super::session::VaultSession;
use crate::crypto::EncryptedRecord;
use crate::errors::{PassVaultError, Result};

/// Current store document version.
pub const CURRENT_VERSION: u8 = 1;

/// Plaintext sealed into every store's verifier record.
const VERIFIER_MARKER: &str = "passvault-verifier-v1";

/// Read/write access to persisted credentials.
pub trait CredentialStore {
    /// The record used to check the master password after unlock.
    fn verifier(&self) -> &EncryptedRecord;

    /// All credentials, sorted by site name.
    fn list(&self) -> Vec<&Credential>;

    fn get(&self, id: &Uuid) -> Option<&Credential>;

    /// Look up a credential by site name, ignoring ASCII case.
    fn find_by_site(&self, site_name: &str) -> Option<&Credential>;

    /// Insert or replace a credential (keyed by id).
    fn put(&mut self, credential: Credential);

    fn remove(&mut self, id: &Uuid) -> Result<Credential>;

    /// Persist pending changes.
    fn save(&mut self) -> Result<()>;
}

/// Check that `session` was unlocked with the master password `store`
/// was created under.
///
/// Reports `InvalidMasterPassword` on mismatch and `VaultLocked` when the
/// session holds no key.
pub async fn check_session<S>(store: &S, session: &VaultSession) -> Result<()>
where
    S: CredentialStore + ?Sized,
{
    let marker = session.verify(store.verifier()).await?;
    if marker.as_str() != VERIFIER_MARKER {
        return Err(PassVaultError::InvalidMasterPassword);
    }
    Ok(())
}

/// On-disk layout of a store file.
#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    version: u8,
    created_at: DateTime<Utc>,
    verifier: EncryptedRecord,
    credentials: Vec<Credential>,
}

/// A `CredentialStore` backed by a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    created_at: DateTime<Utc>,
    verifier: EncryptedRecord,
    credentials: HashMap<Uuid, Credential>,
}

impl FileStore {
    /// Create a new, empty store file at `path`.
    ///
    /// The session must be unlocked: its key seals the verifier.
    pub async fn create(path: &Path, session: &VaultSession) -> Result<Self> {
        if path.exists() {
            return Err(PassVaultError::StoreAlreadyExists(path.to_path_buf()));
        }

        let verifier = session.encrypt(VERIFIER_MARKER).await?;
        let mut store = Self {
            path: path.to_path_buf(),
            created_at: Utc::now(),
            verifier,
            credentials: HashMap::new(),
        };
        store.save()?;

        tracing::info!(path = %path.display(), "created vault store");
        Ok(store)
    }

    /// Load an existing store file.  No decryption happens here.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PassVaultError::StoreNotFound(path.to_path_buf()));
        }

        let data = fs::read(path)?;
        let doc: StoreDocument = serde_json::from_slice(&data)
            .map_err(|e| PassVaultError::InvalidStoreFormat(format!("store JSON: {e}")))?;

        if doc.version != CURRENT_VERSION {
            return Err(PassVaultError::InvalidStoreFormat(format!(
                "unsupported version {}, expected {CURRENT_VERSION}",
                doc.version
            )));
        }

        let credentials: HashMap<Uuid, Credential> =
            doc.credentials.into_iter().map(|c| (c.id, c)).collect();

        tracing::debug!(
            path = %path.display(),
            credentials = credentials.len(),
            "opened vault store"
        );

        Ok(Self {
            path: path.to_path_buf(),
            created_at: doc.created_at,
            verifier: doc.verifier,
            credentials,
        })
    }

    /// Returns the path to the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the store creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the number of stored credentials.
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

impl CredentialStore for FileStore {
    fn verifier(&self) -> &EncryptedRecord {
        &self.verifier
    }

    fn list(&self) -> Vec<&Credential> {
        let mut list: Vec<&Credential> = self.credentials.values().collect();
        list.sort_by(|a, b| {
            a.site_name
                .to_lowercase()
                .cmp(&b.site_name.to_lowercase())
                .then_with(|| a.username.cmp(&b.username))
        });
        list
    }

    fn get(&self, id: &Uuid) -> Option<&Credential> {
        self.credentials.get(id)
    }

    fn find_by_site(&self, site_name: &str) -> Option<&Credential> {
        self.list()
            .into_iter()
            .find(|c| c.site_name.eq_ignore_ascii_case(site_name))
    }

    fn put(&mut self, credential: Credential) {
        self.credentials.insert(credential.id, credential);
    }

    fn remove(&mut self, id: &Uuid) -> Result<Credential> {
        self.credentials
            .remove(id)
            .ok_or_else(|| PassVaultError::CredentialNotFound(id.to_string()))
    }

    /// Write the store to disk atomically (temp file + rename).
    fn save(&mut self) -> Result<()> {
        let mut credentials: Vec<Credential> = self.credentials.values().cloned().collect();
        credentials.sort_by(|a, b| a.id.cmp(&b.id));

        let doc = StoreDocument {
            version: CURRENT_VERSION,
            created_at: self.created_at,
            verifier: self.verifier.clone(),
            credentials,
        };
        let bytes = serde_json::to_vec_pretty(&doc)
            .map_err(|e| PassVaultError::SerializationError(format!("store: {e}")))?;

        let parent = self.path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, &bytes)?;
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(credentials = doc.credentials.len(), "saved vault store");
        Ok(())
    }
}
