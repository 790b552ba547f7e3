//! Credential records kept in the record store.
//!
//! A credential carries the non-secret metadata (site, username,
//! category) next to the password's `EncryptedRecord`.  The plaintext
//! password is never a field; it only exists while `reveal` returns it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::session::VaultSession;
use crate::crypto::EncryptedRecord;
use crate::errors::{PassVaultError, Result};

/// Category shown when a credential has none.
const DEFAULT_CATEGORY: &str = "General";

/// One saved login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub id: Uuid,

    /// The site or service name (e.g. "Netflix").
    pub site_name: String,

    pub username: String,

    /// The password, sealed under the session key.
    pub encrypted_password: EncryptedRecord,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// Encrypt `password` with the session key and build a new credential.
    pub async fn seal(
        session: &VaultSession,
        site_name: &str,
        username: &str,
        password: &str,
        category: Option<&str>,
    ) -> Result<Self> {
        validate_site_name(site_name)?;
        let encrypted_password = session.encrypt(password).await?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            site_name: site_name.to_string(),
            username: username.to_string(),
            encrypted_password,
            category: normalize_category(category),
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the stored password, keeping id and `created_at`.
    pub async fn reseal(&mut self, session: &VaultSession, password: &str) -> Result<()> {
        self.encrypted_password = session.encrypt(password).await?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Decrypt the password for display or copy.
    pub async fn reveal(&self, session: &VaultSession) -> Result<Zeroizing<String>> {
        session.decrypt(&self.encrypted_password).await
    }

    /// The category, or "General" when unset.
    pub fn display_category(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }
}

/// Trim a category, treating a blank one as unset.
pub fn normalize_category(category: Option<&str>) -> Option<String> {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Validate that a site name is usable as a lookup key.
///
/// Must be non-empty after trimming and at most 256 characters.
pub fn validate_site_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PassVaultError::CommandFailed(
            "site name cannot be empty".into(),
        ));
    }
    if name.chars().count() > 256 {
        return Err(PassVaultError::CommandFailed(
            "site name cannot exceed 256 characters".into(),
        ));
    }
    Ok(())
}
