//! Vault module — the unlocked session and credential storage.
//!
//! This module provides:
//! - `VaultSession`, the Locked/Unlocked holder of the derived key (`session`)
//! - `Credential`, a login with its password sealed (`credential`)
//! - The `CredentialStore` seam and its JSON `FileStore` (`store`)

pub mod credential;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use credential::Credential;
pub use session::VaultSession;
pub use store::{check_session, CredentialStore, FileStore};
