use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Wrong key, wrong nonce, tampered ciphertext or malformed encoding.
    /// The cause is deliberately not distinguished.
    #[error("Decryption failed — wrong master password or corrupted data")]
    DecryptionFailed,

    #[error("Could not unlock vault: {0}")]
    KeyDerivationFailed(String),

    #[error("Invalid master password")]
    InvalidMasterPassword,

    // --- Session errors ---
    #[error("Vault is locked — unlock with the master password first")]
    VaultLocked,

    #[error("Background task failed: {0}")]
    TaskFailed(String),

    // --- Store errors ---
    #[error("Vault store not found at {0}")]
    StoreNotFound(PathBuf),

    #[error("Vault store already exists at {0}")]
    StoreAlreadyExists(PathBuf),

    #[error("Invalid vault store format: {0}")]
    InvalidStoreFormat(String),

    #[error("Credential '{0}' not found")]
    CredentialNotFound(String),

    // --- Config errors ---
    #[error("No user identifier configured — pass --email or set `identifier` in .passvault.toml")]
    MissingIdentifier,

    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
