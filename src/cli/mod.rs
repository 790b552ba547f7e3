//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::vault::{check_session, FileStore, VaultSession};

/// Minimum master password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable for non-interactive master password input.
const PASSWORD_ENV: &str = "PASSVAULT_PASSWORD";

/// PassVault CLI: zero-knowledge password manager.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Zero-knowledge password manager",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Account email (used to derive the vault salt)
    #[arg(long, env = "PASSVAULT_EMAIL", global = true)]
    pub email: Option<String>,

    /// Store directory (default: .passvault, or `store_dir` from .passvault.toml)
    #[arg(long, global = true)]
    pub store_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Initialize a new vault for this account
    Init,

    /// Save a credential (add or update)
    Add {
        /// Site or service name (e.g. Netflix)
        site: String,
        /// Username or login email for the site
        #[arg(short, long)]
        username: String,
        /// Optional category (e.g. Finance)
        #[arg(short, long)]
        category: Option<String>,
        /// Password value (omit for interactive prompt)
        password: Option<String>,
    },

    /// Print a credential's password
    Get {
        /// Site name
        site: String,
    },

    /// List saved credentials (no passwords shown)
    List,

    /// Delete a credential
    Delete {
        /// Site name
        site: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Check the master password against the vault
    Verify,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the master password, trying in order:
/// 1. `PASSVAULT_PASSWORD` env var (scripting/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used during `init`).
///
/// Also respects `PASSVAULT_PASSWORD` for scripted usage.
/// Enforces a minimum password length.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            if pw.chars().count() < MIN_PASSWORD_LEN {
                return Err(PassVaultError::CommandFailed(format!(
                    "master password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation(
                "Confirm master password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.chars().count() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Master password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Everything a command needs: settings, the resolved identifier, and
/// the store location.
pub struct Context {
    pub settings: Settings,
    pub identifier: String,
    pub store_path: PathBuf,
}

impl Context {
    /// Load settings from the working directory and resolve the identifier.
    ///
    /// `--email` / `PASSVAULT_EMAIL` take precedence over the config file.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let settings = Settings::load(&cwd)?;

        let identifier = cli
            .email
            .clone()
            .or_else(|| settings.identifier.clone())
            .ok_or(PassVaultError::MissingIdentifier)?;
        validate_identifier(&identifier)?;

        let store_path = settings.store_path(&cwd, cli.store_dir.as_deref());
        Ok(Self {
            settings,
            identifier,
            store_path,
        })
    }

    /// A fresh, Locked session using the configured PBKDF2 parameters.
    pub fn session(&self) -> VaultSession {
        VaultSession::new(self.settings.pbkdf2_params())
    }

    /// Open the store, unlock a session from the prompted master password,
    /// and check it against the store's verifier.
    pub async fn unlock(&self) -> Result<(FileStore, VaultSession)> {
        let store = FileStore::open(&self.store_path)?;
        let password = prompt_password()?;

        let session = self.session();
        session.unlock(&password, &self.identifier).await?;
        if let Err(e) = check_session(&store, &session).await {
            session.lock();
            return Err(e);
        }

        Ok((store, session))
    }
}

/// Validate a user identifier before it is hashed into a salt.
///
/// The identifier is used byte-for-byte, so stray whitespace would
/// silently produce a different key.  Max length 254 characters.
pub fn validate_identifier(identifier: &str) -> Result<()> {
    if identifier.is_empty() {
        return Err(PassVaultError::ConfigError(
            "identifier cannot be empty".into(),
        ));
    }

    if identifier.chars().count() > 254 {
        return Err(PassVaultError::ConfigError(
            "identifier cannot exceed 254 characters".into(),
        ));
    }

    if identifier.trim() != identifier {
        return Err(PassVaultError::ConfigError(format!(
            "identifier '{identifier}' is invalid — leading or trailing whitespace would change the vault key"
        )));
    }

    Ok(())
}
