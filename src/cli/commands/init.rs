//! `passvault init` — create a new vault store for this account.

use std::fs;

use crate::cli::output;
use crate::cli::{prompt_new_password, Cli, Context};
use crate::errors::{PassVaultError, Result};
use crate::vault::FileStore;

/// Execute the `init` command.
pub async fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;

    // 1. Refuse to overwrite an existing store.
    if ctx.store_path.exists() {
        output::tip("Use `passvault add` to save credentials to the existing vault.");
        return Err(PassVaultError::StoreAlreadyExists(ctx.store_path));
    }

    // 2. Prompt for a new master password (with confirmation).
    let password = prompt_new_password()?;

    // 3. Create the store directory if it doesn't exist.
    if let Some(dir) = ctx.store_path.parent() {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            output::info(&format!("Created vault directory: {}", dir.display()));
        }
    }

    // 4. Unlock a session and seal the store's verifier with it.
    let session = ctx.session();
    session.unlock(&password, &ctx.identifier).await?;
    let store = FileStore::create(&ctx.store_path, &session).await?;
    session.lock();

    output::success(&format!(
        "Vault created for {} at {}",
        ctx.identifier,
        store.path().display()
    ));
    output::warning(
        "The vault key is bound to this email. Changing it later makes existing credentials unreadable.",
    );
    output::tip("Run `passvault add <SITE> --username <USER>` to save a credential.");

    Ok(())
}
