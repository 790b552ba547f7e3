//! `passvault delete` — remove a credential from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{PassVaultError, Result};
use crate::vault::CredentialStore;

/// Execute the `delete` command.
pub async fn execute(cli: &Cli, site: &str, force: bool) -> Result<()> {
    let ctx = Context::load(cli)?;
    let (mut store, session) = ctx.unlock().await?;
    session.lock();

    let id = store
        .find_by_site(site)
        .map(|c| c.id)
        .ok_or_else(|| PassVaultError::CredentialNotFound(site.to_string()))?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete credential for '{site}'?"))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    store.remove(&id)?;
    store.save()?;

    tracing::info!(%id, "deleted credential");
    output::success(&format!("Deleted credential for '{site}'"));

    Ok(())
}
