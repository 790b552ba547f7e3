//! `passvault get` — decrypt and print a credential's password.

use crate::cli::{Cli, Context};
use crate::errors::{PassVaultError, Result};
use crate::vault::CredentialStore;

/// Execute the `get` command.
pub async fn execute(cli: &Cli, site: &str) -> Result<()> {
    let ctx = Context::load(cli)?;
    let (store, session) = ctx.unlock().await?;

    let credential = store
        .find_by_site(site)
        .ok_or_else(|| PassVaultError::CredentialNotFound(site.to_string()))?;

    // Decrypt and print the password to stdout.
    let password = credential.reveal(&session).await?;
    session.lock();
    println!("{}", password.as_str());

    Ok(())
}
