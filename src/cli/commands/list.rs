//! `passvault list` — display saved credentials in a table.

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::Result;
use crate::vault::CredentialStore;

/// Execute the `list` command.
pub async fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let (store, session) = ctx.unlock().await?;
    session.lock();

    let credentials = store.list();
    output::info(&format!(
        "{} — {} credential(s)",
        ctx.identifier,
        credentials.len()
    ));
    output::print_credentials_table(&credentials);

    Ok(())
}
