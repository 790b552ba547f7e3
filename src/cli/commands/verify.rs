//! `passvault verify` — check the master password without revealing anything.

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::Result;

/// Execute the `verify` command.
pub async fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let (store, session) = ctx.unlock().await?;
    session.lock();

    output::success(&format!(
        "Master password accepted ({} credential(s), created {})",
        store.len(),
        store.created_at().format("%Y-%m-%d")
    ));

    Ok(())
}
