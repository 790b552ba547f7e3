//! `passvault add` — save or update a credential.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{PassVaultError, Result};
use crate::vault::credential::{normalize_category, validate_site_name};
use crate::vault::{Credential, CredentialStore};

/// Drop the single newline (`\n` or `\r\n`) that ends piped input.
/// Any other trailing whitespace belongs to the password.
fn strip_line_ending(input: &str) -> &str {
    input
        .strip_suffix('\n')
        .map(|s| s.strip_suffix('\r').unwrap_or(s))
        .unwrap_or(input)
}

/// Execute the `add` command.
pub async fn execute(
    cli: &Cli,
    site: &str,
    username: &str,
    category: Option<&str>,
    password: Option<&str>,
) -> Result<()> {
    validate_site_name(site)?;
    let ctx = Context::load(cli)?;

    // Determine the password from one of three sources.
    let secret = if let Some(v) = password {
        // Source 1: Inline value on the command line.
        output::warning("Password provided on command line — it may appear in shell history.");
        Zeroizing::new(v.to_string())
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        Zeroizing::new(strip_line_ending(&buf).to_string())
    } else {
        // Source 3: Interactive secure prompt (default).
        let pw = dialoguer::Password::new()
            .with_prompt(format!("Enter password for {site}"))
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("input prompt: {e}")))?;
        Zeroizing::new(pw)
    };

    let (mut store, session) = ctx.unlock().await?;

    // Update in place when the site already has a credential.
    let existing = store.find_by_site(site).cloned();
    let existed = existing.is_some();
    let credential = match existing {
        Some(mut cred) => {
            cred.reseal(&session, &secret).await?;
            cred.username = username.to_string();
            if category.is_some() {
                cred.category = normalize_category(category);
            }
            cred
        }
        None => Credential::seal(&session, site, username, &secret, category).await?,
    };
    session.lock();

    tracing::info!(id = %credential.id, updated = existed, "stored credential");
    store.put(credential);
    store.save()?;

    let verb = if existed { "updated in" } else { "added to" };
    output::success(&format!(
        "Credential for '{site}' {verb} the vault ({} total)",
        store.len()
    ));

    Ok(())
}
