//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Credential;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of credentials (Site, Username, Category, Updated).
///
/// Only metadata is shown; nothing is decrypted.
pub fn print_credentials_table(credentials: &[&Credential]) {
    if credentials.is_empty() {
        info("No credentials in this vault yet.");
        tip("Run `passvault add <SITE> --username <USER>` to save your first one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Site", "Username", "Category", "Updated"]);

    for c in credentials {
        table.add_row(row(c));
    }

    println!("{table}");
}

fn row(c: &Credential) -> Vec<String> {
    vec![
        c.site_name.clone(),
        c.username.clone(),
        c.display_category().to_string(),
        c.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]
}
