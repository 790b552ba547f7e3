use clap::Parser;
use passvault::cli::{Cli, Commands};
use passvault::config::Settings;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // A broken config file is reported by the command itself.
    let log_level = std::env::current_dir()
        .ok()
        .and_then(|cwd| Settings::load(&cwd).ok())
        .map_or_else(|| "warn".to_string(), |s| s.log_level);
    passvault::logging::init(&log_level);

    let result = match cli.command {
        Commands::Init => passvault::cli::commands::init::execute(&cli).await,
        Commands::Add {
            ref site,
            ref username,
            ref category,
            ref password,
        } => {
            passvault::cli::commands::add::execute(
                &cli,
                site,
                username,
                category.as_deref(),
                password.as_deref(),
            )
            .await
        }
        Commands::Get { ref site } => passvault::cli::commands::get::execute(&cli, site).await,
        Commands::List => passvault::cli::commands::list::execute(&cli).await,
        Commands::Delete { ref site, force } => {
            passvault::cli::commands::delete::execute(&cli, site, force).await
        }
        Commands::Verify => passvault::cli::commands::verify::execute(&cli).await,
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
