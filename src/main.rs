//! Serenity - terminal chat client
//!
#![doc = "Serenity - terminal chat client"]
#![doc = "Main entry point for the Serenity client application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use serenity_chat::cli::{Cli, Commands};
use serenity_chat::commands;
use serenity_chat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/serenity.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat => {
            tracing::info!("Starting interactive chat client");
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Send { message } => {
            tracing::debug!("Sending one-shot message");
            commands::chat::run_send(config, message).await?;
            Ok(())
        }
        Commands::History { command } => {
            tracing::debug!("Starting history command");
            commands::history::handle_history(config, command).await?;
            Ok(())
        }
        Commands::Faqs => {
            commands::faqs::show_faqs(&config).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "serenity_chat=debug"
    } else {
        "serenity_chat=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
