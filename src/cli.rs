//! Command-line interface definition for the Serenity client
//!
//! This module defines the CLI structure using clap's derive API,
//! providing the interactive chat client and one-shot history commands.

use clap::{Parser, Subcommand};

/// Serenity - terminal client for the Serenity chat server
///
/// Browse and search past conversations, open an exchange, send new
/// messages, and pick from suggested prompts.
#[derive(Parser, Debug, Clone)]
#[command(name = "serenity")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/serenity.yaml")]
    pub config: Option<String>,

    /// Override the server base URL (e.g. http://127.0.0.1:5000)
    #[arg(short, long)]
    pub server: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the interactive chat client
    Chat,

    /// Send a single message and print the reply
    Send {
        /// Message text to send
        message: String,
    },

    /// Inspect and manage conversation history
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Show suggested prompts
    Faqs,
}

/// History management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// List past conversations, newest first
    List {
        /// Only show chats whose title or message contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one stored exchange
    Show {
        /// Chat id
        id: i64,
    },

    /// Delete one stored exchange
    Delete {
        /// Chat id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete all stored exchanges
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/serenity.yaml".to_string()),
            server: None,
            verbose: false,
            command: Commands::Chat,
        }
    }
}
