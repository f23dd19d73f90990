//! Special commands parser for the interactive client
//!
//! Lines starting with `/` drive the client instead of being sent to the
//! server:
//! - Browse, search, open and delete past conversations
//! - Start a new conversation or clear the current one
//! - List and send suggested prompts
//! - Show status and help, or exit
//!
//! Command names are case-insensitive; arguments keep their case.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during an interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Print the (filtered) history list
    ShowHistory,

    /// Set the history search term; an empty term clears it
    Search(String),

    /// Open a stored exchange by id
    Open(i64),

    /// Delete a stored exchange by id (asks first)
    Delete(i64),

    /// Delete every stored exchange (asks first)
    ClearHistory,

    /// Start a new conversation with a greeting
    NewChat,

    /// Empty the conversation pane
    ClearView,

    /// Print the suggested prompts
    ShowFaqs,

    /// Send suggested prompt `n` (1-based)
    Faq(usize),

    /// Refetch history from the server
    Reload,

    /// Show client state
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command; the input is a message
    None,
}

fn parse_id(command: &str, arg: &str, usage: &str) -> Result<i64, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument {
            command: command.to_string(),
            usage: usage.to_string(),
        });
    }
    arg.parse().map_err(|_| CommandError::UnsupportedArgument {
        command: command.to_string(),
        arg: arg.to_string(),
    })
}

fn no_args(
    command: SpecialCommand,
    name: &str,
    arg: &str,
) -> Result<SpecialCommand, CommandError> {
    if arg.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::UnsupportedArgument {
            command: name.to_string(),
            arg: arg.to_string(),
        })
    }
}

/// Parse a user input line into a special command
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` for an unrecognized `/command`,
/// `CommandError::MissingArgument` when a required id or number is absent,
/// and `CommandError::UnsupportedArgument` when an argument is malformed.
///
/// # Examples
///
/// ```
/// use serenity_chat::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/open 4").unwrap(), SpecialCommand::Open(4));
/// assert_eq!(
///     parse_special_command("/search Sleep").unwrap(),
///     SpecialCommand::Search("Sleep".to_string())
/// );
/// assert_eq!(parse_special_command("hello").unwrap(), SpecialCommand::None);
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') {
        return Ok(match lower.as_str() {
            "exit" | "quit" => SpecialCommand::Exit,
            _ => SpecialCommand::None,
        });
    }

    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    match name.as_str() {
        "/history" | "/h" => no_args(SpecialCommand::ShowHistory, "/history", arg),
        "/search" | "/s" => Ok(SpecialCommand::Search(arg.to_string())),
        "/open" | "/o" => parse_id("/open", arg, "/open <id>").map(SpecialCommand::Open),
        "/delete" | "/del" => {
            parse_id("/delete", arg, "/delete <id>").map(SpecialCommand::Delete)
        }
        "/clear-history" => no_args(SpecialCommand::ClearHistory, "/clear-history", arg),
        "/new" => no_args(SpecialCommand::NewChat, "/new", arg),
        "/clear" => no_args(SpecialCommand::ClearView, "/clear", arg),
        "/faqs" => no_args(SpecialCommand::ShowFaqs, "/faqs", arg),
        "/faq" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "/faq".to_string(),
                    usage: "/faq <number>".to_string(),
                });
            }
            arg.parse()
                .map(SpecialCommand::Faq)
                .map_err(|_| CommandError::UnsupportedArgument {
                    command: "/faq".to_string(),
                    arg: arg.to_string(),
                })
        }
        "/reload" => no_args(SpecialCommand::Reload, "/reload", arg),
        "/status" => no_args(SpecialCommand::ShowStatus, "/status", arg),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" => Ok(SpecialCommand::Exit),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

/// Display help text for special commands
pub fn print_help() {
    println!(
        r#"
Special Commands
================

HISTORY:
  /history, /h        - Show past conversations (filtered by the search term)
  /search <text>      - Filter history by title or message (case-insensitive)
  /search             - Clear the search filter
  /open <id>          - Show a stored conversation
  /delete <id>        - Delete a stored conversation (asks first)
  /clear-history      - Delete all your conversations (asks first)
  /reload             - Fetch history from the server again

CONVERSATION:
  /new                - Start a new conversation
  /clear              - Clear the conversation view

SUGGESTED PROMPTS:
  /faqs               - List suggested prompts
  /faq <number>       - Send a suggested prompt

SESSION:
  /status             - Show client status
  /help, /?           - Show this help message
  exit, quit          - Leave

NOTES:
  - Any line not starting with / is sent as a message
  - End a line with \ to continue the message on the next line
"#
    );
}
