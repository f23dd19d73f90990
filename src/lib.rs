//! Serenity - terminal client library for the Serenity chat server
//!
//! This library provides the client side of a supportive chat service:
//! history browsing and search, a conversation pane, message sending, and
//! suggested prompts, all over the server's REST endpoints.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: Wire types, the `ChatApi` trait, and the HTTP client
//! - `history`: The sorted, searchable list of past exchanges
//! - `view`: The conversation pane and its reply placeholders
//! - `composer`: Message input and submission rules
//! - `faq`: Suggested prompts with a built-in fallback
//! - `controller`: Client state and every user action
//! - `render`: Terminal output, with untrusted text escaped
//! - `commands`: CLI command handlers and the interactive loop
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use serenity_chat::api::HttpChatApi;
//! use serenity_chat::{ChatController, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/serenity.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let api = HttpChatApi::new(&config.server)?;
//!     let mut controller = ChatController::new(api, config.ui);
//!     controller.boot().await?;
//!     controller.send_text("I feel anxious today").await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod composer;
pub mod config;
pub mod controller;
pub mod error;
pub mod faq;
pub mod history;
pub mod render;
pub mod view;

// Re-export commonly used types
pub use config::Config;
pub use controller::ChatController;
pub use error::{Result, SerenityError};

#[cfg(test)]
pub mod test_utils;
