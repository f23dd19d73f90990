//! Chat server API abstraction
//!
//! The client reaches the server only through the [`ChatApi`] trait. The
//! production implementation is [`HttpChatApi`]; tests substitute an
//! in-memory fake.

pub mod http;
pub mod types;

pub use http::HttpChatApi;
pub use types::{truncate_chars, ChatRecord, ChatReply, ChatRequest};

use crate::error::Result;
use async_trait::async_trait;

/// Operations the chat server exposes to the client
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Fetch every stored exchange for the current user (`GET /history`)
    async fn history(&self) -> Result<Vec<ChatRecord>>;

    /// Post a user message and return the bot reply (`POST /chat`)
    async fn send(&self, message: &str) -> Result<String>;

    /// Delete one stored exchange (`DELETE /delete_chat/:id`)
    async fn delete_chat(&self, id: i64) -> Result<()>;

    /// Delete every stored exchange for the user (`DELETE /clear_history`)
    async fn clear_history(&self) -> Result<()>;

    /// Fetch the suggested prompts from the static FAQ resource
    async fn faqs(&self) -> Result<Vec<String>>;
}
