//! Wire types exchanged with the chat server

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Timestamp layouts the server is known to emit, tried in order
const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// One stored exchange: a user message and the bot's reply
///
/// Records are owned by the server; the client only reads them.
///
/// # Examples
///
/// ```
/// use serenity_chat::api::ChatRecord;
///
/// let record: ChatRecord = serde_json::from_str(
///     r#"{"id": 1, "title": null, "message": "Hi", "response": "Hello!", "timestamp": "2024-05-01 10:00:00"}"#,
/// ).unwrap();
/// assert_eq!(record.display_title(30), "Hi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    /// Server-assigned id, unique within one user's history
    pub id: i64,
    /// Optional short title
    #[serde(default)]
    pub title: Option<String>,
    /// The user's message
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    /// The bot's reply
    #[serde(default, deserialize_with = "null_as_empty")]
    pub response: String,
    /// Creation time as sent by the server
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timestamp: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChatRecord {
    /// Title if present and non-blank
    fn title_text(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Title for the conversation view
    ///
    /// Falls back to the first `max_chars` characters of the message when
    /// the record has no usable title.
    pub fn display_title(&self, max_chars: usize) -> String {
        match self.title_text() {
            Some(title) => title.trim().to_string(),
            None => truncate_chars(&self.message, max_chars),
        }
    }

    /// Label for a history row: title or, failing that, the full message
    pub fn label(&self) -> &str {
        self.title_text().unwrap_or(&self.message).trim()
    }

    /// Case-insensitive substring match on title or message
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.title
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            .contains(needle)
            || self.message.to_lowercase().contains(needle)
    }

    /// Parse the server timestamp, if it is in a known layout
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        let raw = self.timestamp.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }
        TIMESTAMP_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    }
}

/// First `max_chars` characters of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Body of `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// Text typed by the user
    pub message: String,
}

/// Response of `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    /// Bot reply text
    pub reply: String,
}
