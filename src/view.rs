//! Conversation pane state
//!
//! Holds the title, the list of rendered message entries, and which stored
//! exchange (if any) is open. Each time the pane is replaced wholesale the
//! view epoch advances, so late replies can tell the pane they were meant
//! for is gone.

use crate::api::ChatRecord;
use std::fmt;

/// Text shown in a placeholder entry while a reply is in flight
pub const THINKING: &str = "…thinking";

/// Who authored an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "you"),
            Self::Bot => write!(f, "serenity"),
        }
    }
}

/// Handle to a placeholder entry awaiting its reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaceholderId(u64);

/// One line in the conversation pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub role: Role,
    pub content: String,
    /// Set while the entry is a "thinking" placeholder
    pub placeholder: Option<PlaceholderId>,
}

impl Entry {
    pub fn is_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }
}

/// The conversation pane
#[derive(Debug, Clone)]
pub struct ConversationView {
    title: String,
    entries: Vec<Entry>,
    current: Option<i64>,
    epoch: u64,
    next_placeholder: u64,
}

impl ConversationView {
    /// Create an empty pane showing `placeholder_title`
    pub fn new(placeholder_title: impl Into<String>) -> Self {
        Self {
            title: placeholder_title.into(),
            entries: Vec::new(),
            current: None,
            epoch: 0,
            next_placeholder: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Id of the stored exchange being shown, if any
    pub fn current(&self) -> Option<i64> {
        self.current
    }

    /// Counter bumped every time the pane is replaced
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Number of placeholders still waiting on a reply
    pub fn pending(&self) -> usize {
        self.entries.iter().filter(|e| e.is_placeholder()).count()
    }

    /// Replace the pane with a stored exchange
    pub fn show_record(&mut self, record: &ChatRecord, title_chars: usize) {
        self.clear_entries();
        self.current = Some(record.id);
        self.title = record.display_title(title_chars);
        self.push(Role::User, record.message.clone());
        self.push(Role::Bot, record.response.clone());
    }

    /// Return to the placeholder state, optionally seeding a bot greeting
    pub fn reset(&mut self, placeholder_title: &str, greeting: Option<&str>) {
        self.clear_entries();
        self.current = None;
        self.title = placeholder_title.to_string();
        if let Some(greeting) = greeting {
            self.push(Role::Bot, greeting);
        }
    }

    /// Detach from any stored exchange, keeping the entries on screen
    pub fn go_live(&mut self) {
        self.current = None;
    }

    /// Append a finished entry
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.entries.push(Entry {
            role,
            content: content.into(),
            placeholder: None,
        });
    }

    /// Append a bot "thinking" entry and return its handle
    pub fn push_placeholder(&mut self) -> PlaceholderId {
        let id = PlaceholderId(self.next_placeholder);
        self.next_placeholder += 1;
        self.entries.push(Entry {
            role: Role::Bot,
            content: THINKING.to_string(),
            placeholder: Some(id),
        });
        id
    }

    /// Turn a placeholder into a finished bot entry
    ///
    /// Returns false if the placeholder is no longer in the pane.
    pub fn resolve_placeholder(&mut self, id: PlaceholderId, content: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|e| e.placeholder == Some(id)) {
            Some(entry) => {
                entry.content = content.into();
                entry.placeholder = None;
                true
            }
            None => false,
        }
    }

    fn clear_entries(&mut self) {
        self.entries.clear();
        self.epoch += 1;
    }
}
