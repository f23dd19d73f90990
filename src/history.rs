//! Client-side copy of the user's chat history
//!
//! The store keeps the last successfully fetched list, newest first, and
//! remembers whether the most recent fetch worked. Filtering is computed on
//! demand and never stored.

use crate::api::ChatRecord;
use std::cmp::Ordering;
use std::fmt;

/// Outcome of the most recent history fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HistoryStatus {
    /// No fetch has completed yet
    #[default]
    NotLoaded,
    /// The last fetch succeeded
    Loaded,
    /// The last fetch failed; the list shown is stale
    Unavailable(String),
}

impl fmt::Display for HistoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotLoaded => write!(f, "not loaded"),
            Self::Loaded => write!(f, "loaded"),
            Self::Unavailable(reason) => write!(f, "unavailable ({})", reason),
        }
    }
}

/// Past exchanges fetched from the server
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    chats: Vec<ChatRecord>,
    status: HistoryStatus,
}

impl HistoryStore {
    /// Create an empty, not-yet-loaded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list with a fresh fetch, sorted newest first
    pub fn replace(&mut self, mut records: Vec<ChatRecord>) {
        sort_newest_first(&mut records);
        self.chats = records;
        self.status = HistoryStatus::Loaded;
    }

    /// Record a failed fetch, keeping the previous list
    pub fn mark_unavailable(&mut self, reason: impl Into<String>) {
        self.status = HistoryStatus::Unavailable(reason.into());
    }

    /// All records, newest first
    pub fn chats(&self) -> &[ChatRecord] {
        &self.chats
    }

    pub fn status(&self) -> &HistoryStatus {
        &self.status
    }

    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    /// Look up a record by id
    pub fn get(&self, id: i64) -> Option<&ChatRecord> {
        self.chats.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.get(id).is_some()
    }

    /// Records whose title or message contains `term`, case-insensitively
    ///
    /// The term is trimmed first; an empty term selects every record. Order
    /// is preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use serenity_chat::api::ChatRecord;
    /// use serenity_chat::history::HistoryStore;
    ///
    /// let mut store = HistoryStore::new();
    /// store.replace(vec![ChatRecord {
    ///     id: 1,
    ///     title: Some("Sleep".into()),
    ///     message: "I can't sleep".into(),
    ///     response: "Try this".into(),
    ///     timestamp: "2024-01-01 08:00:00".into(),
    /// }]);
    /// assert_eq!(store.filter("SLEEP").len(), 1);
    /// assert!(store.filter("stress").is_empty());
    /// ```
    pub fn filter(&self, term: &str) -> Vec<&ChatRecord> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.chats.iter().collect();
        }
        self.chats.iter().filter(|c| c.matches(&needle)).collect()
    }
}

/// Stable sort by timestamp, newest first
///
/// Records with an unparseable timestamp go last, in their original order.
pub fn sort_newest_first(records: &mut [ChatRecord]) {
    records.sort_by(|a, b| match (a.parsed_timestamp(), b.parsed_timestamp()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
