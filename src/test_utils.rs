//! Test utilities
//!
//! Provides [`FakeApi`], an in-memory stand-in for the chat server that
//! behaves like the real one (ids, titles, timestamps) and can be told to
//! fail individual endpoints.

use crate::api::{truncate_chars, ChatApi, ChatRecord};
use crate::error::{Result, SerenityError};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct FakeState {
    records: Vec<ChatRecord>,
    next_id: i64,
    clock: i64,
    history_error: Option<String>,
    send_error: Option<String>,
    delete_status: Option<u16>,
    faqs: Option<std::result::Result<Vec<String>, String>>,
    history_calls: usize,
    send_calls: usize,
    sent: Vec<String>,
}

/// In-memory chat server
#[derive(Debug, Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a server preloaded with `(title, message)` pairs
    ///
    /// Later pairs get later timestamps.
    pub fn with_records(pairs: &[(Option<&str>, &str)]) -> Self {
        let api = Self::new();
        for (title, message) in pairs {
            api.insert(title.map(str::to_string), message, &format!("re: {}", message));
        }
        api
    }

    /// Store a record the way the server would
    pub fn insert(&self, title: Option<String>, message: &str, response: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        state.clock += 1;
        let timestamp = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::minutes(state.clock);
        let record = ChatRecord {
            id: state.next_id,
            title,
            message: message.to_string(),
            response: response.to_string(),
            timestamp: timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        state.records.push(record);
        state.next_id
    }

    pub fn fail_history(&self, reason: Option<&str>) {
        self.state.lock().unwrap().history_error = reason.map(str::to_string);
    }

    pub fn fail_send(&self, reason: Option<&str>) {
        self.state.lock().unwrap().send_error = reason.map(str::to_string);
    }

    /// Make `delete_chat` and `clear_history` answer with `status`
    pub fn fail_delete(&self, status: Option<u16>) {
        self.state.lock().unwrap().delete_status = status;
    }

    pub fn set_faqs(&self, faqs: std::result::Result<Vec<String>, String>) {
        self.state.lock().unwrap().faqs = Some(faqs);
    }

    pub fn history_calls(&self) -> usize {
        self.state.lock().unwrap().history_calls
    }

    pub fn send_calls(&self) -> usize {
        self.state.lock().unwrap().send_calls
    }

    /// Messages received by `send`, in order
    pub fn sent(&self) -> Vec<String> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.state
            .lock()
            .unwrap()
            .records
            .iter()
            .map(|r| r.id)
            .collect()
    }
}

#[async_trait]
impl ChatApi for FakeApi {
    async fn history(&self) -> Result<Vec<ChatRecord>> {
        let mut state = self.state.lock().unwrap();
        state.history_calls += 1;
        if let Some(reason) = &state.history_error {
            return Err(SerenityError::Transport {
                endpoint: "/history".to_string(),
                message: reason.clone(),
            }
            .into());
        }
        Ok(state.records.clone())
    }

    async fn send(&self, message: &str) -> Result<String> {
        {
            let mut state = self.state.lock().unwrap();
            state.send_calls += 1;
            state.sent.push(message.to_string());
            if let Some(reason) = &state.send_error {
                return Err(SerenityError::Transport {
                    endpoint: "/chat".to_string(),
                    message: reason.clone(),
                }
                .into());
            }
        }
        let reply = format!("reply to {}", message);
        self.insert(Some(truncate_chars(message, 30)), message, &reply);
        Ok(reply)
    }

    async fn delete_chat(&self, id: i64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(status) = state.delete_status {
            return Err(SerenityError::Api {
                status,
                endpoint: format!("/delete_chat/{}", id),
            }
            .into());
        }
        state.records.retain(|r| r.id != id);
        Ok(())
    }

    async fn clear_history(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(status) = state.delete_status {
            return Err(SerenityError::Api {
                status,
                endpoint: "/clear_history".to_string(),
            }
            .into());
        }
        state.records.clear();
        Ok(())
    }

    async fn faqs(&self) -> Result<Vec<String>> {
        match self.state.lock().unwrap().faqs.clone() {
            Some(Ok(faqs)) => Ok(faqs),
            Some(Err(reason)) => Err(SerenityError::Decode {
                endpoint: "/faqs.json".to_string(),
                message: reason,
            }
            .into()),
            None => Err(SerenityError::Api {
                status: 404,
                endpoint: "/faqs.json".to_string(),
            }
            .into()),
        }
    }
}
