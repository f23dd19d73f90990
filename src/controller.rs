//! Chat client controller
//!
//! [`ChatController`] owns every piece of client state: the history store,
//! the conversation pane, the composer, the FAQ chips, and the search term.
//! The server is reached only through a [`ChatApi`] implementation.
//!
//! Sending is split in two so that overlapping sends resolve
//! deterministically:
//!
//! 1. [`ChatController::begin_send`] renders the user's message and a
//!    placeholder, and returns a [`PendingSend`] ticket.
//! 2. [`ChatController::finish_send`] applies the server's answer.
//!
//! A ticket records the view epoch and the intent generation at submission.
//! A reply is painted only if its pane is still on screen, and only the most
//! recent intent may retitle the view.

use crate::api::{truncate_chars, ChatApi, ChatRecord};
use crate::composer::Composer;
use crate::config::UiConfig;
use crate::error::{Result, SerenityError};
use crate::faq::{load_faqs, FaqChips};
use crate::history::{HistoryStatus, HistoryStore};
use crate::view::{ConversationView, PlaceholderId, Role};

/// Asks the user to approve a destructive action
pub trait Confirm {
    /// Return true to proceed
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Prompt shown before deleting a single chat
pub const DELETE_PROMPT: &str = "Delete this chat?";
/// Prompt shown before clearing the whole history
pub const CLEAR_PROMPT: &str = "Clear all your chat history?";

/// Ticket for a send whose reply has not been applied yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    text: String,
    placeholder: PlaceholderId,
    epoch: u64,
    intent: u64,
}

impl PendingSend {
    /// The trimmed message being sent
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// What happened to a finished send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReport {
    /// Whether the server answered
    pub delivered: bool,
    /// Whether the reply (or apology) was painted into the pane
    pub painted: bool,
    /// Whether this send retitled the view
    pub retitled: bool,
    /// The reply, or the apology when the send failed
    pub content: String,
}

/// Snapshot for the status display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    pub history: HistoryStatus,
    pub chats: usize,
    pub visible: usize,
    pub search: String,
    pub current: Option<i64>,
    pub title: String,
    pub pending: usize,
    pub faq_count: usize,
    pub faq_source: crate::faq::FaqSource,
}

/// Owner of all client-side state
pub struct ChatController<A: ChatApi> {
    api: A,
    ui: UiConfig,
    history: HistoryStore,
    view: ConversationView,
    composer: Composer,
    faqs: FaqChips,
    search: String,
    intent: u64,
}

impl<A: ChatApi> ChatController<A> {
    /// Create a controller with empty history and fallback FAQ chips
    pub fn new(api: A, ui: UiConfig) -> Self {
        let view = ConversationView::new(ui.placeholder_title.clone());
        let faqs = FaqChips::fallback(&ui.fallback_faqs);
        Self {
            api,
            ui,
            history: HistoryStore::new(),
            view,
            composer: Composer::new(),
            faqs,
            search: String::new(),
            intent: 0,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn view(&self) -> &ConversationView {
        &self.view
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    pub fn faqs(&self) -> &FaqChips {
        &self.faqs
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Load history and FAQ chips concurrently
    ///
    /// A history failure leaves the store in the degraded state and is
    /// returned; FAQ failures are absorbed by the fallback list.
    pub async fn boot(&mut self) -> Result<()> {
        let (history, faqs) = tokio::join!(
            self.api.history(),
            load_faqs(&self.api, &self.ui.fallback_faqs)
        );
        self.faqs = faqs;
        self.apply_history(history).map(|_| ())
    }

    /// Fetch history, replacing the stored list
    ///
    /// Returns the number of records loaded. On failure the previous list
    /// is kept and the store is marked unavailable.
    pub async fn load_history(&mut self) -> Result<usize> {
        let result = self.api.history().await;
        self.apply_history(result)
    }

    fn apply_history(&mut self, result: Result<Vec<ChatRecord>>) -> Result<usize> {
        match result {
            Ok(records) => {
                self.history.replace(records);
                tracing::debug!("History loaded: {} chats", self.history.len());
                if let Some(id) = self.view.current() {
                    if !self.history.contains(id) {
                        tracing::info!("Open chat {} no longer exists, clearing view", id);
                        self.clear_view();
                    }
                }
                Ok(self.history.len())
            }
            Err(e) => {
                tracing::warn!("History unavailable: {}", e);
                self.history.mark_unavailable(e.to_string());
                Err(e)
            }
        }
    }

    /// Set the search term used by [`Self::visible_history`]
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// History rows matching the current search term, newest first
    pub fn visible_history(&self) -> Vec<&ChatRecord> {
        self.history.filter(&self.search)
    }

    /// Open a stored exchange in the conversation pane
    ///
    /// # Errors
    ///
    /// Returns [`SerenityError::NotFound`] if no loaded record has this id;
    /// the view is left untouched.
    pub fn open(&mut self, id: i64) -> Result<()> {
        let record = self.history.get(id).ok_or(SerenityError::NotFound(id))?;
        self.view.show_record(record, self.ui.title_chars);
        self.intent += 1;
        Ok(())
    }

    /// Start a fresh conversation with the greeting
    pub fn new_chat(&mut self) {
        self.view
            .reset(&self.ui.placeholder_title, Some(self.ui.greeting.as_str()));
        self.intent += 1;
    }

    /// Empty the conversation pane
    pub fn clear_view(&mut self) {
        self.view.reset(&self.ui.placeholder_title, None);
        self.intent += 1;
    }

    /// First half of a send: render the message and a placeholder
    ///
    /// Returns `None` without side effects when the composer is blank.
    pub fn begin_send(&mut self) -> Option<PendingSend> {
        let text = self.composer.take_submission()?;
        self.view.go_live();
        self.view.push(Role::User, text.clone());
        let placeholder = self.view.push_placeholder();
        self.intent += 1;
        Some(PendingSend {
            text,
            placeholder,
            epoch: self.view.epoch(),
            intent: self.intent,
        })
    }

    /// Second half of a send: apply the server's answer
    ///
    /// On success the reply replaces the placeholder, history is reloaded,
    /// and the view is retitled from the sent text. On failure the
    /// placeholder becomes the apology; the cause is only logged.
    pub async fn finish_send(
        &mut self,
        pending: PendingSend,
        outcome: Result<String>,
    ) -> SendReport {
        let same_pane = pending.epoch == self.view.epoch();
        let delivered = outcome.is_ok();

        let content = match outcome {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("Send failed: {}", e);
                self.ui.apology.clone()
            }
        };
        let painted =
            same_pane && self.view.resolve_placeholder(pending.placeholder, content.clone());

        let mut retitled = false;
        if delivered {
            if let Err(e) = self.load_history().await {
                tracing::debug!("History reload after send failed: {}", e);
            }
            if pending.intent == self.intent {
                self.view
                    .set_title(truncate_chars(&pending.text, self.ui.title_chars));
                retitled = true;
            }
        }

        SendReport {
            delivered,
            painted,
            retitled,
            content,
        }
    }

    /// Send whatever is in the composer
    ///
    /// Returns `None` (and makes no network call) when the composer is blank.
    pub async fn send_message(&mut self) -> Option<SendReport> {
        let pending = self.begin_send()?;
        let outcome = self.api.send(pending.text()).await;
        Some(self.finish_send(pending, outcome).await)
    }

    /// Put `text` in the composer and send it
    pub async fn send_text(&mut self, text: impl Into<String>) -> Option<SendReport> {
        self.composer.set_input(text);
        self.send_message().await
    }

    /// Put FAQ chip `number` (1-based) into the composer
    pub fn stage_faq(&mut self, number: usize) -> Result<&str> {
        let prompt = self.faqs.chip(number).ok_or_else(|| {
            SerenityError::Command(format!(
                "No suggested prompt #{} (there are {})",
                number,
                self.faqs.len()
            ))
        })?;
        self.composer.set_input(prompt);
        Ok(self.composer.input())
    }

    /// Click FAQ chip `number` (1-based)
    ///
    /// Equivalent to typing the chip text and submitting.
    pub async fn click_faq(&mut self, number: usize) -> Result<Option<SendReport>> {
        self.stage_faq(number)?;
        Ok(self.send_message().await)
    }

    /// Delete one stored exchange after confirmation
    ///
    /// Reloads history afterwards and clears the view if it was showing the
    /// deleted record.
    ///
    /// # Errors
    ///
    /// Returns [`SerenityError::Cancelled`] if the user declines (nothing is
    /// changed), the server error if the delete fails, or the reload error.
    pub async fn delete_chat(&mut self, id: i64, confirm: &mut impl Confirm) -> Result<()> {
        self.confirm(confirm, DELETE_PROMPT, "delete chat")?;
        self.api.delete_chat(id).await?;
        let reloaded = self.load_history().await;
        if self.view.current() == Some(id) {
            self.clear_view();
        }
        reloaded.map(|_| ())
    }

    /// Delete every stored exchange after confirmation
    ///
    /// # Errors
    ///
    /// Same as [`Self::delete_chat`].
    pub async fn clear_history(&mut self, confirm: &mut impl Confirm) -> Result<()> {
        self.confirm(confirm, CLEAR_PROMPT, "clear history")?;
        self.api.clear_history().await?;
        let reloaded = self.load_history().await;
        self.clear_view();
        reloaded.map(|_| ())
    }

    fn confirm(&self, confirm: &mut impl Confirm, prompt: &str, action: &str) -> Result<()> {
        if self.ui.confirm_destructive && !confirm.confirm(prompt) {
            tracing::debug!("User declined: {}", action);
            return Err(SerenityError::Cancelled(action.to_string()).into());
        }
        Ok(())
    }

    /// Summary of current state for `/status`
    pub fn status(&self) -> StatusSummary {
        StatusSummary {
            history: self.history.status().clone(),
            chats: self.history.len(),
            visible: self.visible_history().len(),
            search: self.search.clone(),
            current: self.view.current(),
            title: self.view.title().to_string(),
            pending: self.view.pending(),
            faq_count: self.faqs.len(),
            faq_source: self.faqs.source(),
        }
    }
}
