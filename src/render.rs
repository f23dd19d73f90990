//! Terminal rendering for history, the conversation pane, and FAQ chips
//!
//! Every string that came from the server is passed through
//! [`escape_terminal`] before it is printed. Renderers return `String`s so
//! callers decide where output goes.

use crate::api::{truncate_chars, ChatRecord};
use crate::error::SerenityError;
use crate::faq::FaqChips;
use crate::history::HistoryStatus;
use crate::view::{ConversationView, Role};

use colored::Colorize;
use prettytable::{format, Table};
use regex::Regex;
use std::sync::OnceLock;

const LABEL_WIDTH: usize = 40;

fn escape_sequence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // CSI, OSC (BEL or ST terminated), and two-byte escapes
    RE.get_or_init(|| {
        Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)?|\x1b[@-Z\\-_]")
            .expect("escape sequence pattern is valid")
    })
}

/// Make untrusted text safe to print
///
/// Strips terminal escape sequences and replaces any remaining control
/// character (other than newline and tab) with its escaped form, so stored
/// content can never recolor, move the cursor, or retitle the terminal.
///
/// # Examples
///
/// ```
/// use serenity_chat::render::escape_terminal;
///
/// assert_eq!(escape_terminal("\x1b[31mred\x1b[0m"), "red");
/// assert_eq!(escape_terminal("bell\x07"), "bell\\u{7}");
/// assert_eq!(escape_terminal("<b>tags stay text</b>"), "<b>tags stay text</b>");
/// ```
pub fn escape_terminal(text: &str) -> String {
    let stripped = escape_sequence_re().replace_all(text, "");
    let mut out = String::with_capacity(stripped.len());
    for c in stripped.chars() {
        if c.is_control() && c != '\n' && c != '\t' {
            out.extend(c.escape_unicode());
        } else {
            out.push(c);
        }
    }
    out
}

fn shorten(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", truncate_chars(text, width.saturating_sub(3)))
    } else {
        text.to_string()
    }
}

/// Render the history list
///
/// Rows are expected to be pre-filtered. The row the view is showing is
/// marked with `*`. When the last fetch failed, a degraded notice is printed
/// above whatever list is still held.
pub fn history_table(
    rows: &[&ChatRecord],
    current: Option<i64>,
    status: &HistoryStatus,
    search: &str,
) -> String {
    let mut out = String::new();

    if let HistoryStatus::Unavailable(reason) = status {
        out.push_str(&format!(
            "{}\n",
            format!("History unavailable: {}", escape_terminal(reason)).red()
        ));
    }

    let search = search.trim();
    if rows.is_empty() {
        let message = if search.is_empty() {
            "No conversation history found.".to_string()
        } else {
            format!("No chats match \"{}\".", escape_terminal(search))
        };
        out.push_str(&format!("{}\n", message.yellow()));
        return out;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.set_titles(prettytable::row!["", "ID", "Title", "When"]);

    for row in rows {
        let marker = if current == Some(row.id) { "*" } else { "" };
        let label = shorten(&escape_terminal(row.label()).replace('\n', " "), LABEL_WIDTH);
        let when = row
            .parsed_timestamp()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| escape_terminal(&row.timestamp));
        table.add_row(prettytable::row![marker, row.id, label, when]);
    }

    if search.is_empty() {
        out.push_str("Conversation History:\n");
    } else {
        out.push_str(&format!(
            "Conversation History matching \"{}\":\n",
            escape_terminal(search)
        ));
    }
    out.push_str(&table.to_string());
    out
}

/// Render the filtered history as pretty JSON
pub fn history_json(rows: &[&ChatRecord]) -> crate::error::Result<String> {
    Ok(serde_json::to_string_pretty(rows).map_err(SerenityError::Serialization)?)
}

/// Render the conversation pane: title, then each entry
pub fn conversation(view: &ConversationView) -> String {
    let mut out = format!("{}\n", escape_terminal(view.title()).bold());
    for entry in view.entries() {
        out.push_str(&message_line(entry.role, &entry.content, entry.is_placeholder()));
    }
    out
}

/// Render one entry
pub fn message_line(role: Role, content: &str, pending: bool) -> String {
    let tag = match role {
        Role::User => format!("🙂 {}", role).cyan().bold(),
        Role::Bot => format!("🤖 {}", role).green().bold(),
    };
    let body = escape_terminal(content);
    let body = if pending {
        body.dimmed().italic().to_string()
    } else {
        body
    };
    format!("{}: {}\n", tag, body)
}

/// Render the FAQ chips as a numbered list
pub fn faq_list(chips: &FaqChips) -> String {
    let mut out = format!("Suggested prompts ({}):\n", chips.source());
    for (i, prompt) in chips.prompts().iter().enumerate() {
        out.push_str(&format!(
            "  {} {}\n",
            format!("[{}]", i + 1).cyan(),
            escape_terminal(prompt)
        ));
    }
    out.push_str(&format!(
        "Use {} to send one.\n",
        "/faq <number>".cyan()
    ));
    out
}
