//! Message input buffer and its keyboard contract
//!
//! Enter submits; Shift+Enter inserts a newline. A terminal line editor
//! cannot see the shift modifier, so [`Composer::feed_line`] treats a
//! trailing backslash as Shift+Enter.

/// What pressing Enter did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Shift+Enter added a newline; nothing was submitted
    Edited,
    /// Enter was pressed; carries the trimmed text, or `None` when blank
    Submit(Option<String>),
}

/// The message input box
#[derive(Debug, Clone, Default)]
pub struct Composer {
    input: String,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the buffer (used by FAQ chips)
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Press Enter, with or without Shift
    ///
    /// # Examples
    ///
    /// ```
    /// use serenity_chat::composer::{Composer, KeyOutcome};
    ///
    /// let mut composer = Composer::new();
    /// composer.set_input("h");
    /// composer.press_enter(true);
    /// composer.set_input(format!("{}i", composer.input()));
    /// assert_eq!(composer.input(), "h\ni");
    ///
    /// let outcome = composer.press_enter(false);
    /// assert_eq!(outcome, KeyOutcome::Submit(Some("h\ni".to_string())));
    /// assert_eq!(composer.input(), "");
    /// ```
    pub fn press_enter(&mut self, shift: bool) -> KeyOutcome {
        if shift {
            self.input.push('\n');
            KeyOutcome::Edited
        } else {
            KeyOutcome::Submit(self.take_submission())
        }
    }

    /// Take the trimmed buffer for sending
    ///
    /// Returns `None` and leaves the buffer alone when it is blank;
    /// otherwise clears the buffer.
    pub fn take_submission(&mut self) -> Option<String> {
        let text = self.input.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();
        self.input.clear();
        Some(text)
    }

    /// Feed one line from a line editor
    ///
    /// A trailing `\` stands for Shift+Enter: the backslash is dropped, a
    /// newline is kept, and nothing is submitted. Any other line ends with
    /// a plain Enter.
    pub fn feed_line(&mut self, line: &str) -> KeyOutcome {
        match line.strip_suffix('\\') {
            Some(head) => {
                self.input.push_str(head);
                self.press_enter(true)
            }
            None => {
                self.input.push_str(line);
                self.press_enter(false)
            }
        }
    }

    /// True while a multi-line message is being composed
    pub fn is_continuing(&self) -> bool {
        !self.input.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_submits_trimmed_text() {
        let mut composer = Composer::new();
        composer.set_input("  hello  ");
        assert_eq!(
            composer.press_enter(false),
            KeyOutcome::Submit(Some("hello".to_string()))
        );
        assert_eq!(composer.input(), "");
    }

    #[test]
    fn test_shift_enter_does_not_submit() {
        let mut composer = Composer::new();
        composer.set_input("line one");
        assert_eq!(
            composer.press_enter(true),
            KeyOutcome::Edited
        );
        assert_eq!(composer.input(), "line one\n");
    }

    #[test]
    fn test_blank_submission_is_none_and_keeps_buffer() {
        let mut composer = Composer::new();
        composer.set_input("   ");
        assert_eq!(composer.take_submission(), None);
        assert_eq!(composer.input(), "   ");
    }

    #[test]
    fn test_enter_on_blank_input_submits_nothing() {
        let mut composer = Composer::new();
        assert_eq!(composer.press_enter(false), KeyOutcome::Submit(None));
        assert_eq!(composer.feed_line("   "), KeyOutcome::Submit(None));
    }

    #[test]
    fn test_feed_line_continuation() {
        let mut composer = Composer::new();
        assert_eq!(composer.feed_line("first\\"), KeyOutcome::Edited);
        assert!(composer.is_continuing());
        assert_eq!(
            composer.feed_line("second"),
            KeyOutcome::Submit(Some("first\nsecond".to_string()))
        );
        assert!(!composer.is_continuing());
    }

    #[test]
    fn test_feed_line_plain() {
        let mut composer = Composer::new();
        assert_eq!(
            composer.feed_line("just one line"),
            KeyOutcome::Submit(Some("just one line".to_string()))
        );
    }
}
