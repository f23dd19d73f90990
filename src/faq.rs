//! Suggested prompts ("FAQ chips")

use crate::api::ChatApi;
use std::fmt;

/// Where the current chips came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaqSource {
    Server,
    Fallback,
}

impl fmt::Display for FaqSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server => write!(f, "server"),
            Self::Fallback => write!(f, "built-in"),
        }
    }
}

/// The list of clickable prompts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqChips {
    prompts: Vec<String>,
    source: FaqSource,
}

impl FaqChips {
    pub fn new(prompts: Vec<String>, source: FaqSource) -> Self {
        Self { prompts, source }
    }

    /// Chips built from the fallback list
    pub fn fallback(defaults: &[String]) -> Self {
        Self::new(defaults.to_vec(), FaqSource::Fallback)
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn source(&self) -> FaqSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Chip text by 1-based position, as shown to the user
    pub fn chip(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.prompts.get(i))
            .map(String::as_str)
    }
}

/// Fetch the prompts, using `defaults` on any failure
///
/// Failure covers transport errors, non-success statuses, and payloads that
/// are not a JSON array of strings. There is no retry.
pub async fn load_faqs<A: ChatApi + ?Sized>(api: &A, defaults: &[String]) -> FaqChips {
    match api.faqs().await {
        Ok(prompts) => {
            tracing::debug!("Loaded {} FAQ prompts from server", prompts.len());
            FaqChips::new(prompts, FaqSource::Server)
        }
        Err(e) => {
            tracing::debug!("FAQ fetch failed, using built-in prompts: {}", e);
            FaqChips::fallback(defaults)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeApi;

    fn defaults() -> Vec<String> {
        crate::config::UiConfig::default().fallback_faqs
    }

    #[test]
    fn test_chip_is_one_based() {
        let chips = FaqChips::new(vec!["a".into(), "b".into()], FaqSource::Server);
        assert_eq!(chips.chip(1), Some("a"));
        assert_eq!(chips.chip(2), Some("b"));
        assert_eq!(chips.chip(0), None);
        assert_eq!(chips.chip(3), None);
    }

    #[tokio::test]
    async fn test_load_faqs_from_server() {
        let api = FakeApi::new();
        api.set_faqs(Ok(vec!["Custom prompt".to_string()]));

        let chips = load_faqs(&api, &defaults()).await;
        assert_eq!(chips.source(), FaqSource::Server);
        assert_eq!(chips.prompts(), &["Custom prompt".to_string()]);
    }

    #[tokio::test]
    async fn test_load_faqs_falls_back_on_error() {
        let api = FakeApi::new();
        api.set_faqs(Err("malformed".to_string()));

        let chips = load_faqs(&api, &defaults()).await;
        assert_eq!(chips.source(), FaqSource::Fallback);
        assert_eq!(chips.len(), 5);
        assert_eq!(
            chips.chip(1),
            Some("I feel stressed. Can you help me calm down?")
        );
        assert_eq!(
            chips.chip(5),
            Some("How do I manage negative self-talk gently?")
        );
    }
}
