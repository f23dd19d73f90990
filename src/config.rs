//! Configuration management for the Serenity client
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, SerenityError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Where the chat server lives and how to talk to it
    #[serde(default)]
    pub server: ServerConfig,
    /// Fixed texts and behavior of the client views
    #[serde(default)]
    pub ui: UiConfig,
}

/// Chat server connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the chat server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the static FAQ resource, relative to `base_url`
    #[serde(default = "default_faq_path")]
    pub faq_path: String,

    /// Timeout applied to every request (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Raw value of the server's session cookie (e.g. `session=...`)
    ///
    /// The server keys history on the logged-in user, so requests without
    /// a session are redirected to its login page.
    #[serde(default)]
    pub session_cookie: Option<String>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_faq_path() -> String {
    "/faqs.json".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            faq_path: default_faq_path(),
            timeout_seconds: default_timeout(),
            session_cookie: None,
        }
    }
}

/// View texts and behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Title shown when no stored exchange is open
    #[serde(default = "default_placeholder_title")]
    pub placeholder_title: String,

    /// Bot line seeded by `/new`
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Bot line shown when a send fails for any reason
    #[serde(default = "default_apology")]
    pub apology: String,

    /// Number of characters of a message used as a fallback title
    #[serde(default = "default_title_chars")]
    pub title_chars: usize,

    /// Ask before deleting chats
    #[serde(default = "default_confirm_destructive")]
    pub confirm_destructive: bool,

    /// Prompts shown when the FAQ resource cannot be loaded
    #[serde(default = "default_fallback_faqs")]
    pub fallback_faqs: Vec<String>,
}

fn default_placeholder_title() -> String {
    "New Conversation".to_string()
}

fn default_greeting() -> String {
    "New chat started. How can I support you today?".to_string()
}

fn default_apology() -> String {
    "Sorry, I couldn’t reach the server. Please try again.".to_string()
}

fn default_title_chars() -> usize {
    30
}

fn default_confirm_destructive() -> bool {
    true
}

fn default_fallback_faqs() -> Vec<String> {
    vec![
        "I feel stressed. Can you help me calm down?".to_string(),
        "Share some quick breathing exercises.".to_string(),
        "How can I improve my sleep routine?".to_string(),
        "Suggest mindful journaling prompts.".to_string(),
        "How do I manage negative self-talk gently?".to_string(),
    ]
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            placeholder_title: default_placeholder_title(),
            greeting: default_greeting(),
            apology: default_apology(),
            title_chars: default_title_chars(),
            confirm_destructive: default_confirm_destructive(),
            fallback_faqs: default_fallback_faqs(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SerenityError::Config(format!("Failed to read config file: {}", e)))?;
        Ok(serde_yaml::from_str(&contents).map_err(SerenityError::Yaml)?)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(url) = std::env::var("SERENITY_SERVER_URL") {
            self.server.base_url = url;
        }

        if let Ok(faq_path) = std::env::var("SERENITY_FAQ_PATH") {
            self.server.faq_path = faq_path;
        }

        if let Ok(timeout) = std::env::var("SERENITY_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.server.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid SERENITY_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(cookie) = std::env::var("SERENITY_SESSION_COOKIE") {
            if !cookie.trim().is_empty() {
                self.server.session_cookie = Some(cookie);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(server) = &cli.server {
            tracing::debug!(server = %server, "CLI override: --server");
            self.server.base_url = server.clone();
        }
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.server.base_url.trim().is_empty() {
            return Err(SerenityError::Config("server.base_url cannot be empty".to_string()).into());
        }

        let url = Url::parse(&self.server.base_url).map_err(|e| {
            SerenityError::Config(format!(
                "Invalid server.base_url {}: {}",
                self.server.base_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SerenityError::Config(format!(
                "server.base_url must use http or https, got {}",
                url.scheme()
            ))
            .into());
        }

        if self.server.timeout_seconds == 0 {
            return Err(SerenityError::Config(
                "server.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.ui.title_chars == 0 {
            return Err(
                SerenityError::Config("ui.title_chars must be greater than 0".to_string()).into(),
            );
        }

        if self.ui.fallback_faqs.is_empty() {
            return Err(
                SerenityError::Config("ui.fallback_faqs cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}
