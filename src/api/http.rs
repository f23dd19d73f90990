//! HTTP implementation of [`ChatApi`] backed by `reqwest`

use crate::api::{ChatApi, ChatRecord, ChatReply, ChatRequest};
use crate::config::ServerConfig;
use crate::error::{Result, SerenityError};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Chat server client speaking JSON over HTTP
///
/// # Examples
///
/// ```
/// use serenity_chat::api::HttpChatApi;
/// use serenity_chat::config::ServerConfig;
///
/// let api = HttpChatApi::new(&ServerConfig::default()).unwrap();
/// assert_eq!(api.endpoint("/history"), "http://127.0.0.1:5000/history");
/// ```
#[derive(Debug, Clone)]
pub struct HttpChatApi {
    client: Client,
    base_url: String,
    faq_path: String,
}

impl HttpChatApi {
    /// Build a client for the configured server
    ///
    /// # Errors
    ///
    /// Returns error if the session cookie is not a valid header value or
    /// the HTTP client cannot be initialized
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(cookie.trim()).map_err(|e| {
                SerenityError::Config(format!("Invalid server.session_cookie: {}", e))
            })?;
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("serenity-chat/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(SerenityError::Http)?;

        tracing::info!("Initialized chat client: server={}", config.base_url);

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            faq_path: config.faq_path.clone(),
        })
    }

    /// Absolute URL for a server path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&ChatRequest>,
    ) -> Result<Response> {
        let url = self.endpoint(path);
        tracing::debug!(%method, %url, "Calling chat server");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("Request to {} failed: {}", path, e);
            SerenityError::Transport {
                endpoint: path.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Server returned {} for {}", status, path);
            return Err(SerenityError::Api {
                status: status.as_u16(),
                endpoint: path.to_string(),
            }
            .into());
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T> {
        let body = response.text().await.map_err(|e| SerenityError::Transport {
            endpoint: path.to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&body).map_err(|e| {
            // The server answers unauthenticated calls with its HTML login page.
            let hint = if body.trim_start().starts_with('<') {
                " (got HTML; is server.session_cookie set?)"
            } else {
                ""
            };
            SerenityError::Decode {
                endpoint: path.to_string(),
                message: format!("{}{}", e, hint),
            }
            .into()
        })
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn history(&self) -> Result<Vec<ChatRecord>> {
        let response = self.call(Method::GET, "/history", None).await?;
        let records: Vec<ChatRecord> = Self::decode(response, "/history").await?;
        tracing::debug!("Fetched {} history records", records.len());
        Ok(records)
    }

    async fn send(&self, message: &str) -> Result<String> {
        let body = ChatRequest {
            message: message.to_string(),
        };
        let response = self.call(Method::POST, "/chat", Some(&body)).await?;
        let reply: ChatReply = Self::decode(response, "/chat").await?;
        Ok(reply.reply)
    }

    async fn delete_chat(&self, id: i64) -> Result<()> {
        let path = format!("/delete_chat/{}", id);
        self.call(Method::DELETE, &path, None).await?;
        tracing::info!("Deleted chat {}", id);
        Ok(())
    }

    async fn clear_history(&self) -> Result<()> {
        self.call(Method::DELETE, "/clear_history", None).await?;
        tracing::info!("Cleared chat history");
        Ok(())
    }

    async fn faqs(&self) -> Result<Vec<String>> {
        let response = self.call(Method::GET, &self.faq_path, None).await?;
        Self::decode(response, &self.faq_path).await
    }
}
