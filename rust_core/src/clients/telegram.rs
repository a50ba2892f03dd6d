//! Telegram Bot API client
//!
//! Delivers plain-text messages through `sendMessage`. The bot token is part
//! of the request URL, so reqwest errors are stripped of their URL before
//! they reach a log line or an error value.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use super::Notifier;

pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

const MAX_BODY_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("telegram delivery failed: {reason}")]
    DeliveryFailed { reason: String },
}

impl NotifyError {
    fn delivery(reason: impl Into<String>) -> Self {
        NotifyError::DeliveryFailed {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    base_url: String,
    token: String,
}

impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl TelegramClient {
    pub fn new(base_url: String, token: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create Telegram HTTP client")?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.base_url.trim_end_matches('/'),
            self.token
        )
    }

    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), NotifyError> {
        let body = SendMessageRequest { chat_id, text };

        let resp = self
            .http
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!("Telegram request failed for chat {}: {}", chat_id, e);
                NotifyError::delivery(e.to_string())
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            let e = e.without_url();
            error!("Failed to read Telegram response for chat {}: {}", chat_id, e);
            NotifyError::delivery(e.to_string())
        })?;
        let parsed: Option<SendMessageResponse> = serde_json::from_str(&text).ok();

        if !status.is_success() {
            let detail = parsed
                .and_then(|r| r.description)
                .unwrap_or_else(|| truncate_body(&text));
            error!("Telegram API non-2xx for chat {}: {} {}", chat_id, status, detail);
            return Err(NotifyError::delivery(format!("HTTP {status}: {detail}")));
        }

        match parsed {
            Some(r) if r.ok => {
                debug!("Telegram message delivered to chat {}", chat_id);
                Ok(())
            }
            Some(r) => {
                let detail = r.description.unwrap_or_else(|| "no description".to_string());
                error!("Telegram API rejected message for chat {}: {}", chat_id, detail);
                Err(NotifyError::delivery(format!("rejected: {detail}")))
            }
            None => {
                error!("Telegram API returned an unreadable body for chat {}", chat_id);
                Err(NotifyError::delivery("unreadable sendMessage response"))
            }
        }
    }
}

/// Cap a raw response body before it goes into a log line or an error.
fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_BODY_CHARS) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn notify(&self, chat_id: &str, message: &str) -> Result<(), NotifyError> {
        self.send_message(chat_id, message).await
    }
}
