//! Practicum homework review API client
//!
//! Fetches homework status changes since a unix timestamp. The response body
//! is handed back as raw JSON; shape checks live in [`crate::validation`].

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{error, info};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use super::HomeworkSource;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("homework API request failed: {reason}")]
    Transport { reason: String },
    #[error("homework API returned HTTP {code}, expected 200")]
    BadStatus { code: u16 },
    #[error("homework API response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Authenticated client for the homework status endpoint
#[derive(Clone)]
pub struct PracticumClient {
    http: Client,
    endpoint: String,
    token: String,
}

impl fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl PracticumClient {
    pub fn new(endpoint: String, token: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent("homework-notifier/1.0")
            .build()
            .context("Failed to create homework API HTTP client")?;

        Ok(Self {
            http,
            endpoint,
            token,
        })
    }

    /// GET the status feed with `from_date=cursor`.
    pub async fn fetch(&self, cursor: i64) -> Result<Value, FetchError> {
        info!("Requesting homework statuses from {} (from_date={})", self.endpoint, cursor);

        let response = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", cursor)])
            .send()
            .await
            .map_err(|e| {
                error!("Homework API transport failure: {}", e);
                FetchError::Transport {
                    reason: e.to_string(),
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("Homework API answered {} for from_date={}", status, cursor);
            return Err(FetchError::BadStatus {
                code: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            error!("Failed to read homework API response body: {}", e);
            FetchError::Transport {
                reason: e.to_string(),
            }
        })?;

        serde_json::from_str(&body).map_err(|e| {
            error!("Homework API response is not JSON ({} bytes): {}", body.len(), e);
            FetchError::Decode(e)
        })
    }
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    async fn fetch(&self, cursor: i64) -> Result<Value, FetchError> {
        PracticumClient::fetch(self, cursor).await
    }

    fn source_name(&self) -> &str {
        "practicum"
    }
}
