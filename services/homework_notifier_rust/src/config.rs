use anyhow::{anyhow, Context, Result};
use homework_rust_core::clients::practicum::DEFAULT_ENDPOINT;
use homework_rust_core::clients::telegram::DEFAULT_API_BASE_URL;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const LOG_FILE: &str = "LOG_FILE";

pub const DEFAULT_RETRY_SECS: u64 = 600;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILE: &str = "program.log";

#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub practicum_endpoint: String,

    pub telegram_token: String,
    pub telegram_api_base_url: String,
    pub telegram_chat_id: String,

    pub retry_interval: Duration,
    pub request_timeout: Duration,
    pub initial_lookback_secs: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("practicum_endpoint", &self.practicum_endpoint)
            .field("telegram_token", &"<redacted>")
            .field("telegram_api_base_url", &self.telegram_api_base_url)
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("retry_interval", &self.retry_interval)
            .field("request_timeout", &self.request_timeout)
            .field("initial_lookback_secs", &self.initial_lookback_secs)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    ///
    /// Every required key is checked before returning, so the error names all
    /// missing values at once. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let required = [PRACTICUM_TOKEN, TELEGRAM_TOKEN, TELEGRAM_CHAT_ID];
        let missing: Vec<&str> = required.iter().copied().filter(|k| get(*k).is_none()).collect();
        if !missing.is_empty() {
            return Err(anyhow!(
                "Missing required environment variables: {}",
                missing.join(", ")
            ));
        }

        let practicum_token = get(PRACTICUM_TOKEN).unwrap_or_default();
        let telegram_token = get(TELEGRAM_TOKEN).unwrap_or_default();
        let telegram_chat_id = get(TELEGRAM_CHAT_ID).unwrap_or_default();

        let practicum_endpoint =
            get("PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let telegram_api_base_url =
            get("TELEGRAM_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let retry_secs = parse_u64(&get, "RETRY_TIME_SECS", DEFAULT_RETRY_SECS)?;
        if retry_secs == 0 {
            return Err(anyhow!("RETRY_TIME_SECS must be > 0"));
        }
        let timeout_secs = parse_u64(&get, "REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(anyhow!("REQUEST_TIMEOUT_SECS must be > 0"));
        }
        let initial_lookback_secs = parse_u64(&get, "INITIAL_LOOKBACK_SECS", 0)?;

        Ok(Self {
            practicum_token,
            practicum_endpoint,
            telegram_token,
            telegram_api_base_url,
            telegram_chat_id,
            retry_interval: Duration::from_secs(retry_secs),
            request_timeout: Duration::from_secs(timeout_secs),
            initial_lookback_secs,
        })
    }
}

/// Log file location, read before the rest of the config so that a config
/// failure can still be logged.
pub fn log_file_from_env() -> PathBuf {
    env::var(LOG_FILE)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
        .into()
}

fn parse_u64<G>(get: &G, key: &str, default: u64) -> Result<u64>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("Invalid {key}: {raw} (expected non-negative integer)")),
    }
}
