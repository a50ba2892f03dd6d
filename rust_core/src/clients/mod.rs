//! Outbound clients and the traits the poll driver depends on.

pub mod practicum;
pub mod telegram;

use async_trait::async_trait;
use serde_json::Value;

// Re-export commonly used types
pub use practicum::{FetchError, PracticumClient};
pub use telegram::{NotifyError, TelegramClient};

/// Source of raw homework status payloads
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Fetch status changes since `cursor` (unix seconds)
    async fn fetch(&self, cursor: i64) -> Result<Value, FetchError>;

    /// Source name for logging
    fn source_name(&self) -> &str;
}

/// Chat transport for user-facing messages
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, chat_id: &str, message: &str) -> Result<(), NotifyError>;
}
