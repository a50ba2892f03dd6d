//! Homework Core - shared pieces of the homework review notifier.
//!
//! This crate provides:
//! - Homework record, status taxonomy and poll cursor models
//! - Structural validation of the review API payload
//! - The review API client and the Telegram delivery client

pub mod clients;
pub mod models;
pub mod validation;

pub use clients::{FetchError, HomeworkSource, Notifier, NotifyError, PracticumClient, TelegramClient};
pub use models::{HomeworkRecord, HomeworkStatus, PollState};
pub use validation::{validate, ValidationError};
