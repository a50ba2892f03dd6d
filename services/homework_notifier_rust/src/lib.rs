//! homework_notifier_rust - polls the homework review API and relays status
//! changes to a Telegram chat

pub mod config;
pub mod formatters;
pub mod logging;
pub mod poller;
pub mod status_tracker;

pub use config::Config;
pub use poller::{CycleOutcome, CycleReport, HomeworkPoller};
