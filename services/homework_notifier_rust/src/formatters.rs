use homework_rust_core::models::{HomeworkRecord, HomeworkStatus};
use std::fmt::Display;
use thiserror::Error;

pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("homework record has no `{0}`")]
    MissingField(&'static str),
    #[error("unknown homework status {status:?}")]
    UnknownStatus { status: String },
}

/// Turn a homework record into the status-change message sent to the chat.
pub fn format_status(record: &HomeworkRecord) -> Result<String, FormatError> {
    if record.name.trim().is_empty() {
        return Err(FormatError::MissingField("homework_name"));
    }
    if record.status.trim().is_empty() {
        return Err(FormatError::MissingField("status"));
    }

    let status: HomeworkStatus = record
        .status
        .parse()
        .map_err(|_| FormatError::UnknownStatus {
            status: record.status.clone(),
        })?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        record.name,
        status.verdict()
    ))
}

/// Message sent when a whole cycle fails (fetch or payload shape).
pub fn format_failure(error: &dyn Display) -> String {
    format!("{FAILURE_PREFIX}: {error}")
}
