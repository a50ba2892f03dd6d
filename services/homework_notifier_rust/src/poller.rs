//! Poll loop driver
//!
//! One cycle is fetch -> validate -> (format -> notify) per record. Any
//! fetch, validation or formatting failure becomes a best-effort failure
//! message to the chat. Per-record failures never stop the rest of the
//! batch. The loop then sleeps the retry interval and starts over.

use crate::formatters::{format_failure, format_status};
use crate::status_tracker::StatusTracker;
use homework_rust_core::clients::{HomeworkSource, Notifier};
use homework_rust_core::models::PollState;
use homework_rust_core::validation::{current_date, validate};
use log::{debug, error, info, warn};
use std::fmt::Display;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed,
    FetchFailed,
    ValidationFailed,
}

impl CycleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::FetchFailed => "fetch_failed",
            Self::ValidationFailed => "validation_failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub outcome: CycleOutcome,
    pub records: usize,
    pub notified: usize,
    pub unchanged: usize,
    pub format_errors: usize,
    pub send_errors: usize,
}

impl CycleReport {
    fn new(outcome: CycleOutcome) -> Self {
        Self {
            outcome,
            records: 0,
            notified: 0,
            unchanged: 0,
            format_errors: 0,
            send_errors: 0,
        }
    }
}

pub struct HomeworkPoller<S, N> {
    source: S,
    notifier: N,
    chat_id: String,
    state: PollState,
    tracker: StatusTracker,
    retry_interval: Duration,
}

impl<S, N> HomeworkPoller<S, N>
where
    S: HomeworkSource,
    N: Notifier,
{
    pub fn new(
        source: S,
        notifier: N,
        chat_id: String,
        state: PollState,
        retry_interval: Duration,
    ) -> Self {
        Self {
            source,
            notifier,
            chat_id,
            state,
            tracker: StatusTracker::new(),
            retry_interval,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    #[cfg(test)]
    pub fn tracker(&self) -> &StatusTracker {
        &self.tracker
    }

    /// Run cycles forever with the retry interval between them.
    pub async fn run(mut self) {
        info!(
            "Polling {} every {}s for chat {}",
            self.source.source_name(),
            self.retry_interval.as_secs(),
            self.chat_id
        );
        loop {
            let report = self.run_cycle().await;
            info!(
                "Cycle {}: records={} notified={} unchanged={} format_errors={} send_errors={} next_from_date={}",
                report.outcome.as_str(),
                report.records,
                report.notified,
                report.unchanged,
                report.format_errors,
                report.send_errors,
                self.state.from_date()
            );
            tokio::time::sleep(self.retry_interval).await;
        }
    }

    /// One fetch-validate-notify pass. Never fails: every error is logged and
    /// reflected in the report.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let cursor = self.state.from_date();

        let payload = match self.source.fetch(cursor).await {
            Ok(p) => p,
            Err(e) => {
                error!("Fetch from {} failed: {}", self.source.source_name(), e);
                self.report_failure(&e).await;
                return CycleReport::new(CycleOutcome::FetchFailed);
            }
        };

        let records = match validate(&payload) {
            Ok(r) => r,
            Err(e) => {
                error!("Homework payload rejected: {}", e);
                self.report_failure(&e).await;
                return CycleReport::new(CycleOutcome::ValidationFailed);
            }
        };

        let mut report = CycleReport::new(CycleOutcome::Completed);
        report.records = records.len();
        if records.is_empty() {
            debug!("No homework status updates since {}", cursor);
        }

        for record in &records {
            if !self.tracker.is_transition(record) {
                debug!("Status unchanged for {}: {}", record.name, record.status);
                report.unchanged += 1;
                continue;
            }

            let message = match format_status(record) {
                Ok(m) => m,
                Err(e) => {
                    error!("Cannot format homework {:?}: {}", record.name, e);
                    report.format_errors += 1;
                    // The cursor still moves past this batch, so this is the
                    // only place the user hears about it.
                    self.report_failure(&e).await;
                    continue;
                }
            };

            match self.notifier.notify(&self.chat_id, &message).await {
                Ok(()) => {
                    info!("Sent status update for {}: {}", record.name, record.status);
                    self.tracker.record_delivered(record);
                    report.notified += 1;
                }
                Err(e) => {
                    error!("Status update for {} not delivered: {}", record.name, e);
                    report.send_errors += 1;
                }
            }
        }

        // Undelivered updates must be fetched again, so the cursor only
        // moves when the whole batch went out.
        match current_date(&payload) {
            Some(next) if report.send_errors == 0 => {
                if self.state.advance(next) {
                    debug!("Cursor advanced {} -> {}", cursor, next);
                }
            }
            Some(_) => warn!(
                "Keeping cursor at {} after {} failed deliveries",
                cursor, report.send_errors
            ),
            None => debug!("Payload has no current_date, cursor stays at {}", cursor),
        }

        report
    }

    async fn report_failure(&self, error: &(dyn Display + Sync)) {
        let message = format_failure(error);
        if let Err(e) = self.notifier.notify(&self.chat_id, &message).await {
            error!("Failure notification not delivered: {}", e);
        }
    }
}
