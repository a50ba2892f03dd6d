// Shared models for the homework notifier services
use chrono::Utc;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Homework records (one poll cycle lifetime)
// ============================================================================

/// A single homework entry as reported by the review API.
///
/// `status` stays a raw string here: whether it belongs to the known
/// taxonomy is decided when the record is formatted, so a drift on the
/// upstream side surfaces as a per-record error instead of a rejected batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub name: String,
    pub status: String,
}

impl HomeworkRecord {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
        }
    }
}

// ============================================================================
// Review status taxonomy
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Display text shown to the student for this status.
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown homework status: {:?}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for HomeworkStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HomeworkStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

// ============================================================================
// Poll cursor
// ============================================================================

/// Lower bound (unix seconds) for the next status request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollState {
    from_date: i64,
}

impl PollState {
    pub fn new(from_date: i64) -> Self {
        Self { from_date }
    }

    /// Cursor starting `lookback_secs` before the current time.
    pub fn starting_now(lookback_secs: u64) -> Self {
        let lookback = i64::try_from(lookback_secs).unwrap_or(i64::MAX);
        Self::new(Utc::now().timestamp().saturating_sub(lookback).max(0))
    }

    pub fn from_date(&self) -> i64 {
        self.from_date
    }

    /// Move the cursor to `current_date`. Never moves backwards.
    /// Returns true when the cursor changed.
    pub fn advance(&mut self, current_date: i64) -> bool {
        if current_date > self.from_date {
            self.from_date = current_date;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in HomeworkStatus::ALL {
            assert_eq!(status.as_str().parse::<HomeworkStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_unknown_status_is_an_error() {
        let err = "unknown_status".parse::<HomeworkStatus>().unwrap_err();
        assert_eq!(err, UnknownStatus("unknown_status".to_string()));
        assert!("Approved".parse::<HomeworkStatus>().is_err());
        assert!("".parse::<HomeworkStatus>().is_err());
    }

    #[test]
    fn test_verdicts_are_non_empty_and_distinct() {
        let verdicts: Vec<&str> = HomeworkStatus::ALL.iter().map(|s| s.verdict()).collect();
        assert!(verdicts.iter().all(|v| !v.trim().is_empty()));
        assert_ne!(verdicts[0], verdicts[1]);
        assert_ne!(verdicts[1], verdicts[2]);
        assert_ne!(verdicts[0], verdicts[2]);
    }

    #[test]
    fn test_poll_state_only_moves_forward() {
        let mut state = PollState::new(1_000);
        assert!(state.advance(2_000));
        assert_eq!(state.from_date(), 2_000);

        assert!(!state.advance(1_500));
        assert!(!state.advance(2_000));
        assert_eq!(state.from_date(), 2_000);
    }

    #[test]
    fn test_poll_state_starting_now_applies_lookback() {
        let now = Utc::now().timestamp();
        let state = PollState::starting_now(3_600);
        assert!(state.from_date() <= now - 3_600);
        assert!(state.from_date() >= now - 3_600 - 5);
    }
}
