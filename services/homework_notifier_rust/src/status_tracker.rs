//! Last delivered status per homework, so repeated polls only notify on a
//! real transition.

use homework_rust_core::models::HomeworkRecord;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct StatusTracker {
    last_delivered: HashMap<String, String>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the record's homework was never delivered or its status
    /// differs from the last delivered one.
    pub fn is_transition(&self, record: &HomeworkRecord) -> bool {
        self.last_delivered
            .get(&record.name)
            .map_or(true, |last| last != &record.status)
    }

    /// Remember a delivered status. Call only after delivery succeeded.
    pub fn record_delivered(&mut self, record: &HomeworkRecord) {
        self.last_delivered
            .insert(record.name.clone(), record.status.clone());
    }

    #[cfg(test)]
    pub fn last_status(&self, name: &str) -> Option<&str> {
        self.last_delivered.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sighting_is_a_transition() {
        let tracker = StatusTracker::new();
        assert!(tracker.is_transition(&HomeworkRecord::new("hw1", "reviewing")));
    }

    #[test]
    fn test_same_status_is_not_a_transition() {
        let mut tracker = StatusTracker::new();
        let record = HomeworkRecord::new("hw1", "reviewing");
        tracker.record_delivered(&record);

        assert!(!tracker.is_transition(&record));
        assert!(tracker.is_transition(&HomeworkRecord::new("hw1", "approved")));
        assert!(tracker.is_transition(&HomeworkRecord::new("hw2", "reviewing")));
    }

    #[test]
    fn test_record_delivered_overwrites() {
        let mut tracker = StatusTracker::new();
        tracker.record_delivered(&HomeworkRecord::new("hw1", "reviewing"));
        tracker.record_delivered(&HomeworkRecord::new("hw1", "rejected"));

        assert_eq!(tracker.last_status("hw1"), Some("rejected"));
        assert_eq!(tracker.last_status("hw2"), None);
    }
}
