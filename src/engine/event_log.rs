//! Bounded "kernel log" shown in the visualizer panel.
//!
//! Holds the most recent events, newest first. Every entry is mirrored to
//! the `log` facade so it also lands in the process log.

use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// Smallest and largest capacity accepted for the on-screen log.
pub const MIN_CAPACITY: usize = 5;
pub const MAX_CAPACITY: usize = 8;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl EventLog {
    /// Create a log; `capacity` is clamped to `MIN_CAPACITY..=MAX_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(MIN_CAPACITY, MAX_CAPACITY);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record an event as the newest entry, evicting the oldest when full.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{}", message);
        self.entries.push_front(LogEntry {
            timestamp: Local::now(),
            message,
        });
        self.entries.truncate(self.capacity);
    }

    /// Drop all entries and start over with `messages` (given oldest first).
    pub fn replace<I, S>(&mut self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.clear();
        for message in messages {
            self.push(message);
        }
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Messages, newest first.
    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_and_bounded() {
        let mut log = EventLog::new(5);
        for i in 0..7 {
            log.push(format!("> event {}", i));
        }
        assert_eq!(log.len(), 5);
        assert_eq!(log.messages(), vec!["> event 6", "> event 5", "> event 4", "> event 3", "> event 2"]);
    }

    #[test]
    fn capacity_is_clamped() {
        assert_eq!(EventLog::new(1).capacity(), MIN_CAPACITY);
        assert_eq!(EventLog::new(100).capacity(), MAX_CAPACITY);
        assert_eq!(EventLog::new(6).capacity(), 6);
    }

    #[test]
    fn replace_starts_over() {
        let mut log = EventLog::new(8);
        log.push("> old");
        log.replace(["> first", "> second"]);
        assert_eq!(log.messages(), vec!["> second", "> first"]);
    }
}
