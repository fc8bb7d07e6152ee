//! Type-ahead search buffer.
//!
//! Each tree owns its own buffer, so two trees never see each other's
//! keystrokes. There is no background timer: the deadline is checked on
//! the next keystroke and restarted by it.

use std::time::{Duration, Instant};

use log::trace;

/// Inactivity window after which the buffer starts over.
pub const TYPEAHEAD_TIMEOUT: Duration = Duration::from_millis(600);

/// Rolling search buffer with an inactivity deadline.
#[derive(Debug, Clone, Default)]
pub struct TypeAhead {
    /// Lowercased characters typed so far
    buffer: String,
    /// When the buffer expires
    deadline: Option<Instant>,
}

impl TypeAhead {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a character typed at `now` and return the search term.
    pub fn push(&mut self, c: char, now: Instant) -> &str {
        if self.deadline.is_some_and(|deadline| now >= deadline) {
            trace!("Type-ahead buffer expired, clearing");
            self.buffer.clear();
        }
        self.buffer.extend(c.to_lowercase());
        self.deadline = Some(now + TYPEAHEAD_TIMEOUT);
        trace!("Type-ahead buffer: {:?}", self.buffer);
        &self.buffer
    }

    /// Cancel the pending deadline and forget the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.deadline = None;
    }
}

/// Whether `name` starts with `term`, ignoring case.
pub fn matches_prefix(name: &str, term: &str) -> bool {
    name.to_lowercase().starts_with(term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_within_window() {
        let start = Instant::now();
        let mut typeahead = TypeAhead::new();
        assert_eq!(typeahead.push('A', start), "a");
        assert_eq!(typeahead.push('v', start + Duration::from_millis(599)), "av");
    }

    #[test]
    fn test_each_key_restarts_deadline() {
        let start = Instant::now();
        let mut typeahead = TypeAhead::new();
        typeahead.push('a', start);
        typeahead.push('b', start + Duration::from_millis(500));
        // 1000ms after the first key but only 500ms after the second
        assert_eq!(typeahead.push('c', start + Duration::from_millis(1000)), "abc");
    }

    #[test]
    fn test_expires_after_timeout() {
        let start = Instant::now();
        let mut typeahead = TypeAhead::new();
        typeahead.push('a', start);
        assert_eq!(typeahead.push('v', start + TYPEAHEAD_TIMEOUT), "v");
    }

    #[test]
    fn test_clear_cancels_deadline() {
        let start = Instant::now();
        let mut typeahead = TypeAhead::new();
        typeahead.push('a', start);
        typeahead.clear();
        assert_eq!(typeahead.push('b', start + Duration::from_millis(10)), "b");
    }
}
