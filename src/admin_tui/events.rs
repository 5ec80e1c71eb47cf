//! Event plumbing for the admin TUI.
//!
//! A dedicated thread forwards crossterm key events into the application
//! channel; API calls run as spawned tasks that send their typed completion
//! back through the same channel. All state mutation happens on the single
//! consumer side.

use crossterm::event::KeyEvent;

use crate::api::ApiError;
use crate::models::{ChiefMinister, QuestionPage, UserPage};

/// Events consumed by the application loop.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),

    // Fetch completions, tagged with the issuing screen's request token
    CmListed {
        seq: u64,
        result: Result<Vec<ChiefMinister>, ApiError>,
    },
    QuestionsListed {
        seq: u64,
        result: Result<QuestionPage, ApiError>,
    },
    UsersListed {
        seq: u64,
        result: Result<UserPage, ApiError>,
    },

    // Mutation completions; `Ok` carries the status line to display
    /// Create/update/delete issued from the CM screen's modal
    CmMutated { result: Result<String, ApiError> },
    /// Update/delete issued from the questions screen's modal
    QuestionMutated { result: Result<String, ApiError> },
    /// Create issued from the add-question screen
    QuestionCreated { result: Result<String, ApiError> },
}

/// Per-screen monotone request token. A fetch completion is applied only
/// when its token is still the latest issued, so a slow stale response can
/// never overwrite newer state.
#[derive(Debug, Default)]
pub struct RequestSeq {
    latest: u64,
}

impl RequestSeq {
    pub fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_responses_are_not_latest() {
        let mut seq = RequestSeq::default();
        let first = seq.next();
        let second = seq.next();

        // The slow first response lands after the second was issued
        assert!(!seq.is_latest(first));
        assert!(seq.is_latest(second));
    }

    #[test]
    fn test_tokens_increase_monotonically() {
        let mut seq = RequestSeq::default();
        let a = seq.next();
        let b = seq.next();
        let c = seq.next();
        assert!(a < b && b < c);
    }
}
