//! Core domain types for the vocabulary recitation tool.
//!
//! This module defines:
//! - Vocabulary entries and their review state
//! - Scheduling constants (mastery threshold, review intervals)
//! - Outcomes reported by the store and the scheduler

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Scheduling Constants
// ============================================================================

/// Consecutive correct answers after which a word is learned for good
pub const MASTERY_THRESHOLD: u32 = 3;

/// Delay before the next review after a correct answer
pub fn correct_interval() -> Duration {
    Duration::days(2)
}

/// Delay before the next review after an incorrect answer
pub fn incorrect_interval() -> Duration {
    Duration::days(1)
}

// ============================================================================
// Entry and State Types
// ============================================================================

/// A word and its meaning
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub word: String,
    pub meaning: String,
}

impl VocabularyEntry {
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
        }
    }
}

/// Review progress for a single word
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewState {
    pub word: String,
    pub consecutive_correct: u32,
    /// Only consulted while `learned` is false
    pub next_review_at: DateTime<Utc>,
    pub learned: bool,
}

impl ReviewState {
    /// Fresh state for a newly added word, due immediately
    pub fn new(word: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            word: word.into(),
            consecutive_correct: 0,
            next_review_at: truncate_to_seconds(now),
            learned: false,
        }
    }

    /// A word is due when it is still active and its review time has passed
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.learned && self.next_review_at <= now
    }
}

/// Drop sub-second precision so in-memory state matches what the record
/// files can hold.
pub fn truncate_to_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(at.timestamp(), 0).unwrap_or(at)
}

// ============================================================================
// Outcome Types
// ============================================================================

/// Result of adding a word to the store
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The word was already present; nothing changed
    AlreadyExists,
}

/// How a recorded answer changed a word's state
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Correct answer below the mastery threshold
    Advanced {
        streak: u32,
        next_review_at: DateTime<Utc>,
    },
    /// Incorrect answer; streak back to zero
    Reset { next_review_at: DateTime<Utc> },
    /// Streak reached the mastery threshold on this answer
    Learned,
    /// The word was already learned; the answer is ignored
    AlreadyLearned,
}

/// Counts over the tracked words
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub learned: usize,
    pub active: usize,
    pub due: usize,
}
