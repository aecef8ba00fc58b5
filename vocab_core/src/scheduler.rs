//! Spaced-repetition scheduler.
//!
//! Each tracked word is either active (streak 0..=2, gated by
//! `next_review_at`) or learned (terminal):
//! - Correct answer: streak + 1; at the mastery threshold the word is
//!   learned, otherwise it is due again in 2 days
//! - Incorrect answer: streak back to 0, due again in 1 day
//!
//! Review states keep their insertion order so due-word selection is
//! deterministic.

use crate::types::{correct_interval, incorrect_interval, truncate_to_seconds};
use crate::{
    ReviewState, Summary, Transition, VocabularyEntry, VocabularyStore, MASTERY_THRESHOLD,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    states: Vec<ReviewState>,
    index: HashMap<String, usize>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scheduler from loaded records; later duplicates of a word are dropped
    pub fn from_states(states: impl IntoIterator<Item = ReviewState>) -> Self {
        let mut scheduler = Self::new();
        for state in states {
            if scheduler.index.contains_key(&state.word) {
                tracing::debug!("Dropping duplicate progress record for {:?}", state.word);
                continue;
            }
            scheduler.push(state);
        }
        scheduler
    }

    fn push(&mut self, state: ReviewState) {
        self.index.insert(state.word.clone(), self.states.len());
        self.states.push(state);
    }

    /// Start tracking `word` with a fresh state, due at `now`
    ///
    /// Returns false if the word is already tracked.
    pub fn track(&mut self, word: &str, now: DateTime<Utc>) -> bool {
        if self.index.contains_key(word) {
            return false;
        }
        self.push(ReviewState::new(word, now));
        true
    }

    pub fn get(&self, word: &str) -> Option<&ReviewState> {
        self.index.get(word).map(|&i| &self.states[i])
    }

    /// States in insertion order
    pub fn states(&self) -> &[ReviewState] {
        &self.states
    }

    /// Apply one answer to `word`
    ///
    /// Returns `None` if the word is not tracked.
    pub fn record_outcome(
        &mut self,
        word: &str,
        is_correct: bool,
        now: DateTime<Utc>,
    ) -> Option<Transition> {
        let Some(&i) = self.index.get(word) else {
            tracing::debug!("Ignoring outcome for untracked word {:?}", word);
            return None;
        };
        let state = &mut self.states[i];

        if state.learned {
            return Some(Transition::AlreadyLearned);
        }

        let now = truncate_to_seconds(now);
        let transition = if is_correct {
            state.consecutive_correct = state.consecutive_correct.saturating_add(1);
            if state.consecutive_correct >= MASTERY_THRESHOLD {
                state.learned = true;
                tracing::info!("Word {:?} learned", word);
                Transition::Learned
            } else {
                state.next_review_at = now + correct_interval();
                Transition::Advanced {
                    streak: state.consecutive_correct,
                    next_review_at: state.next_review_at,
                }
            }
        } else {
            state.consecutive_correct = 0;
            state.next_review_at = now + incorrect_interval();
            Transition::Reset {
                next_review_at: state.next_review_at,
            }
        };

        tracing::debug!(
            "Recorded answer for {:?} (correct: {}): {:?}",
            word,
            is_correct,
            transition
        );
        Some(transition)
    }

    /// Up to `quota` due words, in insertion order
    ///
    /// Words whose entry is missing from `store` are skipped. A quota of
    /// zero or less selects nothing.
    pub fn select_due(
        &self,
        store: &VocabularyStore,
        quota: i64,
        now: DateTime<Utc>,
    ) -> Vec<VocabularyEntry> {
        let limit = usize::try_from(quota).unwrap_or(0);

        self.states
            .iter()
            .filter(|state| state.is_due(now))
            .filter_map(|state| store.get(&state.word))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Learned words joined against the store, in insertion order
    pub fn learned_entries(&self, store: &VocabularyStore) -> Vec<VocabularyEntry> {
        self.states
            .iter()
            .filter(|state| state.learned)
            .filter_map(|state| store.get(&state.word))
            .cloned()
            .collect()
    }

    /// Counts over states whose entry resolves in `store`
    pub fn summary(&self, store: &VocabularyStore, now: DateTime<Utc>) -> Summary {
        let mut summary = Summary::default();
        for state in self.states.iter().filter(|s| store.contains(&s.word)) {
            summary.total += 1;
            if state.learned {
                summary.learned += 1;
            } else {
                summary.active += 1;
                if state.is_due(now) {
                    summary.due += 1;
                }
            }
        }
        summary
    }
}
