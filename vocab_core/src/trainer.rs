//! Trainer: the caller-facing operations over store, scheduler and storage.
//!
//! State is loaded in full when the trainer opens and written back in full
//! after every mutation: vocabulary + progress on add, progress once per
//! review batch. The learned-words export is regenerated with every
//! progress save.

use crate::session::{run_review, ReviewReport, Reviewer};
use crate::{
    AddOutcome, Result, Scheduler, Storage, Summary, VocabularyEntry, VocabularyStore,
};
use chrono::{DateTime, Utc};

pub struct Trainer<S: Storage> {
    storage: S,
    store: VocabularyStore,
    scheduler: Scheduler,
    words_per_day: i64,
}

impl<S: Storage> Trainer<S> {
    /// Load all state from `storage`
    pub fn open(storage: S, words_per_day: i64) -> Result<Self> {
        Self::open_at(storage, words_per_day, Utc::now())
    }

    /// Load all state from `storage`; entries missing a review state get a
    /// fresh one due at `now`
    pub fn open_at(storage: S, words_per_day: i64, now: DateTime<Utc>) -> Result<Self> {
        let store = VocabularyStore::from_entries(storage.load_vocabulary()?);
        let mut scheduler = Scheduler::from_states(storage.load_progress()?);

        for entry in store.entries() {
            if scheduler.track(&entry.word, now) {
                tracing::warn!("No progress record for {:?}, starting fresh", entry.word);
            }
        }

        tracing::info!(
            "Loaded {} words ({} progress records)",
            store.len(),
            scheduler.states().len()
        );

        Ok(Self {
            storage,
            store,
            scheduler,
            words_per_day,
        })
    }

    /// Add a new word; an existing word is left untouched
    pub fn add_word(&mut self, word: &str, meaning: &str) -> Result<AddOutcome> {
        self.add_word_at(word, meaning, Utc::now())
    }

    pub fn add_word_at(
        &mut self,
        word: &str,
        meaning: &str,
        now: DateTime<Utc>,
    ) -> Result<AddOutcome> {
        if self.store.add(word, meaning) == AddOutcome::AlreadyExists {
            tracing::info!("Word {:?} already exists", word);
            return Ok(AddOutcome::AlreadyExists);
        }
        self.scheduler.track(word, now);

        self.storage.save_vocabulary(self.store.entries())?;
        self.save_progress()?;

        tracing::info!("Added word {:?}", word);
        Ok(AddOutcome::Added)
    }

    /// Run a review session over the due words
    ///
    /// `count` overrides the daily quota when it is positive.
    pub fn recite<R: Reviewer + ?Sized>(
        &mut self,
        count: Option<i64>,
        reviewer: &mut R,
    ) -> Result<ReviewReport> {
        self.recite_at(count, reviewer, Utc::now())
    }

    pub fn recite_at<R: Reviewer + ?Sized>(
        &mut self,
        count: Option<i64>,
        reviewer: &mut R,
        now: DateTime<Utc>,
    ) -> Result<ReviewReport> {
        let quota = self.quota_for(count);
        let batch = self.select_due(quota, now);

        if batch.is_empty() {
            tracing::info!("No words due (quota {})", quota);
            return Ok(ReviewReport::default());
        }

        let report = run_review(&mut self.scheduler, &batch, reviewer, now)?;
        self.save_progress()?;
        Ok(report)
    }

    /// Quota for one session: a positive `count`, else the daily quota
    pub fn quota_for(&self, count: Option<i64>) -> i64 {
        match count {
            Some(n) if n > 0 => n,
            _ => self.words_per_day,
        }
    }

    /// Up to `quota` due words, in the order they were added
    pub fn select_due(&self, quota: i64, now: DateTime<Utc>) -> Vec<VocabularyEntry> {
        self.scheduler.select_due(&self.store, quota, now)
    }

    /// Replace the daily quota; any value is accepted
    pub fn set_words_per_day(&mut self, count: i64) {
        self.words_per_day = count;
        tracing::info!("Daily word count set to {}", count);
    }

    pub fn words_per_day(&self) -> i64 {
        self.words_per_day
    }

    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.store.lookup(word)
    }

    pub fn store(&self) -> &VocabularyStore {
        &self.store
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn learned_words(&self) -> Vec<VocabularyEntry> {
        self.scheduler.learned_entries(&self.store)
    }

    pub fn summary(&self, now: DateTime<Utc>) -> Summary {
        self.scheduler.summary(&self.store, now)
    }

    fn save_progress(&mut self) -> Result<()> {
        self.storage.save_progress(self.scheduler.states())?;
        let learned = self.learned_words();
        self.storage.save_learned(&learned)
    }
}
