//! Review session protocol.
//!
//! For each selected word, strictly one at a time:
//! 1. Present the word alone and ask whether the user knows it
//! 2. Reveal the meaning either way
//! 3. If the user claimed to know it, ask them to confirm they were right
//!
//! The answer counts as correct only when both questions are affirmed.

use crate::{Result, Scheduler, Transition, VocabularyEntry};
use chrono::{DateTime, Utc};

/// The party answering review prompts
///
/// Every call blocks until the answer is available.
pub trait Reviewer {
    /// Called once before the first word with the batch size
    fn begin(&mut self, _count: usize) -> Result<()> {
        Ok(())
    }

    /// Show `word` without its meaning; true if the user claims to know it
    fn knows(&mut self, word: &str) -> Result<bool>;

    /// Show the meaning of the current word
    fn reveal(&mut self, entry: &VocabularyEntry) -> Result<()>;

    /// After the reveal: true if the user's recollection was correct
    fn confirm(&mut self, entry: &VocabularyEntry) -> Result<bool>;

    /// The word has just reached mastery
    fn learned(&mut self, word: &str) -> Result<()>;
}

/// What happened during one review batch
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReviewReport {
    pub reviewed: usize,
    pub correct: usize,
    /// Words that reached mastery in this batch
    pub learned: Vec<String>,
}

impl ReviewReport {
    /// True when nothing was due
    pub fn is_empty(&self) -> bool {
        self.reviewed == 0
    }
}

/// Ask the reviewer about each entry and record the outcomes
pub fn run_review<R: Reviewer + ?Sized>(
    scheduler: &mut Scheduler,
    batch: &[VocabularyEntry],
    reviewer: &mut R,
    now: DateTime<Utc>,
) -> Result<ReviewReport> {
    let mut report = ReviewReport::default();
    if batch.is_empty() {
        return Ok(report);
    }

    reviewer.begin(batch.len())?;

    for entry in batch {
        let claims_known = reviewer.knows(&entry.word)?;
        reviewer.reveal(entry)?;
        let is_correct = claims_known && reviewer.confirm(entry)?;

        report.reviewed += 1;
        if is_correct {
            report.correct += 1;
        }

        if let Some(Transition::Learned) = scheduler.record_outcome(&entry.word, is_correct, now) {
            reviewer.learned(&entry.word)?;
            report.learned.push(entry.word.clone());
        }
    }

    tracing::info!(
        "Reviewed {} words ({} correct, {} learned)",
        report.reviewed,
        report.correct,
        report.learned.len()
    );
    Ok(report)
}

#[cfg(test)]
pub(crate) mod scripted {
    //! Reviewer that replays canned answers.

    use super::Reviewer;
    use crate::{Result, VocabularyEntry};
    use std::collections::VecDeque;

    #[derive(Default)]
    pub struct ScriptedReviewer {
        answers: VecDeque<bool>,
        pub shown: Vec<String>,
        pub revealed: Vec<String>,
        pub congratulated: Vec<String>,
        pub batch_sizes: Vec<usize>,
    }

    impl ScriptedReviewer {
        pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
            Self {
                answers: answers.into_iter().collect(),
                ..Self::default()
            }
        }

        /// Answer yes to both questions for `n` words
        pub fn all_correct(n: usize) -> Self {
            Self::new(std::iter::repeat(true).take(n * 2))
        }

        fn next(&mut self) -> bool {
            self.answers.pop_front().unwrap_or(false)
        }
    }

    impl Reviewer for ScriptedReviewer {
        fn begin(&mut self, count: usize) -> Result<()> {
            self.batch_sizes.push(count);
            Ok(())
        }

        fn knows(&mut self, word: &str) -> Result<bool> {
            self.shown.push(word.to_string());
            Ok(self.next())
        }

        fn reveal(&mut self, entry: &VocabularyEntry) -> Result<()> {
            self.revealed.push(entry.meaning.clone());
            Ok(())
        }

        fn confirm(&mut self, _entry: &VocabularyEntry) -> Result<bool> {
            Ok(self.next())
        }

        fn learned(&mut self, word: &str) -> Result<()> {
            self.congratulated.push(word.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::scripted::ScriptedReviewer;
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    fn batch(words: &[&str]) -> (Scheduler, Vec<VocabularyEntry>) {
        let mut scheduler = Scheduler::new();
        let mut entries = Vec::new();
        for word in words {
            scheduler.track(word, now());
            entries.push(VocabularyEntry::new(*word, format!("meaning of {}", word)));
        }
        (scheduler, entries)
    }

    #[test]
    fn test_unknown_word_is_incorrect_but_revealed() {
        let (mut scheduler, entries) = batch(&["run"]);
        let mut reviewer = ScriptedReviewer::new([false]);

        let report = run_review(&mut scheduler, &entries, &mut reviewer, now()).unwrap();

        assert_eq!(report.reviewed, 1);
        assert_eq!(report.correct, 0);
        assert_eq!(reviewer.revealed, vec!["meaning of run"]);
        assert_eq!(
            scheduler.get("run").unwrap().next_review_at,
            now() + Duration::days(1)
        );
    }

    #[test]
    fn test_claimed_but_wrong_is_incorrect() {
        let (mut scheduler, entries) = batch(&["run"]);
        scheduler.record_outcome("run", true, now() - Duration::days(2));
        let mut reviewer = ScriptedReviewer::new([true, false]);

        let report = run_review(&mut scheduler, &entries, &mut reviewer, now()).unwrap();

        assert_eq!(report.correct, 0);
        assert_eq!(scheduler.get("run").unwrap().consecutive_correct, 0);
    }

    #[test]
    fn test_confirmed_answer_is_correct() {
        let (mut scheduler, entries) = batch(&["run", "walk"]);
        let mut reviewer = ScriptedReviewer::new([true, true, false]);

        let report = run_review(&mut scheduler, &entries, &mut reviewer, now()).unwrap();

        assert_eq!(reviewer.shown, vec!["run", "walk"]);
        assert_eq!(reviewer.batch_sizes, vec![2]);
        assert_eq!(report.reviewed, 2);
        assert_eq!(report.correct, 1);
        assert_eq!(scheduler.get("run").unwrap().consecutive_correct, 1);
        assert_eq!(scheduler.get("walk").unwrap().consecutive_correct, 0);
    }

    #[test]
    fn test_mastery_congratulates_once() {
        let (mut scheduler, entries) = batch(&["run"]);
        scheduler.record_outcome("run", true, now());
        scheduler.record_outcome("run", true, now());
        let mut reviewer = ScriptedReviewer::all_correct(1);

        let report = run_review(&mut scheduler, &entries, &mut reviewer, now()).unwrap();

        assert_eq!(report.learned, vec!["run"]);
        assert_eq!(reviewer.congratulated, vec!["run"]);
    }

    #[test]
    fn test_empty_batch_does_not_prompt() {
        let (mut scheduler, _) = batch(&[]);
        let mut reviewer = ScriptedReviewer::all_correct(1);

        let report = run_review(&mut scheduler, &[], &mut reviewer, now()).unwrap();

        assert!(report.is_empty());
        assert!(reviewer.batch_sizes.is_empty());
        assert!(reviewer.shown.is_empty());
    }
}
