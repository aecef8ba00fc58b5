//! Line codec for the pipe-delimited record files.
//!
//! Formats, one record per line:
//! - vocabulary / learned: `word|meaning` (split at the first `|`)
//! - progress: `word|consecutive_correct|next_review_at_secs|learned(0/1)`
//!
//! Parsing is all-or-nothing per line: a line that fails any field yields
//! `None` and the caller drops it.

use crate::{ReviewState, VocabularyEntry, MASTERY_THRESHOLD};
use chrono::DateTime;

const DELIMITER: char = '|';

/// Format a vocabulary (or learned export) record, without the newline
pub fn format_entry(entry: &VocabularyEntry) -> String {
    format!("{}{}{}", entry.word, DELIMITER, entry.meaning)
}

/// Parse a vocabulary record; the meaning is everything after the first `|`
pub fn parse_entry(line: &str) -> Option<VocabularyEntry> {
    let (word, meaning) = line.split_once(DELIMITER)?;
    Some(VocabularyEntry::new(word, meaning))
}

/// Format a progress record, without the newline
pub fn format_state(state: &ReviewState) -> String {
    format!(
        "{word}{d}{streak}{d}{at}{d}{learned}",
        word = state.word,
        streak = state.consecutive_correct,
        at = state.next_review_at.timestamp(),
        learned = u8::from(state.learned),
        d = DELIMITER,
    )
}

/// Parse a progress record
///
/// Requires exactly four fields, a non-negative streak, an integer
/// timestamp and a learned flag of `0` or `1`. A learned record always
/// carries at least the mastery streak.
pub fn parse_state(line: &str) -> Option<ReviewState> {
    let mut fields = line.split(DELIMITER);
    let word = fields.next()?;
    let streak = fields.next()?.parse::<u32>().ok()?;
    let secs = fields.next()?.parse::<i64>().ok()?;
    let learned = match fields.next()? {
        "0" => false,
        "1" => true,
        _ => return None,
    };
    if fields.next().is_some() {
        return None;
    }

    let streak = if learned {
        streak.max(MASTERY_THRESHOLD)
    } else {
        streak
    };

    Some(ReviewState {
        word: word.to_string(),
        consecutive_correct: streak,
        next_review_at: DateTime::from_timestamp(secs, 0)?,
        learned,
    })
}
