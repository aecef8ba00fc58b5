//! Record file persistence with file locking.
//!
//! Each record file is read in full under a shared lock and rewritten in
//! full through a temp file that is renamed over the original. Writers are
//! not serialized against each other: the last rename wins.

use crate::codec::{format_entry, format_state, parse_entry, parse_state};
use crate::{Error, Result, ReviewState, VocabularyEntry};
use fs2::FileExt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const VOCABULARY_FILE: &str = "vocabulary.txt";
pub const PROGRESS_FILE: &str = "progress.txt";
pub const LEARNED_FILE: &str = "learned.txt";

/// Load/save interface for the vocabulary and progress records
pub trait Storage {
    fn load_vocabulary(&self) -> Result<Vec<VocabularyEntry>>;
    fn save_vocabulary(&mut self, entries: &[VocabularyEntry]) -> Result<()>;
    fn load_progress(&self) -> Result<Vec<ReviewState>>;
    fn save_progress(&mut self, states: &[ReviewState]) -> Result<()>;
    /// Replace the learned-words export
    fn save_learned(&mut self, entries: &[VocabularyEntry]) -> Result<()>;
}

/// Flat-file storage rooted at a data directory
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a storage for the given data directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn vocabulary_path(&self) -> PathBuf {
        self.dir.join(VOCABULARY_FILE)
    }

    pub fn progress_path(&self) -> PathBuf {
        self.dir.join(PROGRESS_FILE)
    }

    pub fn learned_path(&self) -> PathBuf {
        self.dir.join(LEARNED_FILE)
    }
}

impl Storage for FileStorage {
    fn load_vocabulary(&self) -> Result<Vec<VocabularyEntry>> {
        read_records(&self.vocabulary_path(), parse_entry)
    }

    fn save_vocabulary(&mut self, entries: &[VocabularyEntry]) -> Result<()> {
        write_records(&self.vocabulary_path(), entries.iter().map(format_entry))
    }

    fn load_progress(&self) -> Result<Vec<ReviewState>> {
        read_records(&self.progress_path(), parse_state)
    }

    fn save_progress(&mut self, states: &[ReviewState]) -> Result<()> {
        write_records(&self.progress_path(), states.iter().map(format_state))
    }

    fn save_learned(&mut self, entries: &[VocabularyEntry]) -> Result<()> {
        write_records(&self.learned_path(), entries.iter().map(format_entry))
    }
}

/// Read every parseable record from `path`
///
/// A missing file is an empty record set. Lines that fail to parse are
/// skipped.
pub fn read_records<T>(path: &Path, parse: impl Fn(&str) -> Option<T>) -> Result<Vec<T>> {
    if !path.exists() {
        tracing::debug!("No record file at {:?}, starting empty", path);
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    // Acquire shared lock for reading
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut records = Vec::new();

    // Split on raw bytes so a line that is not UTF-8 is skipped like any
    // other malformed line instead of failing the whole read
    for (line_num, line_result) in reader.split(b'\n').enumerate() {
        let mut bytes = line_result?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }

        match std::str::from_utf8(&bytes).ok().and_then(&parse) {
            Some(record) => records.push(record),
            None => tracing::debug!("Skipping malformed line {} in {:?}", line_num + 1, path),
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}

/// Replace `path` with the given lines
///
/// Atomically writes by:
/// 1. Writing to a temp file in the same directory
/// 2. Syncing to disk
/// 3. Renaming over the original
pub fn write_records<I>(path: &Path, lines: I) -> Result<()>
where
    I: IntoIterator<Item = String>,
{
    let parent = path
        .parent()
        .ok_or_else(|| Error::Other(format!("record path {:?} has no parent", path)))?;
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;

    let mut count = 0usize;
    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        for line in lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
            count += 1;
        }
        writer.flush()?;
    }

    temp.as_file().sync_all()?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Wrote {} records to {:?}", count, path);
    Ok(())
}
