#![forbid(unsafe_code)]

//! Core domain model and business logic for the vocabulary recitation tool.
//!
//! This crate provides:
//! - Domain types (entries, review states, outcomes)
//! - Vocabulary store
//! - Spaced-repetition scheduler
//! - Review session protocol
//! - Persistence (line codec, file storage, config)

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod codec;
pub mod storage;
pub mod store;
pub mod scheduler;
pub mod session;
pub mod trainer;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{Config, DEFAULT_WORDS_PER_DAY};
pub use storage::{FileStorage, Storage};
pub use store::VocabularyStore;
pub use scheduler::Scheduler;
pub use session::{ReviewReport, Reviewer};
pub use trainer::Trainer;
