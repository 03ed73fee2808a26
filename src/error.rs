//! Error types.
//!
//! Malformed input text is never an error here: the grammars report a miss as
//! `None` and the scanner simply moves on. The variants below are for callers
//! that hand the crate a value it cannot work with.

use crate::RuleSystem;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// A check carries a per-skill adjustment list whose length differs from
    /// its skill list.
    #[error("adjustment count ({adjustments}) must match skill count ({skills})")]
    AdjustmentMismatch { adjustments: usize, skills: usize },

    /// A modern check must name at least one skill. Conversion can empty a
    /// skill list (Lore excluded, unmapped skills dropped).
    #[error("a check needs at least one skill")]
    EmptySkills,

    #[error("difficulty class {0} is out of range")]
    DifficultyOutOfRange(i32),

    #[error("invalid level {0} (expected 1..=20)")]
    InvalidLevel(i32),

    #[error("cannot {operation} a {system} check")]
    UnsupportedSystem { operation: &'static str, system: RuleSystem },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("empty keys cannot be stored")]
    EmptyKey,
}

pub type Result<T> = std::result::Result<T, CheckError>;
