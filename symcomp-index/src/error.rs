//! Error types for index validation and symmetry declarations

use thiserror::Error;

/// Errors raised while validating index tuples or symmetry declarations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// The index tuple does not carry one value per slot
    #[error("Wrong number of indices: {expected} expected, while {found} are provided")]
    WrongIndexCount { expected: usize, found: usize },

    /// An index value falls outside `start..end`
    #[error("Index out of range: {index} not in [{start},{end})")]
    IndexOutOfRange {
        index: usize,
        start: usize,
        end: usize,
    },

    /// Overlapping groups, a group shorter than two positions,
    /// or a position outside `[0, nid - 1]`
    #[error("Invalid symmetry specification: {reason}")]
    InvalidSymmetrySpec { reason: String },

    /// The textual symmetry notation could not be parsed
    #[error("Invalid symmetry notation: {0}")]
    InvalidSyntax(String),
}

pub type Result<T> = std::result::Result<T, IndexError>;
