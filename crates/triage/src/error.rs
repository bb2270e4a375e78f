//! Error types for classification and registry persistence

use std::io;

use thiserror::Error;

/// A manual count decision could not be obtained
#[derive(Debug, Error)]
pub enum DecisionError {
    /// Input ended before a recognizable answer was given
    #[error("Input closed before an answer was given")]
    InputClosed,

    #[error("I/O error while asking for a decision: {0}")]
    Io(#[from] io::Error),
}

/// A persisted open-inquiry file is not in the expected shape
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// A thread id line has no subject line after it
    #[error("Line {line}: thread id without a subject line")]
    DanglingId { line: usize },

    /// A legacy record is shorter than its format requires
    #[error("Line {line}: incomplete record, expected {expected} lines")]
    IncompleteRecord { line: usize, expected: usize },

    /// A thread id is not a number in the expected base
    #[error("Line {line}: invalid thread id {value:?}")]
    InvalidThreadId { line: usize, value: String },
}

/// Errors from an open-inquiry store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),
}
