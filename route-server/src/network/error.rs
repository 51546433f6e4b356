//! Network ingestion error types.

use std::fmt;

/// What was wrong with a rejected record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    /// A required column was missing or blank after trimming
    EmptyField(&'static str),
    /// The time column was not a non-negative integer
    InvalidTime(String),
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::EmptyField(field) => write!(f, "field `{field}` is empty"),
            MalformedReason::InvalidTime(raw) => {
                write!(f, "time {raw:?} is not a non-negative integer")
            }
        }
    }
}

/// A connection record that could not be turned into a network edge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed record {record}: {reason}")]
pub struct MalformedRecordError {
    /// Zero-based index of the record in its source
    pub record: usize,
    /// Why the record was rejected
    pub reason: MalformedReason,
}

/// Errors that can occur while loading a network from CSV.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source could not be opened or read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV itself could not be decoded
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record was rejected and the load policy is to abort
    #[error(transparent)]
    Malformed(#[from] MalformedRecordError),
}
