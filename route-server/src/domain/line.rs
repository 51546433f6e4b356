//! Transit line identifier type.

use std::fmt;

/// Error returned when parsing an invalid line identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line identifier: {reason}")]
pub struct InvalidLineId {
    reason: &'static str,
}

/// Identifier of a transit line (e.g. "B23", "K10", "L1").
///
/// Stored trimmed and never empty. Two edges are on the same line exactly
/// when their identifiers compare equal.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(String);

impl LineId {
    /// Parse a line identifier, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidLineId> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidLineId {
                reason: "must not be empty",
            });
        }

        Ok(LineId(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
