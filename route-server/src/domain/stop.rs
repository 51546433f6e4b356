//! Stop name type.

use std::borrow::Borrow;
use std::fmt;

/// Error returned when parsing an invalid stop name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop name: {reason}")]
pub struct InvalidStopName {
    reason: &'static str,
}

/// The name of a stop (station) in the transit network.
///
/// Names are stored trimmed and are never empty. This type guarantees
/// that any `StopName` value is valid by construction.
///
/// # Examples
///
/// ```
/// use route_server::domain::StopName;
///
/// let stop = StopName::parse("  Portal Norte ").unwrap();
/// assert_eq!(stop.as_str(), "Portal Norte");
///
/// // Blank names are rejected
/// assert!(StopName::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopName(String);

impl StopName {
    /// Parse a stop name, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStopName> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStopName {
                reason: "must not be empty",
            });
        }

        Ok(StopName(trimmed.to_string()))
    }

    /// Returns the stop name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Lets maps keyed by `StopName` be queried with a plain `&str`.
impl Borrow<str> for StopName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopName({})", self.0)
    }
}

impl fmt::Display for StopName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
