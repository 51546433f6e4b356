//! Raw and validated connection records.

use serde::Deserialize;

use crate::domain::{LineId, StopName};

use super::error::{MalformedReason, MalformedRecordError};

/// A connection row as read from the source, before validation.
///
/// Every column is optional so that short or blank rows surface as a
/// `MalformedRecordError` rather than a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub line: Option<String>,
}

impl RawRecord {
    /// Convenience constructor for in-memory records.
    pub fn new(from: &str, to: &str, time: &str, line: &str) -> Self {
        Self {
            from: Some(from.to_string()),
            to: Some(to.to_string()),
            time: Some(time.to_string()),
            line: Some(line.to_string()),
        }
    }
}

/// A validated, undirected connection between two stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub from: StopName,
    pub to: StopName,
    /// Traversal time in minutes
    pub time: u32,
    pub line: LineId,
}

impl Connection {
    /// Validate a raw record.
    ///
    /// `record` is the record's position in its source and is only used
    /// for error reporting.
    pub fn parse(raw: &RawRecord, record: usize) -> Result<Self, MalformedRecordError> {
        let malformed = |reason| MalformedRecordError { record, reason };

        let from = required(&raw.from)
            .and_then(|s| StopName::parse(s).ok())
            .ok_or_else(|| malformed(MalformedReason::EmptyField("from")))?;
        let to = required(&raw.to)
            .and_then(|s| StopName::parse(s).ok())
            .ok_or_else(|| malformed(MalformedReason::EmptyField("to")))?;
        let time_raw =
            required(&raw.time).ok_or_else(|| malformed(MalformedReason::EmptyField("time")))?;
        let time = time_raw
            .parse::<u32>()
            .map_err(|_| malformed(MalformedReason::InvalidTime(time_raw.to_string())))?;
        let line = required(&raw.line)
            .and_then(|s| LineId::parse(s).ok())
            .ok_or_else(|| malformed(MalformedReason::EmptyField("line")))?;

        Ok(Self {
            from,
            to,
            time,
            line,
        })
    }
}

/// Returns the trimmed field, or `None` if it is absent or blank.
fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_record() {
        let raw = RawRecord::new(" Portal Norte ", "Toberín", " 4 ", "B74");
        let conn = Connection::parse(&raw, 0).unwrap();

        assert_eq!(conn.from.as_str(), "Portal Norte");
        assert_eq!(conn.to.as_str(), "Toberín");
        assert_eq!(conn.time, 4);
        assert_eq!(conn.line.as_str(), "B74");
    }

    #[test]
    fn zero_time_is_allowed() {
        let raw = RawRecord::new("A", "B", "0", "L1");
        assert_eq!(Connection::parse(&raw, 0).unwrap().time, 0);
    }

    #[test]
    fn rejects_negative_time() {
        let raw = RawRecord::new("A", "B", "-3", "L1");
        let err = Connection::parse(&raw, 5).unwrap_err();
        assert_eq!(err.record, 5);
        assert_eq!(err.reason, MalformedReason::InvalidTime("-3".into()));
    }

    #[test]
    fn rejects_non_integer_time() {
        for bad in ["2.5", "ten", "1e3", "0x10"] {
            let raw = RawRecord::new("A", "B", bad, "L1");
            let err = Connection::parse(&raw, 0).unwrap_err();
            assert!(
                matches!(err.reason, MalformedReason::InvalidTime(_)),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_blank_fields() {
        let cases = [
            (RawRecord::new("  ", "B", "1", "L1"), "from"),
            (RawRecord::new("A", "", "1", "L1"), "to"),
            (RawRecord::new("A", "B", " ", "L1"), "time"),
            (RawRecord::new("A", "B", "1", "\t"), "line"),
        ];

        for (raw, field) in cases {
            let err = Connection::parse(&raw, 0).unwrap_err();
            assert_eq!(err.reason, MalformedReason::EmptyField(field));
        }
    }

    #[test]
    fn rejects_missing_fields() {
        let raw = RawRecord {
            from: Some("A".into()),
            to: Some("B".into()),
            ..RawRecord::default()
        };
        let err = Connection::parse(&raw, 0).unwrap_err();
        assert_eq!(err.reason, MalformedReason::EmptyField("time"));
    }
}
