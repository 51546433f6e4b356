//! CSV ingestion of the network definition.
//!
//! The source is a CSV file with a header row naming the columns
//! `from`, `to`, `time` and `line`. Column order does not matter and
//! extra columns are ignored.

use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use super::error::LoadError;
use super::graph::{Network, NetworkBuilder};
use super::record::{Connection, RawRecord};

/// What to do when a record fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Fail the whole load on the first malformed record.
    #[default]
    Abort,
    /// Log the malformed record and carry on without it.
    SkipAndWarn,
}

/// Summary of a completed load.
#[derive(Debug)]
pub struct LoadReport {
    /// The loaded network
    pub network: Network,
    /// Records that became connections
    pub accepted: usize,
    /// Records skipped under `LoadPolicy::SkipAndWarn`
    pub skipped: usize,
}

/// Load a network from a CSV file on disk.
pub fn load_csv_path(path: impl AsRef<Path>, policy: LoadPolicy) -> Result<LoadReport, LoadError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let report = load_csv(file, policy)?;

    info!(
        path = %path.display(),
        stops = report.network.stop_count(),
        connections = report.accepted,
        skipped = report.skipped,
        "Loaded network"
    );

    Ok(report)
}

/// Load a network from any CSV reader.
pub fn load_csv<R: Read>(reader: R, policy: LoadPolicy) -> Result<LoadReport, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut builder = NetworkBuilder::new();
    let mut accepted = 0;
    let mut skipped = 0;

    for (idx, row) in csv_reader.deserialize::<RawRecord>().enumerate() {
        let raw = row?;
        match Connection::parse(&raw, idx) {
            Ok(connection) => {
                builder.connect(connection);
                accepted += 1;
            }
            Err(e) => match policy {
                LoadPolicy::Abort => return Err(e.into()),
                LoadPolicy::SkipAndWarn => {
                    warn!(record = idx, error = %e, "Skipping malformed record");
                    skipped += 1;
                }
            },
        }
    }

    Ok(LoadReport {
        network: builder.build(),
        accepted,
        skipped,
    })
}
