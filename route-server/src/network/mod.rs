//! Transit network model and ingestion.
//!
//! The network is an undirected multigraph: stops are vertices, and each
//! connection is an edge labelled with a traversal time and a line. It is
//! built once from connection records and never mutated afterwards.

mod error;
mod graph;
mod load;
mod record;

pub use error::{LoadError, MalformedReason, MalformedRecordError};
pub use graph::{Edge, Network, NetworkBuilder};
pub use load::{LoadPolicy, LoadReport, load_csv, load_csv_path};
pub use record::{Connection, RawRecord};
