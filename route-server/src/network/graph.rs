//! The transit network graph.

use std::collections::{BTreeSet, HashMap};

use crate::domain::{LineId, StopName};

use super::error::MalformedRecordError;
use super::record::{Connection, RawRecord};

/// A directed traversal from one stop to a neighbour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Stop reached by this edge
    pub to: StopName,
    /// Traversal time in minutes
    pub time: u32,
    /// Line this edge belongs to
    pub line: LineId,
}

/// An undirected, line-labelled multigraph of stops.
///
/// Every connection is stored in both directions with the same time and
/// line, so if `a → b` exists then `b → a` exists too. The network is
/// immutable once built and can be shared freely between searches.
#[derive(Debug, Clone, Default)]
pub struct Network {
    adjacency: HashMap<StopName, Vec<Edge>>,
    edge_count: usize,
}

impl Network {
    /// Build a network from raw records, validating each one.
    ///
    /// Fails on the first malformed record.
    pub fn build<I>(records: I) -> Result<Self, MalformedRecordError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut builder = NetworkBuilder::new();
        for (idx, raw) in records.into_iter().enumerate() {
            builder.connect(Connection::parse(&raw, idx)?);
        }
        Ok(builder.build())
    }

    /// Outgoing edges of a stop.
    ///
    /// Unknown stops have no edges; this is not an error.
    pub fn neighbors(&self, stop: &str) -> &[Edge] {
        self.adjacency
            .get(stop)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the network's own copy of a stop name, if the stop is known.
    pub fn stop(&self, name: &str) -> Option<&StopName> {
        self.adjacency.get_key_value(name).map(|(stop, _)| stop)
    }

    /// Whether the stop appears in any connection.
    pub fn contains(&self, stop: &str) -> bool {
        self.adjacency.contains_key(stop)
    }

    /// All stops, sorted by name.
    pub fn stops(&self) -> Vec<&StopName> {
        let mut stops: Vec<&StopName> = self.adjacency.keys().collect();
        stops.sort();
        stops
    }

    /// All distinct line identifiers, sorted.
    pub fn lines(&self) -> BTreeSet<&LineId> {
        self.adjacency
            .values()
            .flatten()
            .map(|edge| &edge.line)
            .collect()
    }

    /// Number of distinct stops.
    pub fn stop_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges (twice the number of connections).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns true if the network has no stops.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

/// Incremental builder for a `Network`.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    inner: Network,
}

impl NetworkBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection in both directions.
    pub fn connect(&mut self, connection: Connection) -> &mut Self {
        let Connection {
            from,
            to,
            time,
            line,
        } = connection;

        self.inner
            .adjacency
            .entry(to.clone())
            .or_default()
            .push(Edge {
                to: from.clone(),
                time,
                line: line.clone(),
            });
        self.inner
            .adjacency
            .entry(from)
            .or_default()
            .push(Edge { to, time, line });
        self.inner.edge_count += 2;
        self
    }

    /// Number of directed edges added so far.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count
    }

    /// Finish building.
    pub fn build(self) -> Network {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::MalformedReason;

    fn sample() -> Network {
        Network::build([
            RawRecord::new("A", "B", "5", "L1"),
            RawRecord::new("B", "C", "5", "L1"),
            RawRecord::new("B", "D", "3", "L2"),
        ])
        .unwrap()
    }

    fn has_edge(net: &Network, from: &str, to: &str, time: u32, line: &str) -> bool {
        net.neighbors(from)
            .iter()
            .any(|e| e.to.as_str() == to && e.time == time && e.line.as_str() == line)
    }

    #[test]
    fn stores_both_directions() {
        let net = sample();

        assert!(has_edge(&net, "A", "B", 5, "L1"));
        assert!(has_edge(&net, "B", "A", 5, "L1"));
        assert!(has_edge(&net, "B", "D", 3, "L2"));
        assert!(has_edge(&net, "D", "B", 3, "L2"));

        assert_eq!(net.neighbors("B").len(), 3);
        assert_eq!(net.edge_count(), 6);
        assert_eq!(net.stop_count(), 4);
    }

    #[test]
    fn unknown_stop_has_no_neighbors() {
        let net = sample();
        assert!(net.neighbors("E").is_empty());
        assert!(!net.contains("E"));
        assert!(net.stop("E").is_none());
    }

    #[test]
    fn parallel_connections_are_kept() {
        let net = Network::build([
            RawRecord::new("A", "B", "5", "L1"),
            RawRecord::new("A", "B", "7", "L2"),
        ])
        .unwrap();

        assert_eq!(net.neighbors("A").len(), 2);
        assert_eq!(net.neighbors("B").len(), 2);
    }

    #[test]
    fn stops_and_lines_sorted() {
        let net = sample();
        let stops: Vec<&str> = net.stops().into_iter().map(StopName::as_str).collect();
        assert_eq!(stops, vec!["A", "B", "C", "D"]);

        let lines: Vec<&str> = net.lines().into_iter().map(LineId::as_str).collect();
        assert_eq!(lines, vec!["L1", "L2"]);
    }

    #[test]
    fn names_are_trimmed_on_build() {
        let net = Network::build([RawRecord::new(" A ", "B  ", "1", " L1")]).unwrap();
        assert!(net.contains("A"));
        assert!(net.contains("B"));
        assert!(has_edge(&net, "A", "B", 1, "L1"));
    }

    #[test]
    fn build_fails_on_malformed_record() {
        let err = Network::build([
            RawRecord::new("A", "B", "5", "L1"),
            RawRecord::new("B", "C", "x", "L1"),
        ])
        .unwrap_err();

        assert_eq!(err.record, 1);
        assert_eq!(err.reason, MalformedReason::InvalidTime("x".into()));
    }

    #[test]
    fn empty_network() {
        let net = Network::build(Vec::<RawRecord>::new()).unwrap();
        assert!(net.is_empty());
        assert_eq!(net.edge_count(), 0);
        assert!(net.lines().is_empty());
    }

    #[test]
    fn builder_counts_edges() {
        let mut builder = NetworkBuilder::new();
        builder.connect(Connection::parse(&RawRecord::new("A", "B", "1", "L1"), 0).unwrap());
        assert_eq!(builder.edge_count(), 2);
        assert_eq!(builder.build().stop_count(), 2);
    }
}
