//! Path and route types produced by the planner.
//!
//! A `Path` is the sequence of stops visited from origin to destination,
//! each paired with the line that was ridden to arrive there. The origin
//! carries no line since no edge has been taken yet.

use super::{LineId, StopName};

/// One traversed edge of a path: the stop reached and the line used to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    /// Stop arrived at
    pub stop: StopName,
    /// Line ridden to arrive at `stop`
    pub line: LineId,
}

/// A path from origin to destination inclusive.
///
/// # Invariants
///
/// - Always contains at least the origin
/// - Every element after the origin was reached on a known line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    origin: StopName,
    hops: Vec<Hop>,
}

impl Path {
    /// A path that starts and ends at `origin` without moving.
    pub fn at(origin: StopName) -> Self {
        Self {
            origin,
            hops: Vec::new(),
        }
    }

    /// Build a path from its origin and the hops taken after it.
    pub fn new(origin: StopName, hops: Vec<Hop>) -> Self {
        Self { origin, hops }
    }

    /// The first stop of the path.
    pub fn origin(&self) -> &StopName {
        &self.origin
    }

    /// The last stop of the path.
    pub fn destination(&self) -> &StopName {
        self.hops.last().map_or(&self.origin, |hop| &hop.stop)
    }

    /// The hops taken after leaving the origin.
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// Number of stops in the path, origin included.
    pub fn len(&self) -> usize {
        self.hops.len() + 1
    }

    /// Always false; a path holds at least its origin.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate `(stop, arrival line)` pairs from origin to destination.
    ///
    /// The origin is yielded with `None`.
    pub fn steps(&self) -> impl Iterator<Item = (&StopName, Option<&LineId>)> {
        std::iter::once((&self.origin, None))
            .chain(self.hops.iter().map(|hop| (&hop.stop, Some(&hop.line))))
    }

    /// Iterate the stops visited, origin first.
    pub fn stops(&self) -> impl Iterator<Item = &StopName> {
        self.steps().map(|(stop, _)| stop)
    }

    /// Number of line changes along the path.
    pub fn transfer_count(&self) -> usize {
        self.hops
            .windows(2)
            .filter(|pair| pair[0].line != pair[1].line)
            .count()
    }
}

/// The winning result of a search: its total cost and the path taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Travel time plus transfer penalties, in minutes.
    pub total_minutes: u64,
    /// Stops visited from origin to destination.
    pub path: Path,
}
