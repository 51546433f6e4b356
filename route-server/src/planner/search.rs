//! Transfer-penalised shortest-path search.
//!
//! A Dijkstra variant over the expanded state space of `(stop, arrival line)`
//! pairs. The arrival line matters because it decides whether the next edge
//! pays the transfer penalty, so the cheapest way into a stop on one line can
//! lose to a dearer arrival on another line once later changes are counted.
//!
//! The frontier uses lazy re-insertion: rediscovered states are pushed again
//! and stale entries are dropped when popped, so no decrease-key is needed.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace};

use crate::domain::{Hop, LineId, Path, Route, StopName};
use crate::network::Network;

use super::config::SearchConfig;

/// Error from a guarded route search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The caller raised the cancellation flag
    #[error("search cancelled")]
    Cancelled,

    /// The search settled more states than allowed
    #[error("search exceeded {limit} expanded states")]
    ExpansionLimit { limit: usize },

    /// The search did not finish within its time budget
    #[error("search timed out")]
    Timeout,

    /// The worker running the search failed
    #[error("search worker failed: {0}")]
    Worker(String),
}

/// Request for a route search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Stop the route starts from.
    pub origin: StopName,

    /// Stop the route must reach.
    pub destination: StopName,

    /// Penalty per line change; the planner's configured value when `None`.
    pub transfer_penalty: Option<u32>,
}

impl SearchRequest {
    /// Create a new search request using the configured transfer penalty.
    pub fn new(origin: StopName, destination: StopName) -> Self {
        Self {
            origin,
            destination,
            transfer_penalty: None,
        }
    }

    /// Override the transfer penalty for this request.
    pub fn with_transfer_penalty(mut self, penalty: u32) -> Self {
        self.transfer_penalty = Some(penalty);
        self
    }
}

/// Result of a route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The cheapest route, or `None` if the destination is unreachable.
    pub route: Option<Route>,

    /// Number of (stop, line) states settled during search.
    pub states_expanded: usize,
}

impl SearchResult {
    /// A result with no route.
    pub fn unreachable(states_expanded: usize) -> Self {
        Self {
            route: None,
            states_expanded,
        }
    }
}

/// Find the cheapest route from `origin` to `destination`.
///
/// Cost is the sum of edge times plus `transfer_penalty` whenever an edge's
/// line differs from the line of the edge before it. Returns `None` when no
/// route exists, including when either stop is unknown. Names are trimmed
/// before lookup. When `origin` and `destination` are the same stop the route
/// has cost 0 and a single stop.
///
/// # Examples
///
/// ```
/// use route_server::network::{Network, RawRecord};
/// use route_server::planner::search;
///
/// let network = Network::build([
///     RawRecord::new("A", "B", "5", "L1"),
///     RawRecord::new("B", "D", "3", "L2"),
/// ])
/// .unwrap();
///
/// let route = search(&network, "A", "D", 6).unwrap();
/// assert_eq!(route.total_minutes, 14);
/// ```
pub fn search(
    network: &Network,
    origin: &str,
    destination: &str,
    transfer_penalty: u32,
) -> Option<Route> {
    match explore(network, origin, destination, transfer_penalty, &mut Unbounded) {
        Ok(result) => result.route,
        Err(never) => match never {},
    }
}

/// Route planner bound to a network and configuration.
///
/// Unlike [`search`], the planner enforces the configured expansion budget
/// and can be cancelled from another thread.
pub struct Planner<'a> {
    network: &'a Network,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(network: &'a Network, config: &'a SearchConfig) -> Self {
        Self { network, config }
    }

    /// Search for the cheapest route.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        let never_cancelled = AtomicBool::new(false);
        self.search_with_cancel(request, &never_cancelled)
    }

    /// Search for the cheapest route, giving up once `cancel` is set.
    ///
    /// The flag is checked every time a state is popped from the frontier.
    pub fn search_with_cancel(
        &self,
        request: &SearchRequest,
        cancel: &AtomicBool,
    ) -> Result<SearchResult, SearchError> {
        let penalty = request
            .transfer_penalty
            .unwrap_or(self.config.transfer_penalty);

        let mut guard = Budgeted {
            max_expansions: self.config.max_expansions,
            cancel,
        };

        let result = explore(
            self.network,
            request.origin.as_str(),
            request.destination.as_str(),
            penalty,
            &mut guard,
        )?;

        debug!(
            origin = %request.origin,
            destination = %request.destination,
            penalty,
            found = result.route.is_some(),
            cost = result.route.as_ref().map(|r| r.total_minutes),
            states = result.states_expanded,
            "Route search complete"
        );

        Ok(result)
    }
}

/// Checked on every frontier pop; may abort the search.
trait Guard {
    type Error;

    fn on_pop(&mut self, states_expanded: usize) -> Result<(), Self::Error>;
}

/// Never aborts.
struct Unbounded;

impl Guard for Unbounded {
    type Error = Infallible;

    fn on_pop(&mut self, _states_expanded: usize) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Aborts on cancellation or once the expansion budget is spent.
struct Budgeted<'c> {
    max_expansions: usize,
    cancel: &'c AtomicBool,
}

impl Guard for Budgeted<'_> {
    type Error = SearchError;

    fn on_pop(&mut self, states_expanded: usize) -> Result<(), SearchError> {
        if self.cancel.load(Ordering::Relaxed) {
            return Err(SearchError::Cancelled);
        }
        if states_expanded >= self.max_expansions {
            return Err(SearchError::ExpansionLimit {
                limit: self.max_expansions,
            });
        }
        Ok(())
    }
}

/// Visitation key: a stop together with the line used to reach it.
/// `None` only for the origin before any edge is taken.
type StateKey<'n> = (&'n StopName, Option<&'n LineId>);

/// A discovered state. Index in the arena doubles as the insertion order.
#[derive(Clone, Copy)]
struct Node<'n> {
    stop: &'n StopName,
    /// Arrival line and the parent state's index; `None` for the origin.
    via: Option<(&'n LineId, usize)>,
}

impl<'n> Node<'n> {
    fn key(&self) -> StateKey<'n> {
        (self.stop, self.via.map(|(line, _)| line))
    }
}

fn explore<G: Guard>(
    network: &Network,
    origin: &str,
    destination: &str,
    transfer_penalty: u32,
    guard: &mut G,
) -> Result<SearchResult, G::Error> {
    let origin = origin.trim();
    let destination = destination.trim();

    if origin == destination {
        let route = network
            .stop(origin)
            .cloned()
            .or_else(|| StopName::parse(origin).ok())
            .map(|stop| Route {
                total_minutes: 0,
                path: Path::at(stop),
            });
        return Ok(SearchResult {
            route,
            states_expanded: 0,
        });
    }

    let Some(origin) = network.stop(origin) else {
        debug!(origin, "Unknown origin stop");
        return Ok(SearchResult::unreachable(0));
    };
    if !network.contains(destination) {
        debug!(destination, "Unknown destination stop");
        return Ok(SearchResult::unreachable(0));
    }

    let mut nodes = vec![Node {
        stop: origin,
        via: None,
    }];
    // Min-heap on (cost, insertion index): equal costs pop in discovery order.
    let mut frontier = BinaryHeap::from([Reverse((0u64, 0usize))]);
    let mut settled: HashSet<StateKey<'_>> = HashSet::new();

    while let Some(Reverse((cost, idx))) = frontier.pop() {
        guard.on_pop(settled.len())?;

        let node = nodes[idx];
        if !settled.insert(node.key()) {
            continue;
        }

        trace!(
            stop = %node.stop,
            line = ?node.via.map(|(line, _)| line.as_str()),
            cost,
            "Settled state"
        );

        if node.stop.as_str() == destination {
            return Ok(SearchResult {
                route: Some(Route {
                    total_minutes: cost,
                    path: reconstruct(&nodes, idx),
                }),
                states_expanded: settled.len(),
            });
        }

        let current_line = node.via.map(|(line, _)| line);
        for edge in network.neighbors(node.stop.as_str()) {
            if settled.contains(&(&edge.to, Some(&edge.line))) {
                continue;
            }

            let mut step = u64::from(edge.time);
            if current_line.is_some_and(|line| *line != edge.line) {
                step += u64::from(transfer_penalty);
            }

            nodes.push(Node {
                stop: &edge.to,
                via: Some((&edge.line, idx)),
            });
            frontier.push(Reverse((cost + step, nodes.len() - 1)));
        }
    }

    Ok(SearchResult::unreachable(settled.len()))
}

/// Walk parent links back to the origin and build the path.
fn reconstruct(nodes: &[Node<'_>], mut idx: usize) -> Path {
    let mut hops = Vec::new();

    loop {
        let node = nodes[idx];
        match node.via {
            Some((line, parent)) => {
                hops.push(Hop {
                    stop: node.stop.clone(),
                    line: line.clone(),
                });
                idx = parent;
            }
            None => {
                hops.reverse();
                return Path::new(node.stop.clone(), hops);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::RawRecord;

    fn stop(s: &str) -> StopName {
        StopName::parse(s).unwrap()
    }

    fn network(rows: &[(&str, &str, &str, &str)]) -> Network {
        Network::build(
            rows.iter()
                .map(|(a, b, t, l)| RawRecord::new(a, b, t, l)),
        )
        .unwrap()
    }

    /// A long chain so searches have plenty of states to settle.
    fn chain(len: usize) -> Network {
        let names: Vec<String> = (0..=len).map(|i| format!("S{i}")).collect();
        Network::build(
            names
                .windows(2)
                .map(|pair| RawRecord::new(&pair[0], &pair[1], "1", "L1")),
        )
        .unwrap()
    }

    #[test]
    fn planner_uses_configured_penalty() {
        let net = network(&[("A", "B", "5", "L1"), ("B", "D", "3", "L2")]);
        let config = SearchConfig::default();
        let planner = Planner::new(&net, &config);

        let result = planner
            .search(&SearchRequest::new(stop("A"), stop("D")))
            .unwrap();

        assert_eq!(result.route.unwrap().total_minutes, 14);
        assert!(result.states_expanded >= 3);
    }

    #[test]
    fn request_penalty_overrides_config() {
        let net = network(&[("A", "B", "5", "L1"), ("B", "D", "3", "L2")]);
        let config = SearchConfig::default();
        let planner = Planner::new(&net, &config);

        let request = SearchRequest::new(stop("A"), stop("D")).with_transfer_penalty(0);
        let result = planner.search(&request).unwrap();

        assert_eq!(result.route.unwrap().total_minutes, 8);
    }

    #[test]
    fn cancelled_before_start() {
        let net = chain(10);
        let config = SearchConfig::default();
        let planner = Planner::new(&net, &config);

        let cancel = AtomicBool::new(true);
        let result =
            planner.search_with_cancel(&SearchRequest::new(stop("S0"), stop("S10")), &cancel);

        assert_eq!(result, Err(SearchError::Cancelled));
    }

    #[test]
    fn cancelled_while_running() {
        let net = chain(200_000);
        let config = SearchConfig::default();
        let cancel = AtomicBool::new(false);
        let request = SearchRequest::new(stop("S0"), stop("S200000"));

        let result = std::thread::scope(|scope| {
            let worker =
                scope.spawn(|| Planner::new(&net, &config).search_with_cancel(&request, &cancel));
            cancel.store(true, Ordering::Relaxed);
            worker.join().unwrap()
        });

        assert_eq!(result, Err(SearchError::Cancelled));
    }

    #[test]
    fn expansion_limit_enforced() {
        let net = chain(50);
        let config = SearchConfig {
            max_expansions: 10,
            ..SearchConfig::default()
        };
        let planner = Planner::new(&net, &config);

        let result = planner.search(&SearchRequest::new(stop("S0"), stop("S50")));

        assert_eq!(result, Err(SearchError::ExpansionLimit { limit: 10 }));
    }

    #[test]
    fn expansion_limit_not_hit_for_short_route() {
        let net = chain(50);
        let config = SearchConfig {
            max_expansions: 10,
            ..SearchConfig::default()
        };
        let planner = Planner::new(&net, &config);

        let result = planner
            .search(&SearchRequest::new(stop("S0"), stop("S3")))
            .unwrap();

        assert_eq!(result.route.unwrap().total_minutes, 3);
    }

    #[test]
    fn unknown_stops_expand_nothing() {
        let net = chain(3);
        let config = SearchConfig::default();
        let planner = Planner::new(&net, &config);

        let result = planner
            .search(&SearchRequest::new(stop("S0"), stop("Nowhere")))
            .unwrap();
        assert_eq!(result, SearchResult::unreachable(0));

        let result = planner
            .search(&SearchRequest::new(stop("Nowhere"), stop("S0")))
            .unwrap();
        assert_eq!(result, SearchResult::unreachable(0));
    }

    #[test]
    fn same_stop_needs_no_expansion() {
        let net = chain(3);
        let config = SearchConfig {
            max_expansions: 0,
            ..SearchConfig::default()
        };
        let planner = Planner::new(&net, &config);

        let result = planner
            .search(&SearchRequest::new(stop("S1"), stop("S1")))
            .unwrap();

        let route = result.route.unwrap();
        assert_eq!(route.total_minutes, 0);
        assert_eq!(route.path, Path::at(stop("S1")));
    }

    #[test]
    fn error_display() {
        assert_eq!(SearchError::Cancelled.to_string(), "search cancelled");
        assert_eq!(
            SearchError::ExpansionLimit { limit: 5 }.to_string(),
            "search exceeded 5 expanded states"
        );
        assert_eq!(SearchError::Timeout.to_string(), "search timed out");
    }
}
