//! Route planner using a transfer-penalised Dijkstra search.
//!
//! This module implements the core routing algorithm that answers:
//! "What is the quickest way from this stop to that one, counting a fixed
//! penalty every time I change line?"

mod config;
mod search;

pub use config::{DEFAULT_TRANSFER_PENALTY, SearchConfig};
pub use search::{Planner, SearchError, SearchRequest, SearchResult, search};
