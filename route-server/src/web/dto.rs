//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Route;
use crate::itinerary::{Instruction, render, stop_summary};

/// Query for a route between two stops.
///
/// Every field is optional text so that missing or malformed values are
/// reported by the handler rather than rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct RouteQuery {
    /// Origin stop name
    pub origin: Option<String>,

    /// Destination stop name
    pub destination: Option<String>,

    /// Minutes charged per line change (blank or absent uses the server setting)
    pub penalty: Option<String>,
}

/// Response listing the network's stops.
#[derive(Debug, Serialize)]
pub struct StopListResponse {
    /// Stop names, sorted
    pub stops: Vec<String>,
}

/// One ride instruction.
#[derive(Debug, Serialize)]
pub struct InstructionResult {
    /// Line to ride
    pub line: String,

    /// Boarding stop
    pub from: String,

    /// Alighting stop
    pub to: String,

    /// Number of stops travelled on this line
    pub stops: usize,

    /// Human-readable instruction
    pub text: String,
}

impl InstructionResult {
    /// Create from a rendered instruction.
    pub fn from_instruction(instruction: &Instruction) -> Self {
        Self {
            line: instruction.line.to_string(),
            from: instruction.from.to_string(),
            to: instruction.to.to_string(),
            stops: instruction.hops,
            text: instruction.to_string(),
        }
    }
}

/// Response for a route query.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Origin as requested (trimmed)
    pub origin: String,

    /// Destination as requested (trimmed)
    pub destination: String,

    /// Penalty applied per line change
    pub transfer_penalty: u32,

    /// Whether a route exists
    pub found: bool,

    /// Total cost in minutes, if found
    pub total_minutes: Option<u64>,

    /// Number of line changes, if found
    pub transfers: Option<usize>,

    /// Ride instructions, in travel order
    pub instructions: Vec<InstructionResult>,

    /// Stops visited, origin first
    pub stops: Vec<String>,

    /// Itinerary text, or the no-route / same-stop message
    pub summary: String,

    /// Stops joined by arrows, empty when there is no route
    pub path: String,
}

impl RouteResponse {
    /// Create from a search outcome.
    pub fn from_route(
        origin: &str,
        destination: &str,
        transfer_penalty: u32,
        route: Option<&Route>,
    ) -> Self {
        let itinerary = render(route.map(|r| &r.path));

        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            transfer_penalty,
            found: route.is_some(),
            total_minutes: route.map(|r| r.total_minutes),
            transfers: route.map(|r| r.path.transfer_count()),
            instructions: itinerary
                .instructions()
                .iter()
                .map(InstructionResult::from_instruction)
                .collect(),
            stops: route
                .map(|r| r.path.stops().map(ToString::to_string).collect())
                .unwrap_or_default(),
            summary: itinerary.to_string(),
            path: route.map(|r| stop_summary(&r.path)).unwrap_or_default(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
