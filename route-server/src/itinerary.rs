//! Turn-by-turn rendering of a route.
//!
//! Consecutive hops on the same line are merged into a single "ride"
//! instruction, so a path `A -L1-> B -L1-> C -L2-> D` becomes two
//! instructions: ride L1 from A to C, then ride L2 from C to D.

use std::fmt;

use crate::domain::{LineId, Path, StopName};

/// Message shown when no route exists.
pub const NO_ROUTE_MESSAGE: &str = "No route found.";

/// Message shown when origin and destination coincide.
pub const SAME_STOP_MESSAGE: &str = "Origin and destination are the same stop.";

/// One instruction: stay on `line` from `from` to `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub line: LineId,
    pub from: StopName,
    pub to: StopName,
    /// Number of path edges merged into this instruction
    pub hops: usize,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ride line {} from {} to {}.",
            self.line, self.from, self.to
        )
    }
}

/// A rendered itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Itinerary {
    /// The destination could not be reached
    NoRoute,
    /// Origin and destination are the same stop
    SameStop,
    /// Ride instructions in travel order
    Rides(Vec<Instruction>),
}

impl Itinerary {
    /// Total path edges covered by the itinerary.
    pub fn hop_count(&self) -> usize {
        match self {
            Itinerary::Rides(instructions) => instructions.iter().map(|i| i.hops).sum(),
            Itinerary::NoRoute | Itinerary::SameStop => 0,
        }
    }

    /// The ride instructions; empty for the sentinel cases.
    pub fn instructions(&self) -> &[Instruction] {
        match self {
            Itinerary::Rides(instructions) => instructions,
            Itinerary::NoRoute | Itinerary::SameStop => &[],
        }
    }

    /// One line per instruction, or the sentinel message.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Itinerary::NoRoute => vec![NO_ROUTE_MESSAGE.to_string()],
            Itinerary::SameStop => vec![SAME_STOP_MESSAGE.to_string()],
            Itinerary::Rides(instructions) => {
                instructions.iter().map(ToString::to_string).collect()
            }
        }
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// Render a path as ride instructions.
///
/// `None` renders as [`Itinerary::NoRoute`] and a single-stop path as
/// [`Itinerary::SameStop`].
///
/// # Examples
///
/// ```
/// use route_server::domain::{Hop, LineId, Path, StopName};
/// use route_server::itinerary::render;
///
/// let stop = |s| StopName::parse(s).unwrap();
/// let line = |s| LineId::parse(s).unwrap();
/// let path = Path::new(
///     stop("A"),
///     vec![
///         Hop { stop: stop("B"), line: line("L1") },
///         Hop { stop: stop("C"), line: line("L1") },
///     ],
/// );
///
/// assert_eq!(render(Some(&path)).to_string(), "Ride line L1 from A to C.");
/// ```
pub fn render(path: Option<&Path>) -> Itinerary {
    let Some(path) = path else {
        return Itinerary::NoRoute;
    };

    // Each hop's line is the line carried by the stop it arrives at.
    let mut from = path.origin();
    let mut transitions = path.hops().iter().map(|hop| {
        let step = (from, &hop.stop, &hop.line);
        from = &hop.stop;
        step
    });

    let Some((first_from, first_to, first_line)) = transitions.next() else {
        return Itinerary::SameStop;
    };

    let mut instructions = Vec::new();
    let mut current = Instruction {
        line: first_line.clone(),
        from: first_from.clone(),
        to: first_to.clone(),
        hops: 1,
    };

    for (a, b, line) in transitions {
        if *line == current.line {
            current.to = b.clone();
            current.hops += 1;
        } else {
            let next = Instruction {
                line: line.clone(),
                from: a.clone(),
                to: b.clone(),
                hops: 1,
            };
            instructions.push(std::mem::replace(&mut current, next));
        }
    }
    instructions.push(current);

    Itinerary::Rides(instructions)
}

/// The compact summary line: stop names joined by arrows.
pub fn stop_summary(path: &Path) -> String {
    path.stops()
        .map(StopName::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}
