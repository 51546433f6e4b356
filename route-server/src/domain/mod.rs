//! Domain types for the transit route planner.
//!
//! This module contains the core identifiers and result types. All types
//! enforce their invariants at construction time, so code that receives
//! these types can trust their validity.

mod line;
mod path;
mod stop;

pub use line::{InvalidLineId, LineId};
pub use path::{Hop, Path, Route};
pub use stop::{InvalidStopName, StopName};
