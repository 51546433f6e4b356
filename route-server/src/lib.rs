//! Transit route planner server.
//!
//! Loads a network of stops joined by timed, line-labelled connections and
//! answers: "what is the cheapest way from here to there, counting a fixed
//! penalty every time I change lines?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod itinerary;
pub mod network;
pub mod planner;
pub mod web;
