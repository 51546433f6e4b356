//! Server configuration, read from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

use crate::network::LoadPolicy;
use crate::planner::DEFAULT_TRANSFER_PENALTY;

/// Network file used when `NETWORK_CSV` is unset.
pub const DEFAULT_NETWORK_CSV: &str = "red_tm.csv";

/// Listen address used when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000);

/// An environment variable held a value that could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value for {var}: {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Startup configuration for the server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// CSV file describing the network
    pub network_csv: PathBuf,
    pub bind_addr: SocketAddr,
    /// Default minutes charged per line change
    pub transfer_penalty: u32,
    pub load_policy: LoadPolicy,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Recognised variables are `NETWORK_CSV`, `BIND_ADDR`,
    /// `TRANSFER_PENALTY` and `SKIP_MALFORMED`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let network_csv = lookup("NETWORK_CSV")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NETWORK_CSV.to_string())
            .into();

        let bind_addr = parse_var(&lookup, "BIND_ADDR")?.unwrap_or(DEFAULT_BIND_ADDR);

        let transfer_penalty =
            parse_var(&lookup, "TRANSFER_PENALTY")?.unwrap_or(DEFAULT_TRANSFER_PENALTY);

        let load_policy = match lookup("SKIP_MALFORMED").as_deref().map(str::trim) {
            None | Some("" | "0" | "false") => LoadPolicy::Abort,
            Some("1" | "true") => LoadPolicy::SkipAndWarn,
            Some(other) => {
                return Err(ConfigError {
                    var: "SKIP_MALFORMED",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            network_csv,
            bind_addr,
            transfer_penalty,
            load_policy,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError { var, value }),
    }
}
