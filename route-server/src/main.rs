use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use route_server::cache::{CacheConfig, CachedPlanner};
use route_server::config::ServerConfig;
use route_server::network::load_csv_path;
use route_server::planner::SearchConfig;
use route_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    // Load the network (fail fast if unavailable)
    let report = match load_csv_path(&config.network_csv, config.load_policy) {
        Ok(report) => report,
        Err(e) => {
            error!(path = %config.network_csv.display(), error = %e, "Failed to load network");
            std::process::exit(1);
        }
    };
    if report.network.is_empty() {
        warn!(path = %config.network_csv.display(), "Network has no connections");
    }

    let search_config = SearchConfig {
        transfer_penalty: config.transfer_penalty,
        ..SearchConfig::default()
    };
    let planner = CachedPlanner::new(
        Arc::new(report.network),
        search_config,
        &CacheConfig::default(),
    );

    let app = create_router(AppState::new(planner));

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %config.bind_addr, "Route planner listening on http://{}", config.bind_addr);
    info!("API endpoints: GET /health, GET /api/stops, GET /route?origin=&destination=&penalty=");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
