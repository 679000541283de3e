//! Service entry-point: loads settings, wires the identity backend adapter,
//! and serves the users endpoint with health probes and OpenAPI docs.

mod server;

use std::io;

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use user_directory::config::load_service_config;
use user_directory::inbound::http::health::HealthState;

/// Application bootstrap.
///
/// Configuration problems abort startup before the socket is bound.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = load_service_config().map_err(io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), ServerConfig::from(config))?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
