//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use user_directory::config::{IdentityBackendConfig, ServiceConfig};

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) backend: IdentityBackendConfig,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a server configuration from validated service settings.
    #[must_use]
    pub fn new(backend: IdentityBackendConfig, bind_addr: SocketAddr) -> Self {
        Self { backend, bind_addr }
    }
}

impl From<ServiceConfig> for ServerConfig {
    fn from(config: ServiceConfig) -> Self {
        Self::new(config.backend, config.listen_addr)
    }
}
