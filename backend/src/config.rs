//! Service configuration loaded via OrthoConfig.
//!
//! Values layer CLI flags over `BACKEND_*` environment variables over an
//! optional config file. [`BackendSettings`] holds the raw values;
//! [`BackendSettings::into_service_config`] validates them once at startup so
//! a misconfigured process fails before it binds a socket.
//! [`load_service_config`] performs both steps for the binary.
//!
//! The service-role key has no CLI flag. It is read from
//! `BACKEND_SERVICE_ROLE_KEY` or the config file only, so it never shows up
//! in the process argument list.

use std::ffi::OsString;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Raw configuration values for the service.
///
/// `url` and `service_role_key` are required; loading fails when either is
/// missing.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BACKEND")]
pub struct BackendSettings {
    /// Base URL of the identity backend project.
    pub url: String,
    /// Privileged service-role key used for admin API calls.
    ///
    /// Environment or config file only.
    #[ortho_config(skip_cli)]
    pub service_role_key: String,
    /// Upper bound on the list-users call, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Socket address the HTTP server binds.
    pub listen_addr: Option<String>,
}

impl fmt::Debug for BackendSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSettings")
            .field("url", &self.url)
            .field("service_role_key", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("listen_addr", &self.listen_addr)
            .finish()
    }
}

/// Validation failures raised by [`BackendSettings::into_service_config`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// `BACKEND_URL` is not an absolute URL.
    #[error("backend url is invalid: {source}")]
    InvalidUrl {
        /// Underlying parse failure.
        #[source]
        source: url::ParseError,
    },
    /// `BACKEND_URL` uses a scheme other than http or https.
    #[error("backend url must use http or https, got `{scheme}`")]
    UnsupportedScheme {
        /// Scheme found in the configured URL.
        scheme: String,
    },
    /// `BACKEND_SERVICE_ROLE_KEY` is blank.
    #[error("service role key must not be empty")]
    EmptyServiceRoleKey,
    /// `BACKEND_REQUEST_TIMEOUT_SECS` is zero.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
    /// `BACKEND_LISTEN_ADDR` is not a socket address.
    #[error("listen address `{value}` is invalid: {source}")]
    InvalidListenAddr {
        /// Configured value.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Failures raised while preparing configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// Layered loading failed, e.g. a required value is missing.
    #[error("failed to load settings: {message}")]
    Load {
        /// Loader diagnostics.
        message: String,
    },
    /// Values loaded but failed validation.
    #[error("invalid settings: {0}")]
    Invalid(#[from] SettingsError),
}

/// Load settings from the process arguments, environment and config file,
/// then validate them.
///
/// # Errors
///
/// See [`load_service_config_from`].
pub fn load_service_config() -> Result<ServiceConfig, ConfigLoadError> {
    load_service_config_from(std::env::args_os())
}

/// Load and validate settings using `args` in place of the process
/// arguments.
///
/// # Errors
///
/// Returns [`ConfigLoadError::Load`] when layered loading fails and
/// [`ConfigLoadError::Invalid`] when a loaded value is rejected.
pub fn load_service_config_from<I, T>(args: I) -> Result<ServiceConfig, ConfigLoadError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let settings = BackendSettings::load_from_iter(args).map_err(|err| ConfigLoadError::Load {
        message: err.to_string(),
    })?;
    Ok(settings.into_service_config()?)
}

/// Service-role credential kept out of logs and wiped on drop.
///
/// # Examples
/// ```
/// use user_directory::config::ServiceRoleKey;
///
/// let key = ServiceRoleKey::new("secret");
/// assert_eq!(key.expose(), "secret");
/// assert_eq!(format!("{key:?}"), "ServiceRoleKey(<redacted>)");
/// ```
#[derive(Clone)]
pub struct ServiceRoleKey(Zeroizing<String>);

impl ServiceRoleKey {
    /// Wrap a raw key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(Zeroizing::new(key.into()))
    }

    /// Borrow the raw key for request signing.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for ServiceRoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ServiceRoleKey(<redacted>)")
    }
}

/// Validated connection settings for the identity backend.
#[derive(Debug, Clone)]
pub struct IdentityBackendConfig {
    /// Project base URL.
    pub base_url: Url,
    /// Admin credential.
    pub service_role_key: ServiceRoleKey,
    /// Timeout applied to each outbound request.
    pub request_timeout: Duration,
}

/// Fully validated service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Identity backend connection.
    pub backend: IdentityBackendConfig,
    /// Address the HTTP server binds.
    pub listen_addr: SocketAddr,
}

impl BackendSettings {
    /// Return the configured timeout, falling back to the default.
    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    /// Return the configured listen address, falling back to the default.
    pub fn listen_addr(&self) -> &str {
        self.listen_addr.as_deref().unwrap_or(DEFAULT_LISTEN_ADDR)
    }

    /// Validate raw values and consume them into a [`ServiceConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] naming the first invalid value. The
    /// service-role key itself never appears in the error.
    pub fn into_service_config(self) -> Result<ServiceConfig, SettingsError> {
        let base_url = Url::parse(self.url.trim())
            .map_err(|source| SettingsError::InvalidUrl { source })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(SettingsError::UnsupportedScheme {
                scheme: base_url.scheme().to_owned(),
            });
        }

        let timeout_secs = self.request_timeout_secs();
        if timeout_secs == 0 {
            return Err(SettingsError::ZeroTimeout);
        }

        let raw_addr = self.listen_addr();
        let listen_addr =
            raw_addr
                .parse::<SocketAddr>()
                .map_err(|source| SettingsError::InvalidListenAddr {
                    value: raw_addr.to_owned(),
                    source,
                })?;

        let key = Zeroizing::new(self.service_role_key);
        if key.trim().is_empty() {
            return Err(SettingsError::EmptyServiceRoleKey);
        }

        Ok(ServiceConfig {
            backend: IdentityBackendConfig {
                base_url,
                service_role_key: ServiceRoleKey(key),
                request_timeout: Duration::from_secs(timeout_secs),
            },
            listen_addr,
        })
    }
}
