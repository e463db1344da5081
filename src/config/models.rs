//! Configuration data structures for Scout.
//!
//! These types map to environment variables and optional TOML / YAML / JSON
//! configuration files. They are intentionally serde‑friendly and include
//! defaults so that running with no configuration at all works out of the box.
use serde::{Deserialize, Serialize};

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_query_timeout_secs() -> u64 {
    5
}

/// Top-level gateway configuration, read once at process start and immutable
/// afterwards.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener on
    pub host: String,
    /// Port to bind the HTTP listener on
    pub port: u16,
    /// Basic auth username; access control activates only when both
    /// `username` and `password` are non-empty
    pub username: Option<String>,
    /// Basic auth password
    pub password: Option<String>,
    /// Socket read/write timeout handed to the query engine, in seconds
    pub query_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: None,
            password: None,
            query_timeout_secs: default_query_timeout_secs(),
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration builder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// The `host:port` string the listener binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolve the access control credentials, if configured.
    ///
    /// Returns `Some` only when both username and password are present and
    /// non-empty. Otherwise the access control filter is never installed and
    /// every route is reachable without credentials.
    pub fn credentials(&self) -> Option<AccessCredentials> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(AccessCredentials {
                    username: username.to_string(),
                    password: password.to_string(),
                })
            }
            _ => None,
        }
    }
}

/// Credential pair gating all routes except the health check.
///
/// Constructed once at startup via [`ServerConfig::credentials`] and shared
/// immutably for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessCredentials {
    pub username: String,
    pub password: String,
}

/// Builder for ServerConfig to allow for cleaner configuration creation
#[derive(Default)]
pub struct ServerConfigBuilder {
    host: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
    query_timeout_secs: Option<u64>,
}

impl ServerConfigBuilder {
    /// Set the bind host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the bind port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the basic auth credential pair
    pub fn credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the engine socket timeout in seconds
    pub fn query_timeout_secs(mut self, secs: u64) -> Self {
        self.query_timeout_secs = Some(secs);
        self
    }

    /// Build the final ServerConfig
    pub fn build(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        ServerConfig {
            host: self.host.unwrap_or(defaults.host),
            port: self.port.unwrap_or(defaults.port),
            username: self.username,
            password: self.password,
            query_timeout_secs: self
                .query_timeout_secs
                .unwrap_or(defaults.query_timeout_secs),
        }
    }
}
