//! HTTP server configuration.

use std::net::{AddrParseError, IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// HTTP port for the order API and `/healthz`.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

impl ServerConfig {
    /// The socket address the HTTP listener binds.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.bind_address.parse()?;
        Ok(SocketAddr::new(ip, self.http_port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            http_port: default_http_port(),
        }
    }
}

pub(crate) const fn default_http_port() -> u16 {
    8080
}

pub(crate) fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
