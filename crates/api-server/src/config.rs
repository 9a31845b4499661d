use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};

/// Server settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,        // BIND_ADDR, all interfaces by default
    pub port: u16,                // PORT, 5000
    pub json_logging: bool,       // RUST_LOG_FORMAT=json
    pub enable_hsts: bool,        // ENABLE_HSTS, requires TLS termination upstream
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            json_logging: false,
            enable_hsts: false,
        }
    }
}

fn flag(value: Option<String>) -> bool {
    value
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("BIND_ADDR is not a valid IP address: {raw}"))?,
            None => defaults.bind_addr,
        };
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {raw}"))?,
            None => defaults.port,
        };

        Ok(Self {
            bind_addr,
            port,
            json_logging: lookup("RUST_LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            enable_hsts: flag(lookup("ENABLE_HSTS")),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}
