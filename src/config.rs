//! Process configuration.
//!
//! Defaults reproduce the stock development setup: a relative SQLite file
//! named `auth.db`, a loopback listener on port 5000 and debug mode on.
//! Every field can be overridden from the environment with the `AUTH_`
//! prefix (`AUTH_DATABASE_URL`, `AUTH_HOST`, `AUTH_PORT`, `AUTH_DEBUG`,
//! `AUTH_LOGLEVEL`).

use crate::error::BackendError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Relative SQLite file in the process working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://auth.db";
pub const DEFAULT_PORT: u16 = 5000;
pub const ENV_PREFIX: &str = "AUTH_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Data-source locator handed to the database layer.
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    /// Developer mode: verbose error bodies.
    pub debug: bool,
    /// Fallback `EnvFilter` directive when `RUST_LOG` is unset.
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            debug: true,
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults layered under `AUTH_*` environment overrides.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self, BackendError> {
        Ok(Self::figment().extract()?)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
