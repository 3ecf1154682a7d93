use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{config_error, Error};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SPOTS_API_BASE: &str = "https://dotted-weaver-401511.ew.r.appspot.com";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub port: u16,
    pub spots_api_base: String,
    pub spots_api_relay: Option<String>,
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            spots_api_base: DEFAULT_SPOTS_API_BASE.into(),
            spots_api_relay: None,
            static_dir: DEFAULT_STATIC_DIR.into(),
        }
    }
}

impl Config {
    /// Reads `PORT`, `SPOTS_API_BASE`, `SPOTS_API_RELAY` and `STATIC_DIR`,
    /// after loading a `.env` file if one is present.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(port) => port.trim().parse::<u16>().map_err(config_error)?,
            None => defaults.port,
        };

        Ok(Self {
            port,
            spots_api_base: lookup("SPOTS_API_BASE").unwrap_or(defaults.spots_api_base),
            spots_api_relay: lookup("SPOTS_API_RELAY").filter(|relay| !relay.is_empty()),
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
