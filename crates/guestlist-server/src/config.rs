use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use guestlist_store::StoreConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// Server configuration, resolved once at startup.
///
/// Loaded from TOML; every field is optional:
///
/// ```toml
/// bind_addr = "0.0.0.0:8080"
/// debug = true
///
/// [store]
/// path = "/var/lib/guestlist/guests.csv"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
    /// Lower the log level to `debug`.
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            store: StoreConfig::default(),
            debug: false,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Log filter directive matching the `debug` flag.
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.store.path, PathBuf::from("./database.csv"));
        assert!(!c.debug);
        assert_eq!(c.log_level(), "info");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ServerConfig::from_toml_str("debug = true\n").unwrap();
        assert!(c.debug);
        assert_eq!(c.log_level(), "debug");
        assert_eq!(c.bind_addr, ServerConfig::default().bind_addr);
    }

    #[test]
    fn full_toml() {
        let c = ServerConfig::from_toml_str(
            "bind_addr = \"0.0.0.0:8080\"\n[store]\npath = \"/srv/guests.csv\"\n",
        )
        .unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.store.path, PathBuf::from("/srv/guests.csv"));
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = ServerConfig::from_toml_str("bind_addr = 12").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let err = ServerConfig::load(Path::new("/nonexistent/guestlist.toml")).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }
}
