//! Server configuration loaded from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;

/// Where to listen and where entries live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WikiConfig {
    /// Interface to bind (from ENCYCLOPEDIA_HOST)
    pub host: IpAddr,
    /// Port to bind (from ENCYCLOPEDIA_PORT)
    pub port: u16,
    /// Directory of `.md` entries (from ENCYCLOPEDIA_ENTRIES_DIR). `None` means the
    /// platform data directory.
    pub entries_dir: Option<PathBuf>,
}

impl WikiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("ENCYCLOPEDIA_HOST")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

        let port = lookup("ENCYCLOPEDIA_PORT")
            .and_then(|s| s.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let entries_dir = lookup("ENCYCLOPEDIA_ENTRIES_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Self {
            host,
            port,
            entries_dir,
        }
    }

    /// Apply command line overrides on top of the environment.
    pub fn with_overrides(
        mut self,
        host: Option<IpAddr>,
        port: Option<u16>,
        entries_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if entries_dir.is_some() {
            self.entries_dir = entries_dir;
        }
        self
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_localhost_without_environment() {
        let config = WikiConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.addr(), "127.0.0.1:3000".parse().unwrap());
        assert!(config.entries_dir.is_none());
    }

    #[test]
    fn reads_environment_variables() {
        let config = WikiConfig::from_lookup(lookup_from(&[
            ("ENCYCLOPEDIA_HOST", "0.0.0.0"),
            ("ENCYCLOPEDIA_PORT", "8080"),
            ("ENCYCLOPEDIA_ENTRIES_DIR", "/srv/wiki"),
        ]));
        assert_eq!(config.addr(), "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.entries_dir, Some(PathBuf::from("/srv/wiki")));
    }

    #[test]
    fn ignores_unparseable_values() {
        let config = WikiConfig::from_lookup(lookup_from(&[
            ("ENCYCLOPEDIA_HOST", "not-an-ip"),
            ("ENCYCLOPEDIA_PORT", "99999"),
            ("ENCYCLOPEDIA_ENTRIES_DIR", "  "),
        ]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(config.entries_dir.is_none());
    }

    #[test]
    fn command_line_overrides_environment() {
        let config = WikiConfig::from_lookup(lookup_from(&[("ENCYCLOPEDIA_PORT", "8080")]))
            .with_overrides(None, Some(4000), Some(PathBuf::from("entries")));
        assert_eq!(config.port, 4000);
        assert_eq!(config.entries_dir, Some(PathBuf::from("entries")));
    }
}
