//! Environment-driven settings for the binaries.
//!
//! - `HOST` (default `0.0.0.0`), `PORT` (default `8080`)
//! - `ELIMINATION_INACTIVITY_HOURS`: idle divisions are dropped after this long (default 12)
//! - `ELIMINATION_ALLOW_OUTSIDE_GAMES`: `1`/`true` accepts remaining games against teams
//!   outside the table (default off)

use crate::models::LoadOptions;
use std::time::Duration;

/// Web server settings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Divisions not accessed for this long are removed.
    pub inactivity_timeout: Duration,
    /// How often the cleanup task runs.
    pub cleanup_interval: Duration,
    pub load: LoadOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            inactivity_timeout: Duration::from_secs(default_inactivity_hours() * 3600),
            cleanup_interval: Duration::from_secs(30 * 60),
            load: LoadOptions::default(),
        }
    }
}

impl ServerConfig {
    /// Read settings from the process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an explicit variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let inactivity_timeout = lookup("ELIMINATION_INACTIVITY_HOURS")
            .and_then(|h| h.parse::<u64>().ok())
            .and_then(|h| h.checked_mul(3600))
            .map(Duration::from_secs)
            .unwrap_or(defaults.inactivity_timeout);
        Self {
            host,
            port,
            inactivity_timeout,
            cleanup_interval: defaults.cleanup_interval,
            load: load_options_from_lookup(lookup),
        }
    }
}

/// Load options from the process environment.
pub fn load_options_from_env() -> LoadOptions {
    load_options_from_lookup(|key| std::env::var(key).ok())
}

fn load_options_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> LoadOptions {
    let allow_outside_games = lookup("ELIMINATION_ALLOW_OUTSIDE_GAMES")
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);
    LoadOptions { allow_outside_games }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_inactivity_hours() -> u64 {
    12
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(ServerConfig::from_lookup(lookup(&[])), ServerConfig::default());
    }

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "not-a-port"),
            ("ELIMINATION_INACTIVITY_HOURS", "2"),
            ("ELIMINATION_ALLOW_OUTSIDE_GAMES", "True"),
        ]));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.inactivity_timeout, Duration::from_secs(7200));
        assert!(config.load.allow_outside_games);

        let config = ServerConfig::from_lookup(lookup(&[(
            "ELIMINATION_INACTIVITY_HOURS",
            "6000000000000000",
        )]));
        assert_eq!(config.inactivity_timeout, ServerConfig::default().inactivity_timeout);
    }
}
