//! Configuration module for the collaboration backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::fmt;
use std::net::SocketAddr;

/// Default connection string: a SQLite file created on first start.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/collab.sqlite?mode=rwc";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Document store connection string (`sqlite:...` or `memory:`)
    pub database_url: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Debug mode
    pub debug: bool,
}

/// A configuration variable that is present but unusable.
#[derive(Debug)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value {:?} for {}", self.value, self.variable)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("COLLAB_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let bind_raw =
            env::var("COLLAB_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_string());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError {
            variable: "COLLAB_BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let debug = match env::var("COLLAB_DEBUG") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError {
                variable: "COLLAB_DEBUG",
                value: raw,
            })?,
            Err(_) => false,
        };

        let log_level = if debug {
            "debug".to_string()
        } else {
            env::var("COLLAB_LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
        };

        Ok(Self {
            database_url,
            bind_addr,
            log_level,
            debug,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("COLLAB_DATABASE_URL");
        env::remove_var("COLLAB_BIND_ADDR");
        env::remove_var("COLLAB_LOG_LEVEL");
        env::remove_var("COLLAB_DEBUG");

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:5000");
        assert_eq!(config.log_level, "info");
        assert!(!config.debug);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" ON "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
