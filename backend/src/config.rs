//! Configuration loaded from environment variables (and `.env` when present)

use std::env;
use std::net::SocketAddr;
use thiserror::Error;

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3001);
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string; the server runs without one
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    /// Audit batch size, 0 = no limit
    pub audit_limit: usize,
}

impl Config {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            bind_addr: parse_var(&lookup, "BIND_ADDR")?
                .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND_ADDR)),
            db_max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS")?
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            audit_limit: parse_var(&lookup, "AUDIT_LIMIT")?.unwrap_or(0),
        })
    }

    /// Database URL for components that cannot run without one
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::Missing("DATABASE_URL"))
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.database_url, None);
        assert_eq!(config.bind_addr, "127.0.0.1:3001".parse::<SocketAddr>().unwrap());
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.audit_limit, 0);
        assert!(matches!(
            config.require_database_url(),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "postgresql://listings@localhost/listings"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("AUDIT_LIMIT", " 500 "),
        ])
        .unwrap();

        assert_eq!(
            config.require_database_url().unwrap(),
            "postgresql://listings@localhost/listings"
        );
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.db_max_connections, 12);
        assert_eq!(config.audit_limit, 500);
    }

    #[test]
    fn test_invalid_number() {
        let err = config_from(&[("AUDIT_LIMIT", "lots")]).unwrap_err();
        assert_eq!(err.to_string(), "AUDIT_LIMIT has invalid value \"lots\"");
    }

    #[test]
    fn test_blank_database_url_ignored() {
        let config = config_from(&[("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(config.database_url, None);
    }
}
