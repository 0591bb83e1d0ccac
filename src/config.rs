//! Process configuration read once from the environment at startup.

use crate::error::ConfigError;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://dogshelter.db";
pub const DEFAULT_PORT: u16 = 5100;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `APP_ENV=production`; switches logging defaults.
    pub production: bool,
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_connections: u32,
    pub seed_demo_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            production: false,
            database_url: DEFAULT_DATABASE_URL.into(),
            host: IpAddr::from([127, 0, 0, 1]),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            seed_demo_data: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset or empty variables keep their defaults; anything unparseable is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = ServerConfig::default();

        if let Some(env) = get("APP_ENV") {
            config.production = env.trim().eq_ignore_ascii_case("production");
        }
        if let Some(url) = get("DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(host) = get("HOST") {
            config.host = host
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "HOST", value: host })?;
        }
        if let Some(port) = get("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: port })?;
        }
        if let Some(n) = get("DB_MAX_CONNECTIONS") {
            config.max_connections = match n.trim().parse::<u32>() {
                Ok(v) if v > 0 => v,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DB_MAX_CONNECTIONS",
                        value: n,
                    })
                }
            };
        }
        if let Some(seed) = get("SEED_DEMO_DATA") {
            config.seed_demo_data = match seed.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "SEED_DEMO_DATA",
                        value: seed,
                    })
                }
            };
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:5100");
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("APP_ENV", "Production"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DB_MAX_CONNECTIONS", "2"),
            ("SEED_DEMO_DATA", "true"),
        ])
        .unwrap();
        assert!(config.production);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.max_connections, 2);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn empty_values_keep_defaults() {
        let config = load(&[("PORT", ""), ("DATABASE_URL", " ")]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn invalid_values_are_errors() {
        let err = load(&[("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
        assert!(load(&[("DB_MAX_CONNECTIONS", "0")]).is_err());
        assert!(load(&[("SEED_DEMO_DATA", "maybe")]).is_err());
        assert!(load(&[("HOST", "localhost:1")]).is_err());
    }
}
