//! Configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// PostgreSQL connection URL. When None, players are kept in memory.
    pub database_url: Option<String>,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Path the player API is mounted under (default: /rest).
    pub api_prefix: String,

    /// Per-request timeout (default: 30 seconds).
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url = var("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let database_max_connections = var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| vec!["*".to_string()]);

        let api_prefix =
            normalize_prefix(&var("API_PREFIX").unwrap_or_else(|| "/rest".to_string()));

        let request_timeout = var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .map(Duration::from_secs)
            .context("REQUEST_TIMEOUT_SECS must be a valid u64")?;

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            cors_allowed_origins,
            api_prefix,
            request_timeout,
        })
    }

    /// Configuration for in-memory operation, used by tests.
    pub fn in_memory() -> Self {
        Self {
            port: 3000,
            database_url: None,
            database_max_connections: 10,
            cors_allowed_origins: vec!["*".to_string()],
            api_prefix: "/rest".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Leading slash, no trailing slash. An empty prefix mounts at the root.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.database_url.is_none());
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.cors_allowed_origins, vec!["*"]);
        assert_eq!(config.api_prefix, "/rest");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/roster"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test"),
            ("API_PREFIX", "api/v1/"),
            ("REQUEST_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/roster")
        );
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://a.test", "http://b.test"]
        );
        assert_eq!(config.api_prefix, "/api/v1");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_database_url_means_memory() {
        let config = load(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = load(&[("PORT", "http")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn root_prefix_is_empty() {
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix("/rest"), "/rest");
    }
}
