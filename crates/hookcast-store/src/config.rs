//! Store configuration

use std::time::Duration;

use hookcast::WebhookDeletePolicy;
use thiserror::Error;

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const MAX_CONNECTIONS: &str = "HOOKCAST_MAX_CONNECTIONS";
pub const ACQUIRE_TIMEOUT_SECS: &str = "HOOKCAST_ACQUIRE_TIMEOUT_SECS";
pub const WEBHOOK_DELETE_POLICY: &str = "HOOKCAST_WEBHOOK_DELETE_POLICY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration for the PostgreSQL store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Postgres connection string
    pub database_url: String,
    /// Pool size
    pub max_connections: u32,
    /// How long to wait for a pooled connection
    pub acquire_timeout: Duration,
    /// What deleting a webhook does to its messages
    pub webhook_delete_policy: WebhookDeletePolicy,
}

impl StoreConfig {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
    pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a configuration with just a database URL
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Self::DEFAULT_ACQUIRE_TIMEOUT,
            webhook_delete_policy: WebhookDeletePolicy::default(),
        }
    }

    /// Load from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL))?;

        let mut config = Self::new(database_url);

        if let Some(value) = lookup(MAX_CONNECTIONS) {
            let max_connections = parse_setting::<u32>(MAX_CONNECTIONS, &value)?;
            if max_connections == 0 {
                return Err(ConfigError::Invalid {
                    key: MAX_CONNECTIONS,
                    value,
                    reason: "must be at least 1".to_string(),
                });
            }
            config.max_connections = max_connections;
        }
        if let Some(value) = lookup(ACQUIRE_TIMEOUT_SECS) {
            config.acquire_timeout =
                Duration::from_secs(parse_setting::<u64>(ACQUIRE_TIMEOUT_SECS, &value)?);
        }
        if let Some(value) = lookup(WEBHOOK_DELETE_POLICY) {
            config.webhook_delete_policy = parse_setting(WEBHOOK_DELETE_POLICY, &value)?;
        }

        Ok(config)
    }

    /// Set the pool size
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Set the connection acquire timeout
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Set the webhook delete policy
    pub fn with_webhook_delete_policy(mut self, policy: WebhookDeletePolicy) -> Self {
        self.webhook_delete_policy = policy;
        self
    }
}

fn parse_setting<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::from_lookup(lookup(&[(DATABASE_URL, "postgres://localhost/hc")]))
            .unwrap();
        assert_eq!(config, StoreConfig::new("postgres://localhost/hc"));
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.webhook_delete_policy, WebhookDeletePolicy::SetNull);
    }

    #[test]
    fn test_missing_database_url() {
        let err = StoreConfig::from_lookup(lookup(&[(DATABASE_URL, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(DATABASE_URL));
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            (DATABASE_URL, "postgres://db/hc"),
            (MAX_CONNECTIONS, "20"),
            (ACQUIRE_TIMEOUT_SECS, "3"),
            (WEBHOOK_DELETE_POLICY, "cascade"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.acquire_timeout, Duration::from_secs(3));
        assert_eq!(config.webhook_delete_policy, WebhookDeletePolicy::Cascade);
    }

    #[test]
    fn test_invalid_values() {
        let err = StoreConfig::from_lookup(lookup(&[
            (DATABASE_URL, "postgres://db/hc"),
            (WEBHOOK_DELETE_POLICY, "orphan"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: WEBHOOK_DELETE_POLICY,
                ..
            }
        ));

        let err = StoreConfig::from_lookup(lookup(&[
            (DATABASE_URL, "postgres://db/hc"),
            (MAX_CONNECTIONS, "0"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(MAX_CONNECTIONS));
    }
}
