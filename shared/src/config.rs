use std::{str::FromStr, time::Duration};

use anyhow::{Context, Result};

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub event_queue: EventQueueConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required =
            |key: &str| get(key).with_context(|| format!("environment variable {key} is not set"));

        let database = DatabaseConfig {
            host: required("DATABASE_HOST")?,
            port: parse_var(&get, "DATABASE_PORT", None)?,
            username: required("DATABASE_USERNAME")?,
            password: required("DATABASE_PASSWORD")?,
            database: required("DATABASE_NAME")?,
        };
        let server = ServerConfig {
            port: parse_var(&get, "SERVER_PORT", Some(8080))?,
        };
        let event_queue = EventQueueConfig {
            capacity: parse_var(&get, "EVENT_QUEUE_CAPACITY", Some(256))?,
            send_timeout: Duration::from_millis(parse_var(
                &get,
                "EVENT_QUEUE_SEND_TIMEOUT_MS",
                Some(100),
            )?),
            drain_on_shutdown: parse_var(&get, "EVENT_QUEUE_DRAIN_ON_SHUTDOWN", Some(true))?,
        };
        anyhow::ensure!(
            event_queue.capacity > 0,
            "EVENT_QUEUE_CAPACITY must be greater than zero"
        );

        Ok(Self {
            database,
            server,
            event_queue,
        })
    }
}

fn parse_var<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: Option<T>) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match (get(key), default) {
        (Some(raw), _) => raw
            .parse::<T>()
            .with_context(|| format!("environment variable {key} has an invalid value: {raw}")),
        (None, Some(default)) => Ok(default),
        (None, None) => anyhow::bail!("environment variable {key} is not set"),
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct ServerConfig {
    pub port: u16,
}

/// Sizing and backpressure policy of the booking event queue.
///
/// Producers wait at most `send_timeout` for a free slot; after that the
/// event is dropped and logged.
#[derive(Debug, Clone)]
pub struct EventQueueConfig {
    pub capacity: usize,
    pub send_timeout: Duration,
    pub drain_on_shutdown: bool,
}

impl Default for EventQueueConfig {
    fn default() -> Self {
        Self {
            capacity: 256,
            send_timeout: Duration::from_millis(100),
            drain_on_shutdown: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const DATABASE: [(&str, &str); 5] = [
        ("DATABASE_HOST", "localhost"),
        ("DATABASE_PORT", "5432"),
        ("DATABASE_USERNAME", "app"),
        ("DATABASE_PASSWORD", "passwd"),
        ("DATABASE_NAME", "app"),
    ];

    #[test]
    fn applies_defaults_for_optional_values() -> Result<()> {
        let config = AppConfig::from_source(source(&DATABASE))?;
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.event_queue.capacity, 256);
        assert_eq!(config.event_queue.send_timeout, Duration::from_millis(100));
        assert!(config.event_queue.drain_on_shutdown);
        Ok(())
    }

    #[test]
    fn reads_event_queue_overrides() -> Result<()> {
        let mut pairs = DATABASE.to_vec();
        pairs.extend([
            ("EVENT_QUEUE_CAPACITY", "8"),
            ("EVENT_QUEUE_SEND_TIMEOUT_MS", "5"),
            ("EVENT_QUEUE_DRAIN_ON_SHUTDOWN", "false"),
        ]);
        let config = AppConfig::from_source(source(&pairs))?;
        assert_eq!(config.event_queue.capacity, 8);
        assert_eq!(config.event_queue.send_timeout, Duration::from_millis(5));
        assert!(!config.event_queue.drain_on_shutdown);
        Ok(())
    }

    #[test]
    fn rejects_missing_and_malformed_values() {
        assert!(AppConfig::from_source(source(&DATABASE[..4])).is_err());

        let mut pairs = DATABASE.to_vec();
        pairs.push(("EVENT_QUEUE_CAPACITY", "lots"));
        assert!(AppConfig::from_source(source(&pairs)).is_err());

        let mut pairs = DATABASE.to_vec();
        pairs.push(("EVENT_QUEUE_CAPACITY", "0"));
        assert!(AppConfig::from_source(source(&pairs)).is_err());
    }
}
