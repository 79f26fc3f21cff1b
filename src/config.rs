//! Configuration loading from environment variables.

use chrono::FixedOffset;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file
    pub db_path: String,
    /// Address the HTTP server binds to
    pub addr: SocketAddr,
    /// Size of the astra worker pool
    pub max_workers: usize,
    /// Household time zone; decides what "today" is and where midnight falls
    pub utc_offset: FixedOffset,
    /// Upper bound on how long `/api/events` holds a request open
    pub poll_timeout: Duration,
    /// Public URL used for links inside emails
    pub app_url: String,
    pub mail: MailConfig,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Only needed when digests are actually sent.
    pub api_key: Option<String>,
    pub sender_email: String,
    pub sender_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All optional (with defaults):
    /// - `CHORES_DB_PATH` (default: chores.sqlite3)
    /// - `CHORES_ADDR` (default: 127.0.0.1:3000)
    /// - `CHORES_MAX_WORKERS` (default: 8)
    /// - `CHORES_UTC_OFFSET_MINUTES` (default: 0)
    /// - `CHORES_POLL_TIMEOUT_SECS` (default: 25)
    /// - `CHORES_APP_URL` (default: http://localhost:3000)
    /// - `BREVO_API_KEY`, `CHORES_SENDER_EMAIL`, `CHORES_SENDER_NAME`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let addr: SocketAddr = get("CHORES_ADDR", "127.0.0.1:3000")
            .parse()
            .map_err(|_| ConfigError::Invalid("CHORES_ADDR", "must be host:port"))?;

        let max_workers: usize = get("CHORES_MAX_WORKERS", "8")
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ConfigError::Invalid(
                "CHORES_MAX_WORKERS",
                "must be a positive integer",
            ))?;

        let offset_minutes: i32 = get("CHORES_UTC_OFFSET_MINUTES", "0").parse().map_err(|_| {
            ConfigError::Invalid("CHORES_UTC_OFFSET_MINUTES", "must be an integer")
        })?;
        let utc_offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(ConfigError::Invalid(
                "CHORES_UTC_OFFSET_MINUTES",
                "must be between -1439 and 1439",
            ))?;

        let poll_secs: u64 = get("CHORES_POLL_TIMEOUT_SECS", "25").parse().map_err(|_| {
            ConfigError::Invalid("CHORES_POLL_TIMEOUT_SECS", "must be a whole number of seconds")
        })?;

        let api_key = lookup("BREVO_API_KEY").filter(|k| !k.trim().is_empty());

        Ok(Self {
            db_path: get("CHORES_DB_PATH", "chores.sqlite3"),
            addr,
            max_workers,
            utc_offset,
            poll_timeout: Duration::from_secs(poll_secs),
            app_url: get("CHORES_APP_URL", "http://localhost:3000")
                .trim_end_matches('/')
                .to_string(),
            mail: MailConfig {
                api_key,
                sender_email: get("CHORES_SENDER_EMAIL", "onboarding@choresync.app"),
                sender_name: get("CHORES_SENDER_NAME", "ChoreSync"),
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required environment variable is missing.
    Missing(&'static str),
    /// An environment variable has an invalid value.
    Invalid(&'static str, &'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => {
                write!(f, "missing required environment variable: {key}")
            }
            ConfigError::Invalid(key, why) => write!(f, "invalid value for {key}: {why}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.db_path, "chores.sqlite3");
        assert_eq!(cfg.addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(cfg.max_workers, 8);
        assert_eq!(cfg.utc_offset.local_minus_utc(), 0);
        assert_eq!(cfg.poll_timeout, Duration::from_secs(25));
        assert_eq!(cfg.mail.api_key, None);
        assert_eq!(cfg.mail.sender_name, "ChoreSync");
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = load(&[
            ("CHORES_ADDR", "0.0.0.0:8080"),
            ("CHORES_UTC_OFFSET_MINUTES", "-300"),
            ("CHORES_APP_URL", "https://chores.example.com/"),
            ("BREVO_API_KEY", "xkeysib-123"),
        ])
        .unwrap();
        assert_eq!(cfg.addr.port(), 8080);
        assert_eq!(cfg.utc_offset.local_minus_utc(), -300 * 60);
        assert_eq!(cfg.app_url, "https://chores.example.com");
        assert_eq!(cfg.mail.api_key.as_deref(), Some("xkeysib-123"));
    }

    #[test]
    fn invalid_values_name_the_variable() {
        assert_eq!(
            load(&[("CHORES_MAX_WORKERS", "0")]).unwrap_err(),
            ConfigError::Invalid("CHORES_MAX_WORKERS", "must be a positive integer")
        );
        assert!(matches!(
            load(&[("CHORES_UTC_OFFSET_MINUTES", "5000")]),
            Err(ConfigError::Invalid("CHORES_UTC_OFFSET_MINUTES", _))
        ));
        assert!(matches!(
            load(&[("CHORES_UTC_OFFSET_MINUTES", "40000000")]),
            Err(ConfigError::Invalid("CHORES_UTC_OFFSET_MINUTES", _))
        ));
        assert!(load(&[("CHORES_ADDR", "nowhere")]).is_err());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cfg = load(&[("BREVO_API_KEY", "  ")]).unwrap();
        assert!(cfg.mail.api_key.is_none());
    }
}
