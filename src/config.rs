//! Service configuration loaded from environment variables.
//!
//! A `.env` file is read first when present (via `dotenvy`). Secrets are held
//! as [`SecretString`] so they never show up in `Debug` output.

use {
    secrecy::SecretString,
    std::{net::SocketAddr, time::Duration},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub database_url: SecretString,
    pub database_max_connections: u32,
    pub database_acquire_timeout: Duration,
    pub run_migrations: bool,
    pub stripe_webhook_secret: SecretString,
    pub resend_api_key: SecretString,
    pub resend_api_url: String,
    pub email_from: String,
    pub email_worker_poll_interval: Duration,
    pub email_worker_batch_size: i64,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let listen_addr = parse("LISTEN_ADDR", or_default("LISTEN_ADDR", "0.0.0.0:3000"))?;
        let database_max_connections =
            parse("DATABASE_MAX_CONNECTIONS", or_default("DATABASE_MAX_CONNECTIONS", "20"))?;
        let acquire_secs: u64 = parse(
            "DATABASE_ACQUIRE_TIMEOUT_SECS",
            or_default("DATABASE_ACQUIRE_TIMEOUT_SECS", "3"),
        )?;
        let run_migrations = parse_bool("RUN_MIGRATIONS", or_default("RUN_MIGRATIONS", "true"))?;
        let poll_secs: u64 = parse(
            "EMAIL_WORKER_POLL_SECS",
            or_default("EMAIL_WORKER_POLL_SECS", "1"),
        )?;
        let email_worker_batch_size = parse(
            "EMAIL_WORKER_BATCH_SIZE",
            or_default("EMAIL_WORKER_BATCH_SIZE", "10"),
        )?;
        let log_format = match or_default("LOG_FORMAT", "pretty").as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::Invalid {
                    key: "LOG_FORMAT",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            listen_addr,
            database_url: SecretString::from(required("DATABASE_URL")?),
            database_max_connections,
            database_acquire_timeout: Duration::from_secs(acquire_secs),
            run_migrations,
            stripe_webhook_secret: SecretString::from(required("STRIPE_WEBHOOK_SECRET")?),
            resend_api_key: SecretString::from(required("RESEND_API_KEY")?),
            resend_api_url: or_default("RESEND_API_URL", crate::adapters::resend::DEFAULT_API_URL),
            email_from: required("EMAIL_FROM")?,
            email_worker_poll_interval: Duration::from_secs(poll_secs),
            email_worker_batch_size,
            log_format,
        })
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value }),
    }
}
