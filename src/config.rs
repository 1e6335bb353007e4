//! Runtime configuration from the environment.
//!
//! Values come from process environment variables, optionally seeded from a
//! `.env` file.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub database_max_connections: u32,
    pub settings_cache_ttl: Duration,
    pub reference_cache_ttl: Duration,
    pub cache_refresh_interval: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration, reading `.env` first when present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;

        Ok(Self {
            database_url,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            database_max_connections: non_zero(
                "DATABASE_MAX_CONNECTIONS",
                parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            )?,
            settings_cache_ttl: Duration::from_secs(parse_or(
                &lookup,
                "SETTINGS_CACHE_TTL_SECS",
                60,
            )?),
            reference_cache_ttl: Duration::from_secs(parse_or(
                &lookup,
                "REFERENCE_CACHE_TTL_SECS",
                300,
            )?),
            cache_refresh_interval: Duration::from_secs(non_zero(
                "CACHE_REFRESH_SECS",
                parse_or(&lookup, "CACHE_REFRESH_SECS", 120)?,
            )?),
            request_timeout: Duration::from_secs(non_zero(
                "REQUEST_TIMEOUT_SECS",
                parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 15)?,
            )?),
        })
    }
}

fn non_zero<T>(key: &str, value: T) -> anyhow::Result<T>
where
    T: PartialEq + Default,
{
    if value == T::default() {
        return Err(anyhow!("{} must be greater than zero", key));
    }
    Ok(value)
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        _ => Ok(default),
    }
}
