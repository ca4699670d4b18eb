use std::ops::RangeInclusive;

use anyhow::{bail, Context, Result};

const ACCESS_TTL_MINUTES: RangeInclusive<i64> = 1..=24 * 60;
const REFRESH_TTL_DAYS: RangeInclusive<i64> = 1..=365;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub access_token_ttl_minutes: i64,
    pub refresh_token_ttl_days: i64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            access_token_ttl_minutes: parse_ttl("ACCESS_TOKEN_TTL_MINUTES", 5, ACCESS_TTL_MINUTES)?,
            refresh_token_ttl_days: parse_ttl("REFRESH_TOKEN_TTL_DAYS", 1, REFRESH_TTL_DAYS)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number")),
        Err(_) => Ok(default),
    }
}

fn parse_ttl(key: &str, default: i64, range: RangeInclusive<i64>) -> Result<i64> {
    let ttl = parse_env(key, default)?;
    if !range.contains(&ttl) {
        bail!(
            "{key} must be between {} and {}, got {ttl}",
            range.start(),
            range.end()
        );
    }
    Ok(ttl)
}
