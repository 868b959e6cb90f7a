use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Accepted token lifetimes, in days.
const TOKEN_TTL_DAYS: std::ops::RangeInclusive<i64> = 1..=3650;

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &["change-me-to-a-random-string", "dev-secret-change-me"];

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub token_ttl_days: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_secret = get("MAGITRAK_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("MAGITRAK_JWT_SECRET is unset or still a placeholder");
        }

        let port = get("MAGITRAK_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse::<u16>()
            .context("MAGITRAK_PORT must be a port number")?;
        let token_ttl_days = get("MAGITRAK_TOKEN_TTL_DAYS")
            .unwrap_or_else(|| "30".into())
            .parse::<i64>()
            .context("MAGITRAK_TOKEN_TTL_DAYS must be a whole number of days")?;
        if !TOKEN_TTL_DAYS.contains(&token_ttl_days) {
            bail!(
                "MAGITRAK_TOKEN_TTL_DAYS must be between {} and {}",
                TOKEN_TTL_DAYS.start(),
                TOKEN_TTL_DAYS.end()
            );
        }

        Ok(Self {
            jwt_secret,
            db_path: get("MAGITRAK_DB_PATH").unwrap_or_else(|| "magitrak.db".into()).into(),
            host: get("MAGITRAK_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            token_ttl_days,
        })
    }
}
