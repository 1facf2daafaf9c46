use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::info;

/// Runtime settings, read from `HOLONET_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// User on whose behalf the favorites endpoints act.
    pub acting_user_id: i64,
    /// Answer `200 []` instead of 404 when a catalog list is empty.
    pub empty_list_ok: bool,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: load(&lookup, "HOLONET_HOST", "0.0.0.0")?,
            port: load(&lookup, "HOLONET_PORT", "3000")?,
            db_path: load(&lookup, "HOLONET_DB_PATH", "holonet.db")?,
            acting_user_id: load(&lookup, "HOLONET_ACTING_USER_ID", "1")?,
            empty_list_ok: load(&lookup, "HOLONET_EMPTY_LIST_OK", "false")?,
            seed_demo: load(&lookup, "HOLONET_SEED_DEMO", "false")?,
        })
    }
}

fn load<T, F>(lookup: &F, key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse::<T>()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Invalid {key} value '{raw}'"))
}
