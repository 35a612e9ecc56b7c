use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::database::schema::{DEFAULT_CATALOG_TABLE, DEFAULT_ORDERS_TABLE};
use crate::database::{DataAccessError, TableNames};
use crate::food::config::{NutritionConfig, DEFAULT_FRUIT_API_URL};

pub const DEFAULT_DB_PATH: &str = "data/smoothies.db";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },
    #[error(transparent)]
    Tables(#[from] DataAccessError),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub tables: TableNames,
    pub nutrition: NutritionConfig,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let timeout_raw = get("FRUIT_API_TIMEOUT_SECS", "10");
        let timeout_secs: u64 = timeout_raw.parse().map_err(|_| ConfigError::Invalid {
            key: "FRUIT_API_TIMEOUT_SECS".to_string(),
            value: timeout_raw.clone(),
        })?;

        let mut nutrition = NutritionConfig::new(get("FRUIT_API_URL", DEFAULT_FRUIT_API_URL));
        nutrition.timeout = Duration::from_secs(timeout_secs);

        Ok(Self {
            database_path: PathBuf::from(get("SMOOTHIE_DB_PATH", DEFAULT_DB_PATH)),
            tables: TableNames::new(
                get("SMOOTHIE_CATALOG_TABLE", DEFAULT_CATALOG_TABLE),
                get("SMOOTHIE_ORDERS_TABLE", DEFAULT_ORDERS_TABLE),
            )?,
            nutrition,
        })
    }
}
