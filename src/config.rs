use crate::engine::restock::{
    resolve_time_zone, RestockCountdown, RestockSchedule, DEFAULT_TIME_ZONE,
};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub restock: RestockCountdown,
    pub catalog: Option<CatalogLocation>,
    pub trade_ad_ttl_hours: i64,
    pub trade_ad_page_size: i64,
}

/// Where to sync the item catalog from at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    Url(String),
    File(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let tz = resolve_time_zone(
            env_map
                .get("RESTOCK_TIMEZONE")
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TIME_ZONE),
        )
        .map_err(|e| ConfigError::InvalidValue("RESTOCK_TIMEZONE".to_string(), e.to_string()))?;

        let schedule = match env_map.get("RESTOCK_HOURS") {
            Some(raw) => parse_restock_hours(raw)?,
            None => RestockSchedule::default(),
        };

        let catalog = parse_catalog_location(&env_map);

        let trade_ad_ttl_hours = parse_positive(&env_map, "TRADE_AD_TTL_HOURS", 72)?;
        let trade_ad_page_size = parse_positive(&env_map, "TRADE_AD_PAGE_SIZE", 30)?;

        Ok(Config {
            port,
            database_path,
            restock: RestockCountdown::new(schedule, tz),
            catalog,
            trade_ad_ttl_hours,
            trade_ad_page_size,
        })
    }

    pub fn trade_ad_ttl_ms(&self) -> i64 {
        self.trade_ad_ttl_hours.saturating_mul(3_600_000)
    }
}

fn parse_restock_hours(raw: &str) -> Result<RestockSchedule, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidValue("RESTOCK_HOURS".to_string(), msg);

    let hours = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map_err(|_| invalid(format!("not an hour: {}", s)))
        })
        .collect::<Result<Vec<u32>, ConfigError>>()?;

    RestockSchedule::new(hours).map_err(|e| invalid(e.to_string()))
}

fn parse_catalog_location(env_map: &HashMap<String, String>) -> Option<CatalogLocation> {
    let non_blank = |key: &str| {
        env_map
            .get(key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    non_blank("CATALOG_URL")
        .map(CatalogLocation::Url)
        .or_else(|| non_blank("CATALOG_FILE").map(CatalogLocation::File))
}

fn parse_positive(
    env_map: &HashMap<String, String>,
    key: &str,
    default: i64,
) -> Result<i64, ConfigError> {
    match env_map.get(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(v) if v > 0 => Ok(v),
            _ => Err(ConfigError::InvalidValue(
                key.to_string(),
                "must be a positive integer".to_string(),
            )),
        },
    }
}
