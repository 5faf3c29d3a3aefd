use chrono::{FixedOffset, Offset, Utc};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    /// Offset of the business's local time from UTC, for day and month boundaries.
    pub utc_offset_hours: i32,
    /// How far ahead maintenance alerts look, in days.
    pub maintenance_alert_days: i64,
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

        let utc_offset_hours = env_map
            .get("UTC_OFFSET_HOURS")
            .map(|s| s.as_str())
            .unwrap_or("8")
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|h| (-12..=14).contains(h))
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "UTC_OFFSET_HOURS".to_string(),
                    "must be an integer between -12 and 14".to_string(),
                )
            })?;

        let maintenance_alert_days = env_map
            .get("MAINTENANCE_ALERT_DAYS")
            .map(|s| s.as_str())
            .unwrap_or("3")
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|d| *d >= 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "MAINTENANCE_ALERT_DAYS".to_string(),
                    "must be a non-negative integer".to_string(),
                )
            })?;

        Ok(Config {
            port,
            database_path,
            utc_offset_hours,
            maintenance_alert_days,
        })
    }

    /// The configured local offset. Out-of-range values fall back to UTC.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .unwrap_or_else(|| Utc.fix())
    }
}
