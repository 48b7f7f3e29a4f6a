//! Application configuration loaded from environment variables.

use std::env;

use crate::models::DistanceUnit;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Distance unit used when a request does not name one
    pub default_distance_unit: DistanceUnit,
    /// Upper bound on activities accepted in one request
    pub max_activities_per_request: usize,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            default_distance_unit: DistanceUnit::Km,
            max_activities_per_request: 5000,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every setting has a default; only malformed values are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();
        Ok(Self {
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            default_distance_unit: parse_var("DEFAULT_DISTANCE_UNIT")?
                .unwrap_or(defaults.default_distance_unit),
            max_activities_per_request: parse_var("MAX_ACTIVITIES_PER_REQUEST")?
                .unwrap_or(defaults.max_activities_per_request),
        })
    }
}

/// Parse an optional environment variable.
fn parse_var<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                name,
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test touching the process environment to avoid races between tests.
    #[test]
    fn test_config_from_env() {
        env::set_var("PORT", "9090");
        env::set_var("DEFAULT_DISTANCE_UNIT", "mi");
        env::remove_var("MAX_ACTIVITIES_PER_REQUEST");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.port, 9090);
        assert_eq!(config.default_distance_unit, DistanceUnit::Mi);
        assert_eq!(config.max_activities_per_request, 5000);

        env::set_var("DEFAULT_DISTANCE_UNIT", "furlongs");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "DEFAULT_DISTANCE_UNIT",
                ..
            }
        ));

        env::remove_var("PORT");
        env::remove_var("DEFAULT_DISTANCE_UNIT");
    }
}
