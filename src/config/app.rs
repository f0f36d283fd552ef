//! Main application configuration
//!
//! This module defines the configuration structures for the ladder, including
//! environment variable loading, TOML file loading and validation.

use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
    pub matches: MatchSettings,
    pub stats: StatsSettings,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Rules applied when a match is recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Accept equal scores and rate them as draws
    pub allow_draws: bool,
    /// Maximum number of players on one side
    pub max_side_size: usize,
}

/// How rating history points without a stored snapshot are filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryFallback {
    /// Report the player's current rating for unknown points
    CurrentRating,
    /// Reconstruct the missing points by replaying the whole match log
    Replay,
}

impl FromStr for HistoryFallback {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "current_rating" | "current" => Ok(HistoryFallback::CurrentRating),
            "replay" => Ok(HistoryFallback::Replay),
            other => Err(anyhow!("Unknown history fallback: {}", other)),
        }
    }
}

/// Player statistics settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSettings {
    pub history_fallback: HistoryFallback,
    /// Number of matches returned by the recent matches listing
    pub recent_matches_limit: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "foosball-ladder".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            allow_draws: false,
            max_side_size: 2,
        }
    }
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            history_fallback: HistoryFallback::CurrentRating,
            recent_matches_limit: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still take precedence
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Rating settings
        if let Ok(k_factor) = env::var("RATING_K_FACTOR") {
            self.rating.k_factor = k_factor
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_K_FACTOR value: {}", k_factor))?;
        }
        if let Ok(initial) = env::var("INITIAL_RATING") {
            self.rating.initial_rating = initial
                .parse()
                .map_err(|_| anyhow!("Invalid INITIAL_RATING value: {}", initial))?;
        }

        // Match settings
        if let Ok(allow_draws) = env::var("ALLOW_DRAWS") {
            self.matches.allow_draws = allow_draws
                .parse()
                .map_err(|_| anyhow!("Invalid ALLOW_DRAWS value: {}", allow_draws))?;
        }
        if let Ok(max_side) = env::var("MAX_SIDE_SIZE") {
            self.matches.max_side_size = max_side
                .parse()
                .map_err(|_| anyhow!("Invalid MAX_SIDE_SIZE value: {}", max_side))?;
        }

        // Stats settings
        if let Ok(fallback) = env::var("HISTORY_FALLBACK") {
            self.stats.history_fallback = fallback.parse()?;
        }
        if let Ok(limit) = env::var("RECENT_MATCHES_LIMIT") {
            self.stats.recent_matches_limit = limit
                .parse()
                .map_err(|_| anyhow!("Invalid RECENT_MATCHES_LIMIT value: {}", limit))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    config.rating.validate()?;

    if config.matches.max_side_size == 0 {
        return Err(anyhow!("Max side size must be greater than 0"));
    }
    if config.stats.recent_matches_limit == 0 {
        return Err(anyhow!("Recent matches limit must be greater than 0"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard};

    const ENV_VARS: [&str; 8] = [
        "SERVICE_NAME",
        "LOG_LEVEL",
        "RATING_K_FACTOR",
        "INITIAL_RATING",
        "ALLOW_DRAWS",
        "MAX_SIDE_SIZE",
        "HISTORY_FALLBACK",
        "RECENT_MATCHES_LIMIT",
    ];

    // Tests touching the process environment must not interleave
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clean_env_vars() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    fn clean_env() -> MutexGuard<'static, ()> {
        let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        clean_env_vars();
        guard
    }

    fn write_config(contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("ladder-config-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    const SAMPLE_TOML: &str = r#"
        [service]
        name = "office-ladder"

        [rating]
        k_factor = 24.0

        [matches]
        allow_draws = true
        max_side_size = 2
    "#;

    #[test]
    fn test_from_file_reads_values() {
        let _env = clean_env();
        let path = write_config(SAMPLE_TOML);

        let config = AppConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.service.name, "office-ladder");
        assert_eq!(config.rating.k_factor, 24.0);
        assert_eq!(config.rating.initial_rating, 1000);
        assert!(config.matches.allow_draws);
        assert_eq!(config.matches.max_side_size, 2);
    }

    #[test]
    fn test_from_file_missing_or_malformed() {
        let _env = clean_env();
        let missing = env::temp_dir().join(format!("ladder-missing-{}.toml", uuid::Uuid::new_v4()));
        assert!(AppConfig::from_file(&missing).is_err());

        let path = write_config("[matches\nallow_draws = ");
        let result = AppConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let _env = clean_env();
        let path = write_config(SAMPLE_TOML);
        env::set_var("MAX_SIDE_SIZE", "3");
        env::set_var("HISTORY_FALLBACK", "replay");

        let result = AppConfig::from_file(&path);
        clean_env_vars();
        std::fs::remove_file(&path).unwrap();

        let config = result.unwrap();
        assert_eq!(config.matches.max_side_size, 3);
        assert_eq!(config.stats.history_fallback, HistoryFallback::Replay);
        assert_eq!(config.rating.k_factor, 24.0);
    }

    #[test]
    fn test_from_env_reads_overrides() {
        let _env = clean_env();
        env::set_var("RATING_K_FACTOR", "16");
        env::set_var("INITIAL_RATING", "1200");
        env::set_var("ALLOW_DRAWS", "true");

        let result = AppConfig::from_env();
        clean_env_vars();

        let config = result.unwrap();
        assert_eq!(config.rating.k_factor, 16.0);
        assert_eq!(config.rating.initial_rating, 1200);
        assert!(config.matches.allow_draws);
    }

    #[test]
    fn test_bad_env_value_rejected() {
        let _env = clean_env();
        env::set_var("RATING_K_FACTOR", "abc");

        let result = AppConfig::from_env();
        clean_env_vars();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("RATING_K_FACTOR"));
    }

    #[test]
    fn test_env_value_failing_validation_rejected() {
        let _env = clean_env();
        let path = write_config(SAMPLE_TOML);
        env::set_var("MAX_SIDE_SIZE", "0");

        let from_env = AppConfig::from_env();
        let from_file = AppConfig::from_file(&path);
        clean_env_vars();
        std::fs::remove_file(&path).unwrap();

        assert!(from_env.is_err());
        assert!(from_file.is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.rating.k_factor, 32.0);
        assert_eq!(config.rating.initial_rating, 1000);
        assert!(!config.matches.allow_draws);
        assert_eq!(config.stats.history_fallback, HistoryFallback::CurrentRating);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_invalid_k_factor() {
        let mut config = AppConfig::default();
        config.rating.k_factor = 0.0;
        assert!(validate_config(&config).is_err());

        config.rating.k_factor = f64::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [matches]
            allow_draws = true

            [stats]
            history_fallback = "replay"
            "#,
        )
        .unwrap();

        assert!(config.matches.allow_draws);
        assert_eq!(config.matches.max_side_size, 2);
        assert_eq!(config.stats.history_fallback, HistoryFallback::Replay);
        assert_eq!(config.rating, RatingConfig::default());
    }

    #[test]
    fn test_history_fallback_from_str() {
        assert_eq!(
            "replay".parse::<HistoryFallback>().unwrap(),
            HistoryFallback::Replay
        );
        assert_eq!(
            "Current_Rating".parse::<HistoryFallback>().unwrap(),
            HistoryFallback::CurrentRating
        );
        assert!("guess".parse::<HistoryFallback>().is_err());
    }
}
