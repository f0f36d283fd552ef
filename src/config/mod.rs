//! Configuration management for the ladder
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{
    validate_config, AppConfig, HistoryFallback, MatchSettings, ServiceSettings, StatsSettings,
};
pub use rating::RatingConfig;
