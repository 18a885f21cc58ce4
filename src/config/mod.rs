//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `COMPLAINT_COMPASS` prefix and nested values use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use complaint_compass::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod email;
mod error;

pub use ai::AiConfig;
pub use email::{DepartmentDirectory, EmailConfig};
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Language backend configuration (Gemini)
    #[serde(default)]
    pub ai: AiConfig,

    /// Outbound mail configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Department destination directory
    #[serde(default)]
    pub departments: DepartmentDirectory,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads environment variables with the
    /// `COMPLAINT_COMPASS` prefix, e.g.
    /// `COMPLAINT_COMPASS__AI__GEMINI_API_KEY=...` or
    /// `COMPLAINT_COMPASS__DEPARTMENTS__RAILWAY=railway@example.com`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected
    /// types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COMPLAINT_COMPASS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.email.validate()?;
        self.departments.validate()?;
        Ok(())
    }
}
