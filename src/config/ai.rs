//! Language backend (Gemini) configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Gemini backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    #[serde(default)]
    pub gemini_api_key: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl AiConfig {
    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.gemini_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("GEMINI_API_KEY"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            model: default_model(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = AiConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = AiConfig {
            gemini_api_key: "key".to_string(),
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidTimeout)));
    }

    #[test]
    fn test_validation_valid_config() {
        let config = AiConfig {
            gemini_api_key: "key".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
