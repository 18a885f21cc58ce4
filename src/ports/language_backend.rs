//! Language backend port - the generative-text capability.
//!
//! Every call site in the core catches `BackendError` and applies its
//! documented degradation (fallback extraction, default department,
//! placeholder summary, deterministic fallback reply). No backend fault
//! ever propagates to the caller of a public engine operation.

use async_trait::async_trait;
use thiserror::Error;

/// Port for generative-language backends.
///
/// Implementations connect to an external model API and translate its
/// failure modes into [`BackendError`].
#[async_trait]
pub trait LanguageBackend: Send + Sync {
    /// Generates a text completion for a single prompt.
    ///
    /// Implementations must impose a bounded timeout; a timed-out call
    /// fails with [`BackendError::Timeout`], never hangs.
    async fn generate(&self, prompt: &str) -> Result<String, BackendError>;
}

/// Language backend errors.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Provider is unavailable.
    #[error("backend unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered but the response could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request exceeded the configured timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl BackendError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BackendError::RateLimited { .. }
                | BackendError::Unavailable { .. }
                | BackendError::Network(_)
                | BackendError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_backend_is_object_safe() {
        fn _accepts_dyn(_backend: &dyn LanguageBackend) {}
    }

    #[test]
    fn retryable_classification() {
        assert!(BackendError::RateLimited { retry_after_secs: 30 }.is_retryable());
        assert!(BackendError::unavailable("down").is_retryable());
        assert!(BackendError::network("reset").is_retryable());
        assert!(BackendError::Timeout { timeout_secs: 30 }.is_retryable());

        assert!(!BackendError::AuthenticationFailed.is_retryable());
        assert!(!BackendError::parse("bad json").is_retryable());
    }

    #[test]
    fn errors_display_useful_messages() {
        assert_eq!(
            BackendError::Timeout { timeout_secs: 30 }.to_string(),
            "request timed out after 30s"
        );
        assert_eq!(
            BackendError::unavailable("503").to_string(),
            "backend unavailable: 503"
        );
    }
}
