//! Gemini backend - LanguageBackend implementation for the Gemini REST API.
//!
//! Calls `generateContent` directly over HTTP with a bounded per-request
//! timeout.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.5-flash")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let backend = GeminiBackend::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AiConfig;
use crate::ports::{BackendError, LanguageBackend};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Configuration for the Gemini backend.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-2.5-flash".to_string(),
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

impl From<&AiConfig> for GeminiConfig {
    fn from(config: &AiConfig) -> Self {
        Self::new(config.gemini_api_key.clone())
            .with_model(config.model.clone())
            .with_timeout(Duration::from_secs(config.request_timeout_secs))
    }
}

/// LanguageBackend implementation talking to the Gemini HTTP API.
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    client: Client,
    config: GeminiConfig,
}

impl GeminiBackend {
    /// Creates a new backend from configuration.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn request_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.config.base_url,
            self.config.model,
            self.config.api_key()
        )
    }
}

#[async_trait]
impl LanguageBackend for GeminiBackend {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        let timeout_secs = self.config.timeout.as_secs() as u32;
        let response = self
            .client
            .post(self.request_url())
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    BackendError::Timeout { timeout_secs }
                } else if err.is_connect() {
                    BackendError::unavailable(err.to_string())
                } else {
                    BackendError::network(err.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "gemini request rejected");
            return Err(map_http_error(status, &error_body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| BackendError::parse(err.to_string()))?;

        extract_text(parsed)
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, BackendError> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| BackendError::parse("response carried no text candidates"))
}

fn map_http_error(status: StatusCode, body: &str) -> BackendError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| wrapper.error.message)
        .unwrap_or_else(|| body.to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::AuthenticationFailed,
        StatusCode::TOO_MANY_REQUESTS => BackendError::RateLimited {
            retry_after_secs: 30,
        },
        s if s.is_server_error() => BackendError::unavailable(message),
        _ => BackendError::network(message),
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}
