//! Mock language backend for testing.
//!
//! Configurable to return scripted responses or inject errors, with a call
//! log for verification. Lets the whole intake pipeline run without a real
//! model API.
//!
//! # Example
//!
//! ```ignore
//! let backend = MockBackend::new()
//!     .with_response("Where did this happen?")
//!     .with_error(BackendError::unavailable("down"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{BackendError, LanguageBackend};

/// Scriptable mock backend.
///
/// Responses are consumed in order; once the queue is empty the backend
/// fails as unavailable (or always, if constructed with [`MockBackend::failing`]).
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    responses: Arc<Mutex<VecDeque<Result<String, BackendError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
    always_fail: bool,
}

impl MockBackend {
    /// Creates a mock with an empty response queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock that fails every call, simulating total outage.
    pub fn failing() -> Self {
        Self {
            always_fail: true,
            ..Self::default()
        }
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .expect("mock lock poisoned")
            .push_back(Ok(content.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: BackendError) -> Self {
        self.responses
            .lock()
            .expect("mock lock poisoned")
            .push_back(Err(error));
        self
    }

    /// Prompts received so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("mock lock poisoned").clone()
    }

    /// Number of calls received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock lock poisoned").len()
    }
}

#[async_trait]
impl LanguageBackend for MockBackend {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        self.calls
            .lock()
            .expect("mock lock poisoned")
            .push(prompt.to_string());

        if self.always_fail {
            return Err(BackendError::unavailable("mock backend is down"));
        }

        self.responses
            .lock()
            .expect("mock lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::unavailable("mock response queue exhausted")))
    }
}
