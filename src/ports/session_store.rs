//! Session store port.
//!
//! Keyed storage of conversation state with get-or-create semantics.
//! There is no explicit "create session" operation: the first message for
//! an unseen id materializes an empty session. Store faults are never
//! masked; they surface as failures of the engine's public operations.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Session, SessionId};

/// Port for session persistence.
///
/// Implementations must guarantee that operations on different ids do not
/// interfere. Serialization of concurrent operations on the *same* id is
/// the engine's responsibility (per-session exclusive lock), not the
/// store's.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the session for `id`, creating an empty one if absent.
    async fn get_or_create(&self, id: &SessionId) -> Result<Session, StoreError>;

    /// Replaces the stored session for its id. Idempotent full replace.
    async fn put(&self, session: &Session) -> Result<(), StoreError>;
}

/// Session store errors.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("session store unavailable: {0}")]
    Unavailable(String),

    /// The stored state could not be encoded or decoded.
    #[error("session serialization failed: {0}")]
    Serialization(String),
}
