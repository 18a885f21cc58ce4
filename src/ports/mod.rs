//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `LanguageBackend` - generative-text capability
//! - `SessionStore` - keyed conversation-state storage
//! - `Notifier` - outbound complaint delivery

mod language_backend;
mod notifier;
mod session_store;

pub use language_backend::{BackendError, LanguageBackend};
pub use notifier::{MailAttachment, Notifier, NotifyError, OutboundMessage};
pub use session_store::{SessionStore, StoreError};
