//! Adapters - implementations of port interfaces.
//!
//! - `ai` - Gemini REST backend and a scriptable mock
//! - `store` - in-memory session store
//! - `email` - HTTP mail notifier

pub mod ai;
pub mod email;
pub mod store;

pub use ai::{GeminiBackend, GeminiConfig, MockBackend};
pub use email::HttpMailNotifier;
pub use store::InMemorySessionStore;
