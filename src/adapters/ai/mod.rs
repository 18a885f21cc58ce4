//! Language backend adapters.

mod gemini;
mod mock;

pub use gemini::{GeminiBackend, GeminiConfig};
pub use mock::MockBackend;
