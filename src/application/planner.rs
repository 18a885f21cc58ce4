//! Dialog planning: what to ask next.
//!
//! The planner produces the prompt sent to the language backend for the
//! assistant's reply, plus the deterministic utterance used when the
//! backend itself is down so the conversational surface always answers.

use crate::domain::prompts::intake_prompt;
use crate::domain::{ComplaintFields, FieldKey, Session};

/// Produces the next conversational prompt and the offline fallback reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogPlanner;

impl DialogPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Builds the backend prompt for the assistant's next reply.
    pub fn next_prompt(&self, session: &Session, latest_user_message: &str) -> String {
        intake_prompt(&session.fields, session.turn_count(), latest_user_message)
    }

    /// Deterministic assistant utterance for when the backend call fails.
    /// Keyed to the first missing field so progress continues offline.
    pub fn fallback_reply(&self, fields: &ComplaintFields) -> &'static str {
        match fields.missing().first() {
            Some(FieldKey::Description) => "Please tell me more about what happened.",
            Some(FieldKey::Location) => "Thank you. Where did this happen?",
            Some(FieldKey::Time) => "Thank you. When did this happen?",
            Some(FieldKey::Contact) | None => {
                "Thank you! I have all the essential details. \
                 Click 'Send Email' to submit your complaint."
            }
        }
    }
}
