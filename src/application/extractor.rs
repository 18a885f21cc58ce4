//! Field extraction over the accumulated conversation.
//!
//! Primary path: one backend request over the *entire* user-authored
//! transcript, so later turns can correct earlier guesses. Both failure
//! modes (backend fault, unusable output) degrade to the deterministic
//! keyword fallback; the caller never observes an extraction failure.

use std::sync::Arc;

use crate::domain::extraction::parse_field_json;
use crate::domain::prompts::extraction_prompt;
use crate::domain::{fallback, ExtractionOutcome, Session};
use crate::ports::LanguageBackend;

/// Derives structured complaint fields from a session's transcript.
#[derive(Clone)]
pub struct FieldExtractor {
    backend: Arc<dyn LanguageBackend>,
}

impl FieldExtractor {
    pub fn new(backend: Arc<dyn LanguageBackend>) -> Self {
        Self { backend }
    }

    /// Refreshes the session's fields after a user turn.
    ///
    /// `latest` is the message that triggered this pass; the fallback
    /// rules operate on it, while the AI path consumes the full
    /// user transcript.
    pub async fn refresh(&self, session: &mut Session, latest: &str) {
        match self.ai_extract(session).await {
            ExtractionOutcome::Extracted(mapping) => {
                session.fields.merge_extracted(&mapping);
            }
            ExtractionOutcome::Malformed(raw) => {
                tracing::warn!(
                    session = %session.id(),
                    raw_len = raw.len(),
                    "extraction output unusable, applying keyword fallback"
                );
                let turn_count = session.turn_count();
                fallback::apply_fallback(&mut session.fields, turn_count, latest);
            }
            ExtractionOutcome::ServiceFailure => {
                tracing::warn!(
                    session = %session.id(),
                    "extraction backend failed, applying keyword fallback"
                );
                let turn_count = session.turn_count();
                fallback::apply_fallback(&mut session.fields, turn_count, latest);
            }
        }
        session.refresh_stage();
    }

    async fn ai_extract(&self, session: &Session) -> ExtractionOutcome {
        let prompt = extraction_prompt(&session.user_transcript());
        match self.backend.generate(&prompt).await {
            Ok(raw) => match parse_field_json(&raw) {
                Ok(mapping) => ExtractionOutcome::Extracted(mapping),
                Err(_) => ExtractionOutcome::Malformed(raw),
            },
            Err(_) => ExtractionOutcome::ServiceFailure,
        }
    }
}
