//! Summary and advice composition.
//!
//! Two independent backend requests over the full transcript. Both
//! degrade to fixed static text; neither ever blocks or fails a
//! submission.

use std::sync::Arc;

use crate::domain::prompts::{advice_prompt, summary_prompt};
use crate::domain::{Department, Session};
use crate::ports::LanguageBackend;

/// Placeholder when the department-facing summary cannot be generated.
pub const SUMMARY_UNAVAILABLE: &str =
    "Unable to generate AI summary. Please review the complaint details below.";

/// Generic acknowledgment when user advice cannot be generated.
pub const GENERIC_ADVICE: &str =
    "Your complaint has been submitted. The department will review and contact you soon.";

/// Produces the narrative summary and user-facing guidance for a package.
#[derive(Clone)]
pub struct SummaryComposer {
    backend: Arc<dyn LanguageBackend>,
}

impl SummaryComposer {
    pub fn new(backend: Arc<dyn LanguageBackend>) -> Self {
        Self { backend }
    }

    /// Department-facing structured narrative (four fixed headings,
    /// priority assessment). Degrades to [`SUMMARY_UNAVAILABLE`].
    pub async fn department_summary(&self, session: &Session, department: Department) -> String {
        let prompt = summary_prompt(&session.transcript(), &session.fields, department);
        match self.backend.generate(&prompt).await {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!(error = %err, "summary generation failed, using placeholder");
                SUMMARY_UNAVAILABLE.to_string()
            }
        }
    }

    /// User-facing guidance (3-5 bullet points). Degrades to
    /// [`GENERIC_ADVICE`].
    pub async fn user_advice(&self, session: &Session, department: Department) -> String {
        let prompt = advice_prompt(&session.fields, department);
        match self.backend.generate(&prompt).await {
            Ok(advice) => advice,
            Err(err) => {
                tracing::warn!(error = %err, "advice generation failed, using generic text");
                GENERIC_ADVICE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockBackend;
    use crate::domain::SessionId;

    fn sample_session() -> Session {
        let mut session = Session::new(SessionId::new("s1"));
        session.push_user("my wallet was stolen at the metro");
        session.push_assistant("When did this happen?");
        session
    }

    #[tokio::test]
    async fn summary_uses_backend_output() {
        let backend = MockBackend::new().with_response("BRIEF SUMMARY: theft at the metro.");
        let composer = SummaryComposer::new(Arc::new(backend));

        let summary = composer
            .department_summary(&sample_session(), Department::DelhiPolice)
            .await;
        assert_eq!(summary, "BRIEF SUMMARY: theft at the metro.");
    }

    #[tokio::test]
    async fn summary_degrades_to_placeholder() {
        let composer = SummaryComposer::new(Arc::new(MockBackend::failing()));
        let summary = composer
            .department_summary(&sample_session(), Department::DelhiPolice)
            .await;
        assert_eq!(summary, SUMMARY_UNAVAILABLE);
    }

    #[tokio::test]
    async fn advice_degrades_to_generic_text() {
        let composer = SummaryComposer::new(Arc::new(MockBackend::failing()));
        let advice = composer.user_advice(&sample_session(), Department::Railway).await;
        assert_eq!(advice, GENERIC_ADVICE);
    }

    #[tokio::test]
    async fn summary_prompt_carries_transcript() {
        let backend = MockBackend::new().with_response("ok");
        let composer = SummaryComposer::new(Arc::new(backend.clone()));
        composer
            .department_summary(&sample_session(), Department::General)
            .await;

        let prompt = &backend.calls()[0];
        assert!(prompt.contains("user: my wallet was stolen at the metro"));
        assert!(prompt.contains("assistant: When did this happen?"));
    }
}
