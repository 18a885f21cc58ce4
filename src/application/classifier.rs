//! Department classification.
//!
//! Total by construction: whatever the backend returns (or fails to
//! return), the result is one of the five routing keys, with `general`
//! as the safe default. A complaint is never left unroutable.

use std::sync::Arc;

use crate::domain::prompts::classification_prompt;
use crate::domain::{ComplaintFields, Department};
use crate::ports::LanguageBackend;

/// Maps complaint content to a routing department.
#[derive(Clone)]
pub struct DepartmentClassifier {
    backend: Arc<dyn LanguageBackend>,
}

impl DepartmentClassifier {
    pub fn new(backend: Arc<dyn LanguageBackend>) -> Self {
        Self { backend }
    }

    /// Classifies a complaint. Never fails; backend faults and
    /// out-of-taxonomy answers both resolve to [`Department::General`].
    pub async fn classify(&self, complaint_text: &str, fields: &ComplaintFields) -> Department {
        let prompt = classification_prompt(complaint_text, fields);
        match self.backend.generate(&prompt).await {
            Ok(raw) => match Department::parse_key(&raw) {
                Some(department) => department,
                None => {
                    tracing::warn!(raw = %raw.trim(), "unrecognized department token, routing to general");
                    Department::General
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "classification backend failed, routing to general");
                Department::General
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockBackend;
    use crate::ports::BackendError;
    use proptest::prelude::*;

    async fn classify_with_response(response: &str) -> Department {
        let backend = MockBackend::new().with_response(response);
        DepartmentClassifier::new(Arc::new(backend))
            .classify("some complaint", &ComplaintFields::new())
            .await
    }

    #[tokio::test]
    async fn known_keys_are_recognized() {
        assert_eq!(classify_with_response("railway").await, Department::Railway);
        assert_eq!(classify_with_response("delhi_traffic").await, Department::DelhiTraffic);
    }

    #[tokio::test]
    async fn response_is_normalized_before_matching() {
        assert_eq!(classify_with_response("  Delhi_Police\n").await, Department::DelhiPolice);
        assert_eq!(classify_with_response("INCOME_TAX").await, Department::IncomeTax);
    }

    #[tokio::test]
    async fn garbage_routes_to_general() {
        assert_eq!(classify_with_response("I don't know").await, Department::General);
        assert_eq!(classify_with_response("").await, Department::General);
        assert_eq!(
            classify_with_response("the police department should handle this").await,
            Department::General
        );
    }

    #[tokio::test]
    async fn backend_failure_routes_to_general() {
        let backend = MockBackend::new().with_error(BackendError::Timeout { timeout_secs: 30 });
        let department = DepartmentClassifier::new(Arc::new(backend))
            .classify("train delayed", &ComplaintFields::new())
            .await;
        assert_eq!(department, Department::General);
    }

    proptest! {
        // Classification is total over arbitrary backend output.
        #[test]
        fn any_backend_output_yields_a_taxonomy_key(raw in "\\PC{0,60}") {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .expect("runtime");
            let department = runtime.block_on(classify_with_response(&raw));
            prop_assert!(Department::ALL.contains(&department));
        }
    }
}
