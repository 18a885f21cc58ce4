//! Conversation engine - the orchestrator behind the public operations.
//!
//! One engine serves many sessions. Calls for the same session id are
//! serialized through a per-session lock to preserve turn append order
//! and prevent lost field updates; calls for different ids never block
//! each other. The engine has no notion of "done": completion is a
//! UI-observed condition via field presence.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::config::DepartmentDirectory;
use crate::domain::{
    ComplaintFields, ComplaintPackage, Department, IntakeStage, SessionId, Timestamp,
};
use crate::ports::{
    LanguageBackend, MailAttachment, Notifier, NotifyError, OutboundMessage, SessionStore,
    StoreError,
};

use super::classifier::DepartmentClassifier;
use super::composer::SummaryComposer;
use super::extractor::FieldExtractor;
use super::planner::DialogPlanner;

/// Result of handling one user message.
#[derive(Debug, Clone)]
pub struct MessageOutcome {
    /// The assistant's reply (backend text verbatim, or the deterministic
    /// fallback utterance when the backend is down).
    pub reply: String,
    /// Fields known after this turn's extraction pass.
    pub fields: ComplaintFields,
    /// Informational stage tag.
    pub stage: IntakeStage,
}

/// Routing decision for a complaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routing {
    pub department: Department,
    pub department_email: String,
}

/// Errors surfaced by the engine's public operations.
///
/// Backend faults never appear here; they degrade inside the pipeline.
/// Store faults and caller contract violations do surface.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Message content is empty or whitespace only.
    #[error("Validation error: message content cannot be empty")]
    EmptyMessage,

    /// The complainant email address is malformed.
    #[error("Validation error: invalid complainant email address")]
    InvalidUserEmail,

    /// The session has no complaint description to submit.
    #[error("Validation error: complaint description is required for submission")]
    MissingDescription,

    /// Session store failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Outbound delivery failure.
    #[error("Delivery error: {0}")]
    Delivery(#[from] NotifyError),
}

/// Per-session exclusive locks, created lazily per id.
///
/// Entries are never evicted: the map grows with the number of distinct
/// session ids for the engine's lifetime, matching the store's no-expiry
/// stance. Each entry is two pointers, so growth tracks the store's own.
#[derive(Clone, Default)]
struct SessionLocks {
    inner: Arc<StdMutex<HashMap<SessionId, Arc<Mutex<()>>>>>,
}

impl SessionLocks {
    fn lock_for(&self, id: &SessionId) -> Arc<Mutex<()>> {
        // The map holds only handles, so a poisoned lock is still usable.
        let mut map = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        map.entry(id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Orchestrates intake, classification, and submission for all sessions.
#[derive(Clone)]
pub struct ConversationEngine {
    store: Arc<dyn SessionStore>,
    backend: Arc<dyn LanguageBackend>,
    planner: DialogPlanner,
    extractor: FieldExtractor,
    classifier: DepartmentClassifier,
    composer: SummaryComposer,
    departments: DepartmentDirectory,
    locks: SessionLocks,
}

impl ConversationEngine {
    pub fn new(
        backend: Arc<dyn LanguageBackend>,
        store: Arc<dyn SessionStore>,
        departments: DepartmentDirectory,
    ) -> Self {
        Self {
            store,
            planner: DialogPlanner::new(),
            extractor: FieldExtractor::new(backend.clone()),
            classifier: DepartmentClassifier::new(backend.clone()),
            composer: SummaryComposer::new(backend.clone()),
            backend,
            departments,
            locks: SessionLocks::default(),
        }
    }

    /// Handles one user message: appends the turn, obtains the assistant
    /// reply, refreshes fields, persists. Always returns some reply and
    /// some field set, even under total backend unavailability.
    #[tracing::instrument(skip(self, text), fields(session = %session_id))]
    pub async fn handle_message(
        &self,
        session_id: &SessionId,
        text: &str,
    ) -> Result<MessageOutcome, EngineError> {
        if text.trim().is_empty() {
            return Err(EngineError::EmptyMessage);
        }

        let lock = self.locks.lock_for(session_id);
        let _guard = lock.lock().await;

        let mut session = self.store.get_or_create(session_id).await?;
        session.push_user(text);

        // The reply prompt sees the fields known so far plus the raw
        // latest message; extraction absorbs that message afterwards.
        let prompt = self.planner.next_prompt(&session, text);
        let reply = match self.backend.generate(&prompt).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(error = %err, "reply generation failed, using fallback utterance");
                self.planner.fallback_reply(&session.fields).to_string()
            }
        };
        session.push_assistant(reply.clone());

        self.extractor.refresh(&mut session, text).await;

        self.store.put(&session).await?;

        Ok(MessageOutcome {
            reply,
            fields: session.fields.clone(),
            stage: session.stage(),
        })
    }

    /// Classifies the complaint for a session. Classification itself is
    /// total; only a store fault can fail this operation.
    pub async fn classify(
        &self,
        session_id: &SessionId,
        complaint_text: &str,
    ) -> Result<Routing, EngineError> {
        let session = self.store.get_or_create(session_id).await?;
        let department = self.classifier.classify(complaint_text, &session.fields).await;

        Ok(Routing {
            department,
            department_email: self.departments.email_for(department).to_string(),
        })
    }

    /// Builds the submission-ready package for a session. Pure derivation
    /// from current state plus composer output; never persisted.
    pub async fn compose_submission(
        &self,
        session_id: &SessionId,
        department: Department,
        user_email: &str,
    ) -> Result<ComplaintPackage, EngineError> {
        if !user_email.contains('@') {
            return Err(EngineError::InvalidUserEmail);
        }

        let session = self.store.get_or_create(session_id).await?;
        if session.fields.description.is_none() {
            return Err(EngineError::MissingDescription);
        }

        let ai_summary = self.composer.department_summary(&session, department).await;
        let user_advice = self.composer.user_advice(&session, department).await;

        Ok(ComplaintPackage {
            fields: session.fields.clone(),
            department,
            department_email: self.departments.email_for(department).to_string(),
            ai_summary,
            user_advice,
        })
    }

    /// Delivers a composed package to its department, with a CC copy to
    /// the complainant. Used once per completed submission.
    pub async fn submit(
        &self,
        package: &ComplaintPackage,
        user_email: &str,
        attachments: Vec<MailAttachment>,
        notifier: &dyn Notifier,
    ) -> Result<(), EngineError> {
        let mut message = OutboundMessage::new(
            package.department_email.clone(),
            package.subject(),
            package.format_email_body(user_email, Timestamp::now()),
        )
        .with_cc(user_email);
        for attachment in attachments {
            message = message.with_attachment(attachment);
        }

        notifier.send(&message).await?;
        tracing::info!(
            department = %package.department,
            to = %package.department_email,
            "complaint submitted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemorySessionStore, MockBackend};
    use crate::domain::{FieldKey, Session};
    use async_trait::async_trait;

    /// Store double whose every operation fails as unavailable.
    struct FailingStore;

    #[async_trait]
    impl SessionStore for FailingStore {
        async fn get_or_create(&self, _id: &SessionId) -> Result<Session, StoreError> {
            Err(StoreError::Unavailable("store offline".to_string()))
        }

        async fn put(&self, _session: &Session) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("store offline".to_string()))
        }
    }

    /// Store double that loads fine but rejects writes.
    struct ReadOnlyStore(InMemorySessionStore);

    #[async_trait]
    impl SessionStore for ReadOnlyStore {
        async fn get_or_create(&self, id: &SessionId) -> Result<Session, StoreError> {
            self.0.get_or_create(id).await
        }

        async fn put(&self, _session: &Session) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("store is read-only".to_string()))
        }
    }

    fn engine_with(backend: MockBackend) -> (ConversationEngine, Arc<InMemorySessionStore>) {
        let store = Arc::new(InMemorySessionStore::new());
        let engine = ConversationEngine::new(
            Arc::new(backend),
            store.clone(),
            DepartmentDirectory::default(),
        );
        (engine, store)
    }

    #[tokio::test]
    async fn handle_message_appends_both_turns_and_persists() {
        let backend = MockBackend::new()
            .with_response("I'm sorry to hear that. Where did this happen?")
            .with_response(r#"{"description": "wallet stolen"}"#);
        let (engine, store) = engine_with(backend);

        let id = SessionId::new("s1");
        let outcome = engine.handle_message(&id, "My wallet was stolen").await.unwrap();

        assert_eq!(outcome.reply, "I'm sorry to hear that. Where did this happen?");
        assert_eq!(outcome.fields.get(FieldKey::Description), Some("wallet stolen"));

        let session = store.get_or_create(&id).await.unwrap();
        assert_eq!(session.turn_count(), 2);
    }

    #[tokio::test]
    async fn empty_message_is_a_validation_error() {
        let (engine, _) = engine_with(MockBackend::new());
        let result = engine.handle_message(&SessionId::new("s1"), "   ").await;
        assert!(matches!(result, Err(EngineError::EmptyMessage)));
    }

    #[tokio::test]
    async fn total_backend_outage_still_yields_reply_and_fields() {
        let (engine, _) = engine_with(MockBackend::failing());

        let id = SessionId::new("s1");
        let outcome = engine
            .handle_message(&id, "Theft at Rajiv Chowk Metro yesterday")
            .await
            .unwrap();

        // Deterministic utterance (fields were empty at reply time) plus
        // the fallback-extracted description.
        assert_eq!(
            outcome.fields.get(FieldKey::Description),
            Some("Theft at Rajiv Chowk Metro yesterday")
        );
        assert_eq!(outcome.reply, "Please tell me more about what happened.");
    }

    #[tokio::test]
    async fn sessions_do_not_leak_into_each_other() {
        let backend = MockBackend::new()
            .with_response("reply a")
            .with_response(r#"{"description": "a's complaint"}"#)
            .with_response("reply b")
            .with_response(r#"{"description": "b's complaint"}"#);
        let (engine, store) = engine_with(backend);

        engine.handle_message(&SessionId::new("a"), "a's complaint").await.unwrap();
        engine.handle_message(&SessionId::new("b"), "b's complaint").await.unwrap();

        let a = store.get_or_create(&SessionId::new("a")).await.unwrap();
        let b = store.get_or_create(&SessionId::new("b")).await.unwrap();
        assert_eq!(a.fields.get(FieldKey::Description), Some("a's complaint"));
        assert_eq!(b.fields.get(FieldKey::Description), Some("b's complaint"));
        assert_eq!(a.turn_count(), 2);
        assert_eq!(b.turn_count(), 2);
    }

    #[tokio::test]
    async fn classify_returns_department_and_email() {
        let backend = MockBackend::new().with_response("railway");
        let (engine, _) = engine_with(backend);

        let routing = engine
            .classify(&SessionId::new("s1"), "train was cancelled without notice")
            .await
            .unwrap();
        assert_eq!(routing.department, Department::Railway);
        assert_eq!(routing.department_email, "railway.complaints@indianrailways.gov.in");
    }

    #[tokio::test]
    async fn classify_defaults_to_general_on_garbage() {
        let backend = MockBackend::new().with_response("no idea, sorry");
        let (engine, _) = engine_with(backend);

        let routing = engine.classify(&SessionId::new("s1"), "something odd").await.unwrap();
        assert_eq!(routing.department, Department::General);
        assert_eq!(routing.department_email, "general@example.com");
    }

    #[tokio::test]
    async fn compose_submission_requires_valid_email() {
        let (engine, _) = engine_with(MockBackend::new());
        let result = engine
            .compose_submission(&SessionId::new("s1"), Department::General, "not-an-email")
            .await;
        assert!(matches!(result, Err(EngineError::InvalidUserEmail)));
    }

    #[tokio::test]
    async fn compose_submission_requires_a_description() {
        let (engine, _) = engine_with(MockBackend::new());
        let result = engine
            .compose_submission(&SessionId::new("empty"), Department::General, "user@example.com")
            .await;
        assert!(matches!(result, Err(EngineError::MissingDescription)));
    }

    #[tokio::test]
    async fn compose_submission_survives_backend_outage() {
        use crate::application::composer::{GENERIC_ADVICE, SUMMARY_UNAVAILABLE};

        let backend = MockBackend::new()
            .with_response("reply")
            .with_response(r#"{"description": "theft at metro"}"#);
        let (engine, _) = engine_with(backend);

        let id = SessionId::new("s1");
        engine.handle_message(&id, "theft at metro").await.unwrap();

        // The queue is now exhausted; both composer calls fail.
        let package = engine
            .compose_submission(&id, Department::DelhiPolice, "user@example.com")
            .await
            .unwrap();
        assert_eq!(package.ai_summary, SUMMARY_UNAVAILABLE);
        assert_eq!(package.user_advice, GENERIC_ADVICE);
        assert_eq!(package.department_email, "complaints@delhipolice.gov.in");
    }

    #[tokio::test]
    async fn store_load_fault_fails_handle_message() {
        let engine = ConversationEngine::new(
            Arc::new(MockBackend::new()),
            Arc::new(FailingStore),
            DepartmentDirectory::default(),
        );

        let result = engine.handle_message(&SessionId::new("s1"), "hello").await;
        assert!(matches!(
            result,
            Err(EngineError::Store(StoreError::Unavailable(_)))
        ));
    }

    #[tokio::test]
    async fn store_write_fault_fails_handle_message() {
        // Degraded backend paths still run; the put failure must surface.
        let engine = ConversationEngine::new(
            Arc::new(MockBackend::failing()),
            Arc::new(ReadOnlyStore(InMemorySessionStore::new())),
            DepartmentDirectory::default(),
        );

        let result = engine.handle_message(&SessionId::new("s1"), "hello").await;
        assert!(matches!(result, Err(EngineError::Store(_))));
    }

    #[tokio::test]
    async fn store_fault_fails_compose_submission() {
        let engine = ConversationEngine::new(
            Arc::new(MockBackend::new()),
            Arc::new(FailingStore),
            DepartmentDirectory::default(),
        );

        let result = engine
            .compose_submission(&SessionId::new("s1"), Department::General, "user@example.com")
            .await;
        assert!(matches!(result, Err(EngineError::Store(_))));
    }

    #[tokio::test]
    async fn store_fault_fails_classify() {
        let engine = ConversationEngine::new(
            Arc::new(MockBackend::new().with_response("railway")),
            Arc::new(FailingStore),
            DepartmentDirectory::default(),
        );

        let result = engine.classify(&SessionId::new("s1"), "train delayed").await;
        assert!(matches!(result, Err(EngineError::Store(_))));
    }

    #[tokio::test]
    async fn concurrent_messages_to_one_session_serialize() {
        let backend = MockBackend::new()
            .with_response("reply 1")
            .with_response(r#"{}"#)
            .with_response("reply 2")
            .with_response(r#"{}"#);
        let (engine, store) = engine_with(backend);

        let id = SessionId::new("s1");
        let first = engine.handle_message(&id, "first message");
        let second = engine.handle_message(&id, "second message");
        let (a, b) = tokio::join!(first, second);
        a.unwrap();
        b.unwrap();

        let session = store.get_or_create(&id).await.unwrap();
        // Four turns, strictly alternating user/assistant.
        assert_eq!(session.turn_count(), 4);
        let roles: Vec<_> = session.turns().iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![
                crate::domain::TurnRole::User,
                crate::domain::TurnRole::Assistant,
                crate::domain::TurnRole::User,
                crate::domain::TurnRole::Assistant,
            ]
        );
    }
}
