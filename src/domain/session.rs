//! Session aggregate: one ongoing complaint intake.
//!
//! A session owns an ordered, append-only transcript of turns plus the
//! structured fields collected so far. Turns are immutable once appended.
//! The `stage` tag is maintained for observability only; dialog
//! progression is inferred from field presence, never from the stage.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::fields::ComplaintFields;
use super::timestamp::Timestamp;

/// Opaque session identifier. Caller-supplied or server-generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps a caller-supplied identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh server-side identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    /// Label used when rendering transcripts into prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

/// One message exchange unit. Immutable once appended to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: Timestamp,
}

impl Turn {
    fn new(role: TurnRole, content: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
        }
    }
}

/// Informational intake stage, derived from field presence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStage {
    #[default]
    Initial,
    CollectingDetails,
    ReadyToSubmit,
}

/// The durable state of one ongoing complaint intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    turns: Vec<Turn>,
    pub fields: ComplaintFields,
    stage: IntakeStage,
}

impl Session {
    /// Creates an empty session for the given id.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            turns: Vec::new(),
            fields: ComplaintFields::new(),
            stage: IntakeStage::Initial,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn stage(&self) -> IntakeStage {
        self.stage
    }

    /// Appends a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        let timestamp = self.next_turn_timestamp();
        self.turns.push(Turn::new(TurnRole::User, content, timestamp));
    }

    /// Appends an assistant turn. The raw backend text is stored verbatim.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        let timestamp = self.next_turn_timestamp();
        self.turns.push(Turn::new(TurnRole::Assistant, content, timestamp));
    }

    /// Clamps the wall clock to the last turn's timestamp so turn
    /// timestamps stay non-decreasing even across a backwards clock step.
    fn next_turn_timestamp(&self) -> Timestamp {
        let now = Timestamp::now();
        match self.turns.last() {
            Some(last) if now.is_before(&last.timestamp) => last.timestamp,
            _ => now,
        }
    }

    /// All user-authored text in chronological order, one message per line.
    /// Assistant turns are excluded; this is the extraction input.
    pub fn user_transcript(&self) -> String {
        self.turns
            .iter()
            .filter(|t| t.role == TurnRole::User)
            .map(|t| t.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The full role-tagged transcript, for summary and advice prompts.
    pub fn transcript(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("{}: {}", t.role.as_str(), t.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The most recent user turn, if any.
    pub fn latest_user_message(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|t| t.role == TurnRole::User)
            .map(|t| t.content.as_str())
    }

    /// Recomputes the stage tag from field presence. Called after every
    /// extraction pass; never read back to drive behavior.
    pub fn refresh_stage(&mut self) {
        self.stage = if self.fields.essentials_complete() {
            IntakeStage::ReadyToSubmit
        } else if !self.fields.is_empty() {
            IntakeStage::CollectingDetails
        } else {
            IntakeStage::Initial
        };
    }
}
