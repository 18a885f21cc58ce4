//! Domain layer - pure types and logic for complaint intake.
//!
//! Nothing in this module performs I/O. The conversational surface,
//! storage, and the language backend live behind ports.

pub mod complaint;
pub mod department;
pub mod extraction;
pub mod fallback;
pub mod fields;
pub mod prompts;
pub mod session;
pub mod timestamp;

pub use complaint::ComplaintPackage;
pub use department::Department;
pub use extraction::{parse_field_json, ExtractionOutcome, ParseFieldsError};
pub use fields::{ComplaintFields, FieldKey};
pub use session::{IntakeStage, Session, SessionId, Turn, TurnRole};
pub use timestamp::Timestamp;
