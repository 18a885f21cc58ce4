//! Application services: the intake pipeline and its orchestrator.

pub mod classifier;
pub mod composer;
pub mod engine;
pub mod extractor;
pub mod planner;

pub use classifier::DepartmentClassifier;
pub use composer::{SummaryComposer, GENERIC_ADVICE, SUMMARY_UNAVAILABLE};
pub use engine::{ConversationEngine, EngineError, MessageOutcome, Routing};
pub use extractor::FieldExtractor;
pub use planner::DialogPlanner;
