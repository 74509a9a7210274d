//! Voice command pipeline
//!
//! Voice text -> IntentTranslator -> TranslationOutcome -> CommandQueue,
//! with VoiceLog and execution history kept in bounded journals and
//! execution reports applied by the ReconciliationReporter.

pub mod action;
pub mod journal;
pub mod queue;
pub mod reconcile;
pub mod translator;

pub use action::{Action, ActionKind, ProposedAction, ShortlistOperation};
pub use journal::{BoundedLog, ExecutionReportEntry, VoiceSubmission};
pub use queue::CommandQueue;
pub use reconcile::{ExecutionReport, ReconciliationReporter};
pub use translator::{
    FallbackReason, IntentTranslator, TranslationOutcome, TranslationResult, TranslationSource,
};
