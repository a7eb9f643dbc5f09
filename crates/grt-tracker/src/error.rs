// error.rs - Error types for the tracker.

use thiserror::Error;

use grt_suggest::SuggestError;

use crate::submit::SubmitError;

/// Errors returned by session operations.
///
/// Most of these correspond to controls a front end keeps disabled, so a
/// well-behaved UI never sees them. They exist so the state machine stays
/// correct when driven directly.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// No principle with this id exists in the catalog.
    #[error("unknown principle: {0}")]
    UnknownPrinciple(String),

    /// Invalid state transition.
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// The operation needs a selected principle.
    #[error("no principle selected")]
    NoSelection,

    /// A suggestion request is already outstanding.
    #[error("a suggestion request is already in flight")]
    RequestInFlight,

    /// The draft is empty after trimming whitespace.
    #[error("goal text is empty")]
    EmptyDraft,

    /// Suggestion index out of range.
    #[error("no suggestion at index {index} ({len} available)")]
    SuggestionIndex { index: usize, len: usize },

    /// The submitter rejected the goal.
    #[error("submission failed: {0}")]
    Submit(#[from] SubmitError),

    /// No suggestion provider could be built.
    #[error("suggestion provider error: {0}")]
    Suggest(#[from] SuggestError),

    /// Failed to serialize event data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Reading or parsing the config file failed.
    #[error("config error at {path}: {message}")]
    Config { path: String, message: String },
}
