//! # grt-tracker
//!
//! Session state machine, goal drafting and submission for the Goal
//! Reflection Tracker.
//!
//! A session starts on the principle picker (`Browsing`). Selecting a
//! principle moves it to the goal editor (`Editing`), where the student
//! writes a goal, optionally asks for suggestions, and submits. Going back
//! returns to the picker and discards the draft.
//!
//! ## Key components
//!
//! - [`SessionState`]: the single-owner state struct and its transitions
//! - [`GoalTracker`]: async driver wiring the state to a suggestion provider
//!   and a submitter
//! - [`GoalSubmitter`]: persistence seam ([`NoneSubmitter`] acknowledges only)
//! - [`TrackerEvent`] / [`EventDispatcher`]: lifecycle notifications
//! - [`View`]: renderer-independent screen model
//! - [`TrackerConfig`]: `.grt/config.toml`

pub mod config;
pub mod error;
pub mod events;
pub mod session;
pub mod submit;
pub mod tracker;
pub mod view;

pub use config::{DisplayConfig, LogConfig, SessionConfig, TrackerConfig};
pub use error::TrackerError;
pub use events::{EventDispatcher, MemorySink, NotificationSink, TracingSink, TrackerEvent};
pub use session::{Selection, SessionState, StaleResultPolicy, SuggestionOutcome, SuggestionTicket};
pub use submit::{GoalSubmitter, NoneSubmitter, SubmitError, SubmitReceipt, Submission};
pub use tracker::{GoalTracker, SuggestionCompletion};
pub use view::{EditorView, PrincipleList, View};
