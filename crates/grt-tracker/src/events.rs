// events.rs - Event model and notification dispatch.
//
// The tracker emits an event at every state transition and on each
// suggestion resolution and submission. Sinks observe these events; they
// cannot change the session state.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TrackerError;
use crate::submit::Submission;

/// Events emitted by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum TrackerEvent {
    /// The student opened the goal editor for a principle.
    PrincipleSelected {
        principle_id: String,
        timestamp: DateTime<Utc>,
    },

    /// The student went back to the principle picker.
    ReturnedToPrinciples {
        principle_id: String,
        timestamp: DateTime<Utc>,
    },

    /// A suggestion request was issued.
    SuggestionsRequested {
        principle_id: String,
        generation: u64,
        provider: String,
        timestamp: DateTime<Utc>,
    },

    /// A suggestion request resolved. `applied` is false for stale results.
    SuggestionsResolved {
        principle_id: String,
        applied: bool,
        count: usize,
        timestamp: DateTime<Utc>,
    },

    /// A suggestion request failed.
    SuggestionsFailed {
        principle_id: String,
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// A goal was submitted.
    GoalSubmitted {
        submission_id: Uuid,
        principle_id: String,
        goal_text: String,
        timestamp: DateTime<Utc>,
    },
}

impl TrackerEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            TrackerEvent::PrincipleSelected { .. } => "principle_selected",
            TrackerEvent::ReturnedToPrinciples { .. } => "returned_to_principles",
            TrackerEvent::SuggestionsRequested { .. } => "suggestions_requested",
            TrackerEvent::SuggestionsResolved { .. } => "suggestions_resolved",
            TrackerEvent::SuggestionsFailed { .. } => "suggestions_failed",
            TrackerEvent::GoalSubmitted { .. } => "goal_submitted",
        }
    }

    pub fn principle_selected(principle_id: &str) -> Self {
        TrackerEvent::PrincipleSelected {
            principle_id: principle_id.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn returned_to_principles(principle_id: &str) -> Self {
        TrackerEvent::ReturnedToPrinciples {
            principle_id: principle_id.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn goal_submitted(submission: &Submission) -> Self {
        TrackerEvent::GoalSubmitted {
            submission_id: submission.submission_id,
            principle_id: submission.principle_id.clone(),
            goal_text: submission.goal_text.clone(),
            timestamp: submission.submitted_at,
        }
    }
}

/// Receives tracker events.
pub trait NotificationSink: Send {
    /// Handle an event. Errors are logged but don't stop the tracker.
    fn send(&self, event: &TrackerEvent) -> Result<(), TrackerError>;
}

/// Emits each event as a structured `tracing` record.
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn send(&self, event: &TrackerEvent) -> Result<(), TrackerError> {
        let payload = serde_json::to_string(event)?;
        tracing::info!(event_type = event.event_type(), %payload, "tracker event");
        Ok(())
    }
}

/// Keeps events in a shared in-memory buffer.
///
/// Clones share the buffer, so an embedder can keep one handle and give the
/// other to the dispatcher.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<TrackerEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    pub fn events(&self) -> Vec<TrackerEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Event type names, in arrival order.
    pub fn event_types(&self) -> Vec<String> {
        self.events()
            .iter()
            .map(|e| e.event_type().to_string())
            .collect()
    }
}

impl NotificationSink for MemorySink {
    fn send(&self, event: &TrackerEvent) -> Result<(), TrackerError> {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
        Ok(())
    }
}

/// Dispatches events to multiple sinks.
///
/// Errors from individual sinks are logged (via tracing) but don't
/// prevent other sinks from receiving the event.
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    /// Create a new dispatcher with no sinks.
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Add a notification sink.
    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    /// Dispatch an event to all sinks.
    pub fn dispatch(&self, event: &TrackerEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.send(event) {
                tracing::warn!("notification sink error: {}", e);
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
