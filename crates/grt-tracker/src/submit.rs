// submit.rs - Goal submission and the pluggable submitter seam.
//
// A Submission captures the goal text and principle at the moment the
// student presses submit. A GoalSubmitter decides what happens to it; the
// built-in NoneSubmitter only acknowledges, since sessions keep nothing.

use chrono::{DateTime, Utc};
use grt_catalog::Principle;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors a submitter can report.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The back end refused or could not be reached.
    #[error("goal store unavailable: {0}")]
    Unavailable(String),
}

/// One submitted goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Unique identifier for this submission.
    pub submission_id: Uuid,

    /// Principle the goal was set for.
    pub principle_id: String,

    /// Display name of that principle.
    pub principle_name: String,

    /// The goal text exactly as typed (not trimmed).
    pub goal_text: String,

    /// When the goal was submitted.
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(principle: &Principle, goal_text: impl Into<String>) -> Self {
        Self {
            submission_id: Uuid::new_v4(),
            principle_id: principle.id.to_string(),
            principle_name: principle.name.to_string(),
            goal_text: goal_text.into(),
            submitted_at: Utc::now(),
        }
    }

    /// Acknowledgement shown to the student.
    pub fn confirmation(&self) -> String {
        format!(
            "Goal submitted for {}!\n\n\"{}\"",
            self.principle_name, self.goal_text
        )
    }
}

/// Receipt returned by a submitter on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    /// Back-end reference for the stored goal.
    pub reference: String,

    /// Human-readable message.
    pub message: String,
}

/// Where submitted goals go.
///
/// A failure leaves the draft in place so the student can retry; the
/// error is shown instead of the confirmation.
pub trait GoalSubmitter: Send + Sync {
    /// Hand a goal to the back end.
    fn submit(&self, submission: &Submission) -> Result<SubmitReceipt, SubmitError>;

    /// Submitter display name (for logs).
    fn name(&self) -> &str;
}

/// Acknowledges every submission without storing it.
pub struct NoneSubmitter;

impl NoneSubmitter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoneSubmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl GoalSubmitter for NoneSubmitter {
    fn submit(&self, submission: &Submission) -> Result<SubmitReceipt, SubmitError> {
        tracing::debug!("NoneSubmitter: submit() - no-op");
        Ok(SubmitReceipt {
            reference: format!("none-{}", submission.submission_id),
            message: "Goal acknowledged (not stored)".to_string(),
        })
    }

    fn name(&self) -> &str {
        "none"
    }
}
