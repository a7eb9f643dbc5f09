// tracker.rs - GoalTracker: drives a SessionState from user events and
// asynchronous suggestion results.
//
// All state changes happen on the task that owns the tracker. Suggestion
// fetches run as spawned tokio tasks and report back over a channel; the
// owner pulls completions with `next_completion` and folds them in with
// `apply_completion`. At most one fetch is outstanding because the session
// refuses a second request while loading.

use std::sync::Arc;

use chrono::Utc;
use grt_catalog::Principle;
use grt_suggest::{SuggestError, SuggestionProvider};
use tokio::sync::mpsc;

use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::events::{EventDispatcher, TrackerEvent};
use crate::session::{SessionState, StaleResultPolicy, SuggestionOutcome, SuggestionTicket};
use crate::submit::{GoalSubmitter, NoneSubmitter, Submission};
use crate::view::View;

/// A finished suggestion fetch, waiting to be applied.
#[derive(Debug)]
pub struct SuggestionCompletion {
    pub ticket: SuggestionTicket,
    pub result: Result<Vec<String>, SuggestError>,
}

/// Owns one session and its collaborators.
pub struct GoalTracker {
    state: SessionState,
    provider: Arc<dyn SuggestionProvider>,
    submitter: Box<dyn GoalSubmitter>,
    dispatcher: EventDispatcher,
    stale_policy: StaleResultPolicy,
    completions_tx: mpsc::UnboundedSender<SuggestionCompletion>,
    completions_rx: mpsc::UnboundedReceiver<SuggestionCompletion>,
}

impl GoalTracker {
    /// New session using `provider`, acknowledging submissions without
    /// storing them and discarding stale suggestion results.
    pub fn new(provider: Arc<dyn SuggestionProvider>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            state: SessionState::new(),
            provider,
            submitter: Box::new(NoneSubmitter::new()),
            dispatcher: EventDispatcher::new(),
            stale_policy: StaleResultPolicy::default(),
            completions_tx,
            completions_rx,
        }
    }

    /// New session with the provider and stale policy named in config.
    pub fn from_config(config: &TrackerConfig) -> Result<Self, TrackerError> {
        let provider = grt_suggest::build_provider(&config.suggestions)?;
        Ok(Self::new(provider).with_stale_policy(config.session.stale_results))
    }

    pub fn with_submitter(mut self, submitter: Box<dyn GoalSubmitter>) -> Self {
        self.submitter = submitter;
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: EventDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn with_stale_policy(mut self, policy: StaleResultPolicy) -> Self {
        self.stale_policy = policy;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn stale_policy(&self) -> StaleResultPolicy {
        self.stale_policy
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Current screen model.
    pub fn view(&self) -> View {
        View::from_state(&self.state)
    }

    /// Open the goal editor for a principle.
    pub fn select(&mut self, principle_id: &str) -> Result<&'static Principle, TrackerError> {
        let principle = self.state.select(principle_id)?;
        tracing::info!(principle_id = principle.id, "principle selected");
        self.dispatcher
            .dispatch(&TrackerEvent::principle_selected(principle.id));
        Ok(principle)
    }

    /// Return to the principle picker.
    pub fn back(&mut self) -> Result<(), TrackerError> {
        let previous = self.state.back()?;
        tracing::info!(principle_id = previous.id, "returned to principles");
        self.dispatcher
            .dispatch(&TrackerEvent::returned_to_principles(previous.id));
        Ok(())
    }

    pub fn set_goal_text(&mut self, text: impl Into<String>) {
        self.state.set_goal_text(text);
    }

    pub fn accept_suggestion(&mut self, suggestion: &str) {
        self.state.accept_suggestion(suggestion);
    }

    pub fn accept_suggestion_at(&mut self, index: usize) -> Result<(), TrackerError> {
        self.state.accept_suggestion_at(index).map(|_| ())
    }

    /// Start fetching suggestions for the selected principle.
    ///
    /// Must be called from within a tokio runtime. Fails with
    /// [`TrackerError::RequestInFlight`] while a fetch is outstanding, so
    /// repeated triggers have no further effect.
    pub fn request_suggestions(&mut self) -> Result<SuggestionTicket, TrackerError> {
        let ticket = self.state.begin_suggestions()?;

        let provider = Arc::clone(&self.provider);
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let result = provider.fetch(ticket.principle_id).await;
            // The receiver lives in the tracker; if it is gone nobody cares.
            let _ = tx.send(SuggestionCompletion { ticket, result });
        });

        tracing::info!(
            principle_id = ticket.principle_id,
            provider = self.provider.name(),
            "suggestions requested"
        );
        self.dispatcher.dispatch(&TrackerEvent::SuggestionsRequested {
            principle_id: ticket.principle_id.to_string(),
            generation: ticket.generation,
            provider: self.provider.name().to_string(),
            timestamp: Utc::now(),
        });
        Ok(ticket)
    }

    /// Wait for the next finished fetch.
    pub async fn next_completion(&mut self) -> Option<SuggestionCompletion> {
        self.completions_rx.recv().await
    }

    /// Fold a finished fetch into the session.
    pub fn apply_completion(&mut self, completion: SuggestionCompletion) -> SuggestionOutcome {
        let SuggestionCompletion { ticket, result } = completion;
        let outcome = self
            .state
            .finish_suggestions(ticket, result, self.stale_policy);

        let principle_id = ticket.principle_id.to_string();
        let event = match &outcome {
            SuggestionOutcome::Applied { count } => {
                tracing::info!(principle_id = ticket.principle_id, count, "suggestions applied");
                TrackerEvent::SuggestionsResolved {
                    principle_id,
                    applied: true,
                    count: *count,
                    timestamp: Utc::now(),
                }
            }
            SuggestionOutcome::Discarded => TrackerEvent::SuggestionsResolved {
                principle_id,
                applied: false,
                count: 0,
                timestamp: Utc::now(),
            },
            SuggestionOutcome::Failed { message } => {
                tracing::warn!(principle_id = ticket.principle_id, "suggestions failed: {}", message);
                TrackerEvent::SuggestionsFailed {
                    principle_id,
                    message: message.clone(),
                    timestamp: Utc::now(),
                }
            }
        };
        self.dispatcher.dispatch(&event);
        outcome
    }

    /// Wait for the outstanding fetch and apply it.
    pub async fn resolve_next(&mut self) -> Option<SuggestionOutcome> {
        let completion = self.next_completion().await?;
        Some(self.apply_completion(completion))
    }

    /// Submit the current draft.
    ///
    /// On success the draft and suggestions are cleared and the principle
    /// stays selected. On failure the session is unchanged.
    pub fn submit(&mut self) -> Result<Submission, TrackerError> {
        let submission = self.state.prepare_submission()?;
        let receipt = self.submitter.submit(&submission)?;
        tracing::info!(
            principle_id = %submission.principle_id,
            submitter = self.submitter.name(),
            reference = %receipt.reference,
            "goal submitted: {}",
            receipt.message
        );
        self.state.clear_draft();
        self.dispatcher
            .dispatch(&TrackerEvent::goal_submitted(&submission));
        Ok(submission)
    }
}
