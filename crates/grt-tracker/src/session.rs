// session.rs - SessionState: the single-owner state of one tracker session.
//
// The state machine has two states:
//   Browsing --select(p)--> Editing(p) --back--> Browsing
// There is no Editing → Editing shortcut; the student goes back first.
//
// Both transitions reset the draft and the suggestion list. Suggestion
// requests are tracked with a ticket so that a result arriving after the
// student moved to another principle can be recognized as stale.

use std::fmt;

use grt_catalog::Principle;
use grt_suggest::SuggestError;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::submit::Submission;

/// Maximum number of suggestions kept from one response.
pub const MAX_SUGGESTIONS: usize = 3;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Principle picker, nothing selected.
    #[default]
    Browsing,

    /// Goal editor for the given principle.
    Editing(&'static Principle),
}

impl Selection {
    /// The selected principle, if any.
    pub fn principle(&self) -> Option<&'static Principle> {
        match self {
            Selection::Browsing => None,
            Selection::Editing(p) => Some(p),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Browsing => write!(f, "browsing"),
            Selection::Editing(p) => write!(f, "editing({})", p.id),
        }
    }
}

/// What to do with suggestions that resolve after the selection changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleResultPolicy {
    /// Drop results whose principle is no longer the selected one; only the
    /// loading flag is cleared.
    #[default]
    Discard,

    /// Write them into whatever the current state is.
    Apply,
}

/// Identifies one outstanding suggestion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionTicket {
    /// Session generation when the request was issued.
    pub generation: u64,

    /// Principle the request was issued for.
    pub principle_id: &'static str,
}

/// How a suggestion result was folded into the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    /// The suggestion list was replaced.
    Applied { count: usize },

    /// The result (or failure) was for a principle no longer selected, or
    /// for an unknown ticket, and was dropped.
    Discarded,

    /// The provider failed; the list was left empty.
    Failed { message: String },
}

/// State of one browsing session. Nothing here outlives the process.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    selection: Selection,
    goal_text: String,
    suggestions: Vec<String>,
    is_loading_suggestions: bool,
    generation: u64,
    in_flight: Option<SuggestionTicket>,
}

impl SessionState {
    /// Fresh session on the principle picker.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_principle(&self) -> Option<&'static Principle> {
        self.selection.principle()
    }

    pub fn goal_text(&self) -> &str {
        &self.goal_text
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn is_loading_suggestions(&self) -> bool {
        self.is_loading_suggestions
    }

    /// Select a principle and open the goal editor.
    pub fn select(&mut self, principle_id: &str) -> Result<&'static Principle, TrackerError> {
        let principle = grt_catalog::find(principle_id)
            .ok_or_else(|| TrackerError::UnknownPrinciple(principle_id.to_string()))?;

        if let Selection::Editing(current) = self.selection {
            return Err(TrackerError::InvalidTransition {
                from: format!("editing({})", current.id),
                to: format!("editing({})", principle.id),
            });
        }

        self.selection = Selection::Editing(principle);
        self.reset_draft();
        self.generation += 1;
        Ok(principle)
    }

    /// Return to the principle picker, discarding the draft and suggestions.
    ///
    /// An outstanding suggestion request keeps the loading flag set until it
    /// resolves.
    pub fn back(&mut self) -> Result<&'static Principle, TrackerError> {
        let Selection::Editing(previous) = self.selection else {
            return Err(TrackerError::InvalidTransition {
                from: Selection::Browsing.to_string(),
                to: Selection::Browsing.to_string(),
            });
        };

        self.selection = Selection::Browsing;
        self.reset_draft();
        self.generation += 1;
        Ok(previous)
    }

    /// Overwrite the draft (keystroke edits).
    pub fn set_goal_text(&mut self, text: impl Into<String>) {
        self.goal_text = text.into();
    }

    /// Overwrite the draft with a suggestion, verbatim.
    pub fn accept_suggestion(&mut self, suggestion: &str) {
        self.goal_text = suggestion.to_string();
    }

    /// Accept the suggestion at `index` in the current list.
    pub fn accept_suggestion_at(&mut self, index: usize) -> Result<&str, TrackerError> {
        let suggestion = self
            .suggestions
            .get(index)
            .cloned()
            .ok_or(TrackerError::SuggestionIndex {
                index,
                len: self.suggestions.len(),
            })?;
        self.goal_text = suggestion;
        Ok(&self.goal_text)
    }

    /// Whether the "get suggestions" control is enabled.
    pub fn can_request_suggestions(&self) -> bool {
        self.selected_principle().is_some() && !self.is_loading_suggestions
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.selected_principle().is_some() && !self.goal_text.trim().is_empty()
    }

    /// Mark a suggestion request as in flight and hand out its ticket.
    pub fn begin_suggestions(&mut self) -> Result<SuggestionTicket, TrackerError> {
        let principle = self.selected_principle().ok_or(TrackerError::NoSelection)?;
        if self.is_loading_suggestions {
            return Err(TrackerError::RequestInFlight);
        }

        let ticket = SuggestionTicket {
            generation: self.generation,
            principle_id: principle.id,
        };
        self.is_loading_suggestions = true;
        self.in_flight = Some(ticket);
        Ok(ticket)
    }

    /// Fold a resolved suggestion request back into the state.
    ///
    /// A result is current when its principle is the one selected now, even
    /// if the student went back and re-selected it meanwhile. Current results
    /// replace the list (never append); a current failure empties it. Stale
    /// results are written only under [`StaleResultPolicy::Apply`], and stale
    /// failures are always dropped.
    pub fn finish_suggestions(
        &mut self,
        ticket: SuggestionTicket,
        result: Result<Vec<String>, SuggestError>,
        policy: StaleResultPolicy,
    ) -> SuggestionOutcome {
        if self.in_flight != Some(ticket) {
            tracing::warn!(
                generation = ticket.generation,
                principle_id = ticket.principle_id,
                "ignoring result for a request that is not in flight"
            );
            return SuggestionOutcome::Discarded;
        }

        self.in_flight = None;
        self.is_loading_suggestions = false;

        let current = self.selected_principle().map(|p| p.id) == Some(ticket.principle_id);
        let mut suggestions = match result {
            Ok(suggestions) => suggestions,
            Err(e) if current => {
                self.suggestions.clear();
                return SuggestionOutcome::Failed {
                    message: e.to_string(),
                };
            }
            Err(e) => {
                tracing::debug!(
                    principle_id = ticket.principle_id,
                    current = %self.selection,
                    "ignoring failure for a principle no longer selected: {}",
                    e
                );
                return SuggestionOutcome::Discarded;
            }
        };

        if !current && policy == StaleResultPolicy::Discard {
            tracing::debug!(
                principle_id = ticket.principle_id,
                current = %self.selection,
                "discarding stale suggestions"
            );
            return SuggestionOutcome::Discarded;
        }

        suggestions.truncate(MAX_SUGGESTIONS);
        self.suggestions = suggestions;
        SuggestionOutcome::Applied {
            count: self.suggestions.len(),
        }
    }

    /// Check the submit precondition and capture what would be submitted.
    ///
    /// Does not modify the state; call [`SessionState::clear_draft`] once the
    /// submission has been accepted.
    pub fn prepare_submission(&self) -> Result<Submission, TrackerError> {
        let principle = self.selected_principle().ok_or(TrackerError::NoSelection)?;
        if self.goal_text.trim().is_empty() {
            return Err(TrackerError::EmptyDraft);
        }
        Ok(Submission::new(principle, &self.goal_text))
    }

    /// Clear the draft and suggestions, keeping the selection.
    pub fn clear_draft(&mut self) {
        self.reset_draft();
    }

    fn reset_draft(&mut self) {
        self.goal_text.clear();
        self.suggestions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing(id: &str) -> SessionState {
        let mut state = SessionState::new();
        state.select(id).unwrap();
        state
    }

    fn resolve(state: &mut SessionState, ticket: SuggestionTicket, policy: StaleResultPolicy) -> SuggestionOutcome {
        let result = Ok(grt_suggest::suggestions_for(ticket.principle_id));
        state.finish_suggestions(ticket, result, policy)
    }

    #[test]
    fn new_session_starts_browsing_and_empty() {
        let state = SessionState::new();
        assert_eq!(state.selection(), Selection::Browsing);
        assert_eq!(state.goal_text(), "");
        assert!(state.suggestions().is_empty());
        assert!(!state.is_loading_suggestions());
        assert!(!state.can_submit());
        assert!(!state.can_request_suggestions());
    }

    #[test]
    fn selecting_each_principle_opens_empty_editor() {
        for principle in grt_catalog::all() {
            let state = editing(principle.id);
            assert_eq!(state.selected_principle(), Some(principle));
            assert_eq!(state.goal_text(), "");
            assert!(state.suggestions().is_empty());
        }
    }

    #[test]
    fn select_unknown_principle_is_rejected() {
        let mut state = SessionState::new();
        let result = state.select("kindness");
        assert!(matches!(result, Err(TrackerError::UnknownPrinciple(id)) if id == "kindness"));
        assert_eq!(state.selection(), Selection::Browsing);
    }

    #[test]
    fn select_while_editing_is_invalid() {
        let mut state = editing("i-matter");
        state.set_goal_text("keep this");

        let result = state.select("strategies");

        assert!(matches!(result, Err(TrackerError::InvalidTransition { .. })));
        assert_eq!(state.selected_principle().unwrap().id, "i-matter");
        assert_eq!(state.goal_text(), "keep this");
    }

    #[test]
    fn back_resets_draft_and_suggestions() {
        let mut state = editing("considerate");
        let ticket = state.begin_suggestions().unwrap();
        resolve(&mut state, ticket, StaleResultPolicy::Discard);
        state.accept_suggestion_at(0).unwrap();
        assert!(!state.suggestions().is_empty());

        let left = state.back().unwrap();

        assert_eq!(left.id, "considerate");
        assert_eq!(state.selection(), Selection::Browsing);
        assert_eq!(state.goal_text(), "");
        assert!(state.suggestions().is_empty());
    }

    #[test]
    fn back_while_browsing_is_invalid() {
        let mut state = SessionState::new();
        let result = state.back();
        assert!(matches!(result, Err(TrackerError::InvalidTransition { .. })));
    }

    #[test]
    fn tickets_carry_navigation_generation() {
        let mut state = SessionState::new();
        state.select("i-matter").unwrap();
        state.back().unwrap();
        state.select("strategies").unwrap();

        let ticket = state.begin_suggestions().unwrap();

        assert_eq!(ticket.generation, 3);
        assert_eq!(ticket.principle_id, "strategies");
    }

    #[test]
    fn set_goal_text_overwrites() {
        let mut state = editing("responsibility");
        state.set_goal_text("first");
        state.set_goal_text("second");
        assert_eq!(state.goal_text(), "second");
    }

    #[test]
    fn accept_suggestion_replaces_rather_than_appends() {
        let mut state = editing("strategies");
        let ticket = state.begin_suggestions().unwrap();
        resolve(&mut state, ticket, StaleResultPolicy::Discard);

        let suggestions = state.suggestions().to_vec();
        for s in &suggestions {
            state.set_goal_text("draft in progress");
            state.accept_suggestion(s);
            assert_eq!(state.goal_text(), s);
        }
    }

    #[test]
    fn accept_suggestion_at_out_of_range() {
        let mut state = editing("strategies");
        let result = state.accept_suggestion_at(0);
        assert!(matches!(
            result,
            Err(TrackerError::SuggestionIndex { index: 0, len: 0 })
        ));
    }

    #[test]
    fn begin_suggestions_requires_selection() {
        let mut state = SessionState::new();
        assert!(matches!(
            state.begin_suggestions(),
            Err(TrackerError::NoSelection)
        ));
    }

    #[test]
    fn second_request_while_loading_is_rejected() {
        let mut state = editing("i-matter");
        let ticket = state.begin_suggestions().unwrap();
        assert!(state.is_loading_suggestions());
        assert!(!state.can_request_suggestions());

        assert!(matches!(
            state.begin_suggestions(),
            Err(TrackerError::RequestInFlight)
        ));

        resolve(&mut state, ticket, StaleResultPolicy::Discard);
        assert!(!state.is_loading_suggestions());
        assert!(state.can_request_suggestions());
    }

    #[test]
    fn resolution_replaces_previous_suggestions() {
        let mut state = editing("i-matter");
        let first = state.begin_suggestions().unwrap();
        resolve(&mut state, first, StaleResultPolicy::Discard);

        let second = state.begin_suggestions().unwrap();
        let outcome = state.finish_suggestions(
            second,
            Ok(vec!["only one".to_string()]),
            StaleResultPolicy::Discard,
        );

        assert_eq!(outcome, SuggestionOutcome::Applied { count: 1 });
        assert_eq!(state.suggestions(), ["only one".to_string()]);
    }

    #[test]
    fn oversized_response_is_truncated() {
        let mut state = editing("i-matter");
        let ticket = state.begin_suggestions().unwrap();
        let many: Vec<String> = (0..5).map(|i| format!("goal {i}")).collect();

        let outcome = state.finish_suggestions(ticket, Ok(many), StaleResultPolicy::Discard);

        assert_eq!(outcome, SuggestionOutcome::Applied { count: MAX_SUGGESTIONS });
        assert_eq!(state.suggestions().len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn stale_result_is_discarded_by_default() {
        let mut state = editing("i-matter");
        let ticket = state.begin_suggestions().unwrap();
        state.back().unwrap();
        assert!(state.is_loading_suggestions());

        let outcome = resolve(&mut state, ticket, StaleResultPolicy::Discard);

        assert_eq!(outcome, SuggestionOutcome::Discarded);
        assert!(!state.is_loading_suggestions());
        assert!(state.suggestions().is_empty());
    }

    #[test]
    fn stale_result_discarded_after_reselecting_other_principle() {
        let mut state = editing("i-matter");
        let ticket = state.begin_suggestions().unwrap();
        state.back().unwrap();
        state.select("strategies").unwrap();

        // Loading flag survives navigation, so no second request yet.
        assert!(!state.can_request_suggestions());

        let outcome = resolve(&mut state, ticket, StaleResultPolicy::Discard);
        assert_eq!(outcome, SuggestionOutcome::Discarded);
        assert!(state.suggestions().is_empty());
        assert!(state.can_request_suggestions());
    }

    #[test]
    fn stale_result_applied_under_apply_policy() {
        let mut state = editing("i-matter");
        let ticket = state.begin_suggestions().unwrap();
        state.back().unwrap();

        let outcome = resolve(&mut state, ticket, StaleResultPolicy::Apply);

        assert_eq!(outcome, SuggestionOutcome::Applied { count: 3 });
        assert_eq!(state.selection(), Selection::Browsing);
        assert_eq!(
            state.suggestions()[0],
            "I will practice positive self-talk every morning"
        );
    }

    #[test]
    fn unknown_ticket_does_not_touch_loading_flag() {
        let mut state = editing("i-matter");
        let real = state.begin_suggestions().unwrap();
        let forged = SuggestionTicket {
            generation: real.generation + 7,
            principle_id: "i-matter",
        };

        let outcome = resolve(&mut state, forged, StaleResultPolicy::Apply);

        assert_eq!(outcome, SuggestionOutcome::Discarded);
        assert!(state.is_loading_suggestions());
    }

    #[test]
    fn provider_failure_clears_loading_and_leaves_list_empty() {
        let mut state = editing("considerate");
        let ticket = state.begin_suggestions().unwrap();

        let outcome = state.finish_suggestions(
            ticket,
            Err(SuggestError::Unavailable("timeout".to_string())),
            StaleResultPolicy::Discard,
        );

        assert!(matches!(outcome, SuggestionOutcome::Failed { message } if message.contains("timeout")));
        assert!(!state.is_loading_suggestions());
        assert!(state.suggestions().is_empty());
    }

    #[test]
    fn failure_after_success_empties_the_list() {
        let mut state = editing("i-matter");
        let first = state.begin_suggestions().unwrap();
        resolve(&mut state, first, StaleResultPolicy::Discard);
        assert_eq!(state.suggestions().len(), 3);

        let second = state.begin_suggestions().unwrap();
        let outcome = state.finish_suggestions(
            second,
            Err(SuggestError::Unavailable("offline".to_string())),
            StaleResultPolicy::Discard,
        );

        assert!(matches!(outcome, SuggestionOutcome::Failed { .. }));
        assert!(state.suggestions().is_empty());
        assert!(!state.is_loading_suggestions());
    }

    #[test]
    fn reselecting_same_principle_keeps_its_result() {
        let mut state = editing("responsibility");
        let ticket = state.begin_suggestions().unwrap();
        state.back().unwrap();
        state.select("responsibility").unwrap();

        let outcome = resolve(&mut state, ticket, StaleResultPolicy::Discard);

        assert_eq!(outcome, SuggestionOutcome::Applied { count: 3 });
        assert_eq!(
            state.suggestions()[0],
            "I will complete my homework before recreational activities"
        );
        assert!(!state.is_loading_suggestions());
    }

    #[test]
    fn failure_for_principle_no_longer_selected_is_dropped() {
        for policy in [StaleResultPolicy::Discard, StaleResultPolicy::Apply] {
            let mut state = editing("considerate");
            let ticket = state.begin_suggestions().unwrap();
            state.back().unwrap();

            let outcome = state.finish_suggestions(
                ticket,
                Err(SuggestError::Unavailable("timeout".to_string())),
                policy,
            );

            assert_eq!(outcome, SuggestionOutcome::Discarded);
            assert!(!state.is_loading_suggestions());
        }
    }

    #[test]
    fn submit_is_disabled_for_blank_drafts() {
        let mut state = editing("responsibility");
        for blank in ["", " ", "\t\n", "   \n  "] {
            state.set_goal_text(blank);
            assert!(!state.can_submit());
            assert!(matches!(
                state.prepare_submission(),
                Err(TrackerError::EmptyDraft)
            ));
        }
    }

    #[test]
    fn prepare_submission_keeps_untrimmed_text_and_state() {
        let mut state = editing("responsibility");
        state.set_goal_text("  tidy my desk ");

        let submission = state.prepare_submission().unwrap();

        assert_eq!(submission.goal_text, "  tidy my desk ");
        assert_eq!(submission.principle_name, "Responsibility");
        assert_eq!(state.goal_text(), "  tidy my desk ");
    }

    #[test]
    fn clear_draft_keeps_selection() {
        let mut state = editing("strategies");
        state.set_goal_text("plan my week");
        state.clear_draft();
        assert_eq!(state.goal_text(), "");
        assert_eq!(state.selected_principle().unwrap().id, "strategies");
    }

    #[test]
    fn selection_display_format() {
        assert_eq!(Selection::Browsing.to_string(), "browsing");
        let p = grt_catalog::find("considerate").unwrap();
        assert_eq!(Selection::Editing(p).to_string(), "editing(considerate)");
    }
}
