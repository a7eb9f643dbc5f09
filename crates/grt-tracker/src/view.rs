// view.rs - Renderer-independent screen model.
//
// A front end calls `View::from_state` after every event and draws the
// result. All user-facing copy and control enablement lives here so every
// renderer shows the same text and disables the same controls.

use grt_catalog::Principle;

use crate::session::{Selection, SessionState};

pub const APP_TITLE: &str = "Goal Reflection Tracker";
pub const APP_SUBTITLE: &str = "Choose a RICH principle to set a meaningful goal that will help you grow!";
pub const BACK_LABEL: &str = "Back to Principles";
pub const SUGGEST_LABEL: &str = "Get AI Suggestions";
pub const SUGGEST_LOADING_LABEL: &str = "Getting Ideas...";
pub const SUGGESTIONS_HEADER: &str = "Here are some ideas to inspire you:";
pub const SUGGESTION_HINT: &str = "Click to use this suggestion";
pub const SUBMIT_LABEL: &str = "Submit My Goal";

/// What to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Principles(PrincipleList),
    Editor(EditorView),
}

/// The principle picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipleList {
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Badge row letters with the principle whose colors they use.
    pub badges: Vec<(char, &'static Principle)>,
    pub principles: &'static [Principle],
}

/// The goal editor for one principle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub principle: &'static Principle,
    pub back_label: &'static str,
    pub heading: String,
    pub prompt: String,
    pub placeholder: String,
    pub goal_text: String,
    pub suggest_label: &'static str,
    pub suggest_enabled: bool,
    pub suggestions_header: Option<&'static str>,
    pub suggestions: Vec<String>,
    pub suggestion_hint: &'static str,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
}

impl View {
    pub fn from_state(state: &SessionState) -> Self {
        match state.selection() {
            Selection::Browsing => View::Principles(PrincipleList {
                title: APP_TITLE,
                subtitle: APP_SUBTITLE,
                badges: grt_catalog::badges().collect(),
                principles: grt_catalog::all(),
            }),
            Selection::Editing(principle) => View::Editor(EditorView::new(principle, state)),
        }
    }
}

impl EditorView {
    fn new(principle: &'static Principle, state: &SessionState) -> Self {
        let loading = state.is_loading_suggestions();
        let suggestions = state.suggestions().to_vec();
        Self {
            principle,
            back_label: BACK_LABEL,
            heading: format!("Set Your {} Goal", principle.name),
            prompt: format!("What goal would you like to set for {}?", principle.name),
            placeholder: format!("Write your {} goal here...", principle.name.to_lowercase()),
            goal_text: state.goal_text().to_string(),
            suggest_label: if loading {
                SUGGEST_LOADING_LABEL
            } else {
                SUGGEST_LABEL
            },
            suggest_enabled: state.can_request_suggestions(),
            suggestions_header: (!suggestions.is_empty()).then_some(SUGGESTIONS_HEADER),
            suggestions,
            suggestion_hint: SUGGESTION_HINT,
            submit_label: SUBMIT_LABEL,
            submit_enabled: state.can_submit(),
        }
    }
}
