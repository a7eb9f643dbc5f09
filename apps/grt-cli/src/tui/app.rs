// app.rs - Terminal UI state and key handling.
//
// App wraps a GoalTracker with the bits of state only a terminal needs:
// the list cursor, keyboard focus, the confirmation modal and a status line.
// Every tracker operation goes through here so the key map stays in one place.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use grt_tracker::{GoalTracker, Selection, SuggestionCompletion, SuggestionOutcome, TrackerError};

/// Where typed keys go on the editor screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The goal text area.
    #[default]
    Draft,
    /// The suggestion list.
    Suggestions,
}

/// A dismissable message box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub title: String,
    pub body: String,
}

pub struct App {
    pub tracker: GoalTracker,
    /// Highlighted card on the principle picker.
    pub list_cursor: usize,
    pub focus: Focus,
    /// Highlighted suggestion when the list has focus.
    pub suggestion_cursor: usize,
    pub modal: Option<Modal>,
    pub status: Option<String>,
    /// Render principle accent colors.
    pub color: bool,
    /// Animation frame for the loading indicator.
    pub tick: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(tracker: GoalTracker, color: bool) -> Self {
        Self {
            tracker,
            list_cursor: 0,
            focus: Focus::Draft,
            suggestion_cursor: 0,
            modal: None,
            status: None,
            color,
            tick: 0,
            should_quit: false,
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) => self.handle_paste(&text),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.modal.is_some() {
            self.modal = None;
            return;
        }

        match self.tracker.state().selection() {
            Selection::Browsing => self.handle_browsing_key(key),
            Selection::Editing(_) => self.handle_editing_key(key),
        }
    }

    /// Pasted text goes into the draft verbatim.
    pub fn handle_paste(&mut self, text: &str) {
        if self.modal.is_some() || self.focus != Focus::Draft {
            return;
        }
        if self.tracker.state().selected_principle().is_none() {
            return;
        }
        let draft = format!("{}{}", self.tracker.state().goal_text(), text);
        self.tracker.set_goal_text(draft);
    }

    /// Fold a finished suggestion fetch into the session.
    pub fn on_completion(&mut self, completion: SuggestionCompletion) {
        match self.tracker.apply_completion(completion) {
            SuggestionOutcome::Applied { .. } => {
                self.suggestion_cursor = 0;
                self.status = None;
            }
            SuggestionOutcome::Discarded => {}
            SuggestionOutcome::Failed { message } => {
                self.status = Some(format!("Couldn't get ideas: {message}"));
            }
        }
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    fn handle_browsing_key(&mut self, key: KeyEvent) {
        let count = grt_catalog::all().len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.list_cursor = self.list_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.list_cursor = (self.list_cursor + 1).min(count - 1);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if index < count {
                    self.list_cursor = index;
                    self.select_at_cursor();
                }
            }
            KeyCode::Enter => self.select_at_cursor(),
            _ => {}
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.back(),
            KeyCode::Char('g') if ctrl => self.request_suggestions(),
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            _ => match self.focus {
                Focus::Draft => self.edit_draft(key),
                Focus::Suggestions => self.navigate_suggestions(key),
            },
        }
    }

    fn select_at_cursor(&mut self) {
        let Some(principle) = grt_catalog::all().get(self.list_cursor) else {
            return;
        };
        match self.tracker.select(principle.id) {
            Ok(_) => {
                self.focus = Focus::Draft;
                self.suggestion_cursor = 0;
                self.status = None;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn back(&mut self) {
        if let Err(e) = self.tracker.back() {
            tracing::debug!("back ignored: {}", e);
            return;
        }
        self.focus = Focus::Draft;
        self.suggestion_cursor = 0;
        self.status = None;
    }

    fn request_suggestions(&mut self) {
        match self.tracker.request_suggestions() {
            Ok(_) => self.status = None,
            // Disabled control: pressing it again does nothing.
            Err(TrackerError::RequestInFlight) => {}
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn submit(&mut self) {
        match self.tracker.submit() {
            Ok(submission) => {
                self.modal = Some(Modal {
                    title: "Goal submitted".to_string(),
                    body: submission.confirmation(),
                });
                self.focus = Focus::Draft;
                self.suggestion_cursor = 0;
                self.status = None;
            }
            // Disabled control.
            Err(TrackerError::EmptyDraft) => {}
            Err(e) => {
                self.modal = Some(Modal {
                    title: "Goal not submitted".to_string(),
                    body: e.to_string(),
                });
            }
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Draft if !self.tracker.state().suggestions().is_empty() => Focus::Suggestions,
            _ => Focus::Draft,
        };
    }

    fn edit_draft(&mut self, key: KeyEvent) {
        let mut draft = self.tracker.state().goal_text().to_string();
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                draft.push(c);
            }
            KeyCode::Enter => draft.push('\n'),
            KeyCode::Backspace => {
                draft.pop();
            }
            _ => return,
        }
        self.tracker.set_goal_text(draft);
    }

    fn navigate_suggestions(&mut self, key: KeyEvent) {
        let count = self.tracker.state().suggestions().len();
        if count == 0 {
            self.focus = Focus::Draft;
            return;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.suggestion_cursor = self.suggestion_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.suggestion_cursor = (self.suggestion_cursor + 1).min(count - 1);
            }
            KeyCode::Enter => {
                if self
                    .tracker
                    .accept_suggestion_at(self.suggestion_cursor)
                    .is_ok()
                {
                    self.focus = Focus::Draft;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use grt_suggest::MockSuggestionProvider;

    fn app() -> App {
        App::new(
            GoalTracker::new(Arc::new(MockSuggestionProvider::default())),
            true,
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    async fn wait_for_suggestions(app: &mut App) {
        let completion = app.tracker.next_completion().await.unwrap();
        app.on_completion(completion);
    }

    #[test]
    fn arrows_and_enter_select_principle() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);

        let selected = app.tracker.state().selected_principle().unwrap();
        assert_eq!(selected.id, "responsibility");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut app = app();
        press(&mut app, KeyCode::Up);
        assert_eq!(app.list_cursor, 0);
        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.list_cursor, 3);
    }

    #[test]
    fn number_keys_select_directly() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(
            app.tracker.state().selected_principle().unwrap().id,
            "strategies"
        );
    }

    #[test]
    fn typing_edits_the_draft() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        type_text(&mut app, "be kinder");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.tracker.state().goal_text(), "be kind");
    }

    #[test]
    fn ctrl_s_on_blank_draft_does_nothing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        type_text(&mut app, "   ");
        ctrl(&mut app, 's');
        assert!(app.modal.is_none());
        assert_eq!(app.tracker.state().goal_text(), "   ");
    }

    #[test]
    fn submit_shows_confirmation_and_any_key_dismisses() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        type_text(&mut app, "listen first");
        ctrl(&mut app, 's');

        let modal = app.modal.clone().unwrap();
        assert_eq!(modal.body, "Goal submitted for Considerate!\n\n\"listen first\"");
        assert_eq!(app.tracker.state().goal_text(), "");

        // The dismissing key is swallowed, not typed.
        press(&mut app, KeyCode::Char('x'));
        assert!(app.modal.is_none());
        assert_eq!(app.tracker.state().goal_text(), "");
    }

    #[test]
    fn esc_goes_back_then_quits() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "draft");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.tracker.state().selection(), Selection::Browsing);
        assert_eq!(app.tracker.state().goal_text(), "");
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn q_in_editor_is_text_not_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.tracker.state().goal_text(), "q");
    }

    #[test]
    fn paste_appends_to_draft() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        app.handle_event(Event::Paste("hello world".to_string()));
        assert_eq!(app.tracker.state().goal_text(), "hello world");
    }

    #[tokio::test(start_paused = true)]
    async fn suggestion_flow_through_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        ctrl(&mut app, 'g');
        ctrl(&mut app, 'g');
        assert!(app.tracker.state().is_loading_suggestions());

        wait_for_suggestions(&mut app).await;
        assert_eq!(app.tracker.state().suggestions().len(), 3);

        type_text(&mut app, "my own idea");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Suggestions);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.focus, Focus::Draft);
        assert_eq!(
            app.tracker.state().goal_text(),
            "I will keep my commitments to friends and family"
        );
    }

    #[test]
    fn tab_without_suggestions_keeps_draft_focus() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Draft);
    }

    #[test]
    fn ctrl_c_quits_anywhere() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        ctrl(&mut app, 'c');
        assert!(app.should_quit);
    }
}
