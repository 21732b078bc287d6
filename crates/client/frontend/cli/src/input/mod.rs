//! Input processing for the CLI client.
//!
//! This module owns the keyboard-to-intent mapping so the rest of the
//! application can remain agnostic about concrete key bindings or the
//! specifics of `crossterm` events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use runtime::{Intent, SyncState};

use client_frontend_core::view_model::PagerView;

use crate::state::AppState;

/// High-level outcome of processing a keyboard event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Submit the intent to the runtime.
    Submit(Intent),
    /// Only local UI state changed.
    Redraw,
    /// No meaningful command was produced.
    None,
}

/// Translates `KeyEvent`s into intents based on the current mode and snapshot.
#[derive(Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Converts a raw key event into a higher-level command.
    pub fn handle_key(&self, key: KeyEvent, app: &mut AppState, state: &SyncState) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if app.is_adding() {
            self.handle_input_key(key, app)
        } else {
            self.handle_normal_key(key, app, state)
        }
    }

    fn handle_normal_key(&self, key: KeyEvent, app: &mut AppState, state: &SyncState) -> KeyAction {
        match key.code {
            KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
                'q' => KeyAction::Quit,
                'c' => self.claim(state),
                'a' => {
                    app.start_adding();
                    KeyAction::Redraw
                }
                'r' => KeyAction::Submit(Intent::ChangeLimit(state.pagination.limit().cycle())),
                'k' => self.move_selection(state, -1),
                'j' => self.move_selection(state, 1),
                'h' => self.prev_page(state),
                'l' => self.next_page(state),
                _ => KeyAction::None,
            },
            KeyCode::Enter => self.claim(state),
            KeyCode::Up => self.move_selection(state, -1),
            KeyCode::Down => self.move_selection(state, 1),
            KeyCode::Left => self.prev_page(state),
            KeyCode::Right => self.next_page(state),
            _ => KeyAction::None,
        }
    }

    fn handle_input_key(&self, key: KeyEvent, app: &mut AppState) -> KeyAction {
        match key.code {
            KeyCode::Enter => match app.submission() {
                Some(name) => KeyAction::Submit(Intent::Add(name)),
                None => KeyAction::None,
            },
            KeyCode::Esc => {
                app.cancel_adding();
                KeyAction::Redraw
            }
            KeyCode::Backspace => {
                if let Some(input) = app.input_mut() {
                    input.pop();
                }
                KeyAction::Redraw
            }
            KeyCode::Char(ch) => {
                if let Some(input) = app.input_mut() {
                    input.push(ch);
                }
                KeyAction::Redraw
            }
            _ => KeyAction::None,
        }
    }

    /// Claiming while a claim runs is ignored; without a selection the
    /// runtime answers with a notice.
    fn claim(&self, state: &SyncState) -> KeyAction {
        if state.is_claiming() {
            KeyAction::None
        } else {
            KeyAction::Submit(Intent::Claim)
        }
    }

    /// Walk the users list in directory order, wrapping at both ends.
    fn move_selection(&self, state: &SyncState, step: isize) -> KeyAction {
        let count = state.users.len();
        if count == 0 {
            return KeyAction::None;
        }

        let current = state
            .selection
            .as_ref()
            .and_then(|id| state.users.iter().position(|user| &user.id == id));

        let next = match current {
            Some(index) => (index as isize + step).rem_euclid(count as isize) as usize,
            None if step < 0 => count - 1,
            None => 0,
        };

        KeyAction::Submit(Intent::Select(Some(state.users[next].id.clone())))
    }

    fn prev_page(&self, state: &SyncState) -> KeyAction {
        match PagerView::from_state(state).prev_page() {
            Some(page) => KeyAction::Submit(Intent::ChangePage(page)),
            None => KeyAction::None,
        }
    }

    fn next_page(&self, state: &SyncState) -> KeyAction {
        match PagerView::from_state(state).next_page() {
            Some(page) => KeyAction::Submit(Intent::ChangePage(page)),
            None => KeyAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_gateway_core::{HistoryPage, User, UserId};
    use crossterm::event::{KeyEventKind, KeyEventState};
    use runtime::{Busy, PageSize};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn state() -> SyncState {
        let mut state = SyncState::new(PageSize::Five);
        state.users = ["Ada", "Bo", "Cy"]
            .iter()
            .enumerate()
            .map(|(i, name)| User {
                id: UserId::new(format!("u{}", i + 1)),
                name: name.to_string(),
                total_points: 0,
            })
            .collect();
        state.history = HistoryPage {
            items: Vec::new(),
            total: 12,
        };
        state
    }

    #[test]
    fn arrows_walk_users_and_wrap() {
        let handler = InputHandler::new();
        let mut app = AppState::new();
        let mut state = state();

        assert_eq!(
            handler.handle_key(key(KeyCode::Down), &mut app, &state),
            KeyAction::Submit(Intent::Select(Some(UserId::from("u1"))))
        );

        state.selection = Some(UserId::from("u1"));
        assert_eq!(
            handler.handle_key(key(KeyCode::Up), &mut app, &state),
            KeyAction::Submit(Intent::Select(Some(UserId::from("u3"))))
        );
    }

    #[test]
    fn paging_respects_bounds() {
        let handler = InputHandler::new();
        let mut app = AppState::new();
        let mut state = state();

        assert_eq!(
            handler.handle_key(key(KeyCode::Left), &mut app, &state),
            KeyAction::None
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Right), &mut app, &state),
            KeyAction::Submit(Intent::ChangePage(2))
        );

        state.pagination.set_page(3);
        assert_eq!(
            handler.handle_key(key(KeyCode::Right), &mut app, &state),
            KeyAction::None
        );

        state.pagination.set_page(2);
        state.busy = Busy::HISTORY_LOADING;
        assert_eq!(
            handler.handle_key(key(KeyCode::Left), &mut app, &state),
            KeyAction::None
        );
    }

    #[test]
    fn rows_key_cycles_page_size() {
        let handler = InputHandler::new();
        let mut app = AppState::new();
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('r')), &mut app, &state()),
            KeyAction::Submit(Intent::ChangeLimit(PageSize::Ten))
        );
    }

    #[test]
    fn claim_is_ignored_while_claiming() {
        let handler = InputHandler::new();
        let mut app = AppState::new();
        let mut state = state();

        assert_eq!(
            handler.handle_key(key(KeyCode::Char('c')), &mut app, &state),
            KeyAction::Submit(Intent::Claim)
        );

        state.busy = Busy::CLAIMING;
        assert_eq!(
            handler.handle_key(key(KeyCode::Enter), &mut app, &state),
            KeyAction::None
        );
    }

    #[test]
    fn add_user_input_collects_and_submits() {
        let handler = InputHandler::new();
        let mut app = AppState::new();
        let state = state();

        assert_eq!(
            handler.handle_key(key(KeyCode::Char('a')), &mut app, &state),
            KeyAction::Redraw
        );
        for ch in "Alicq".chars() {
            handler.handle_key(key(KeyCode::Char(ch)), &mut app, &state);
        }
        handler.handle_key(key(KeyCode::Backspace), &mut app, &state);
        handler.handle_key(key(KeyCode::Char('e')), &mut app, &state);
        assert_eq!(app.input(), Some("Alice"));

        assert_eq!(
            handler.handle_key(key(KeyCode::Enter), &mut app, &state),
            KeyAction::Submit(Intent::Add("Alice".into()))
        );
        // Kept for a retry until the server confirms the user.
        assert_eq!(app.input(), Some("Alice"));

        // 'q' is text while typing, not quit.
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('q')), &mut app, &state),
            KeyAction::Redraw
        );
    }

    #[test]
    fn escape_cancels_input() {
        let handler = InputHandler::new();
        let mut app = AppState::new();
        let state = state();

        app.start_adding();
        handler.handle_key(key(KeyCode::Char('x')), &mut app, &state);
        handler.handle_key(key(KeyCode::Esc), &mut app, &state);
        assert!(!app.is_adding());
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('q')), &mut app, &state),
            KeyAction::Quit
        );
    }
}
