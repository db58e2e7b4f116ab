use crate::app::{AppState, UiMode, ADJUST_STEP_MINUTES};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Form => handle_form_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Any keypress dismisses the time-up banner
    app.finished_banner = None;

    match key.code {
        // Navigation
        KeyCode::Up => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down => {
            app.move_selection_down();
            Ok(false)
        }

        // Start/stop the selected countdown
        KeyCode::Enter => {
            app.toggle_pause_selected();
            Ok(false)
        }

        // Adjust the selected task's clock
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.adjust_selected(ADJUST_STEP_MINUTES);
            Ok(false)
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            app.adjust_selected(-ADJUST_STEP_MINUTES);
            Ok(false)
        }

        // Mark done / not done
        KeyCode::Char('d') | KeyCode::Char('D') => {
            app.toggle_completed_selected();
            Ok(false)
        }

        // Reset the clock to its latest duration
        KeyCode::Char('0') => {
            app.reset_selected();
            Ok(false)
        }

        // Add task / subtask, rename
        KeyCode::Char('a') => {
            app.start_add_task();
            Ok(false)
        }
        KeyCode::Char('A') => {
            app.start_add_child();
            Ok(false)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.start_rename();
            Ok(false)
        }

        // Delete
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
            app.delete_selected();
            Ok(false)
        }

        // Toggle completed pane
        KeyCode::Char('c') | KeyCode::Char('C') => {
            app.toggle_show_completed();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys while the input form is open. Characters go to the text
/// field ('+' included, so parent tasks can be typed); the duration is
/// driven with the arrow keys.
fn handle_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Up => app.input_form_adjust_minutes(true),
        KeyCode::Down => app.input_form_adjust_minutes(false),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStore;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn create_test_app() -> AppState {
        let mut store = TaskStore::in_memory();
        store.add_task("Task 1", 10);
        store.add_task("Task 2", 10);
        AppState::new(store)
    }

    #[test]
    fn test_quit_keys() {
        let mut app = create_test_app();
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))).unwrap());
        assert!(handle_key(&mut app, key(KeyCode::Esc)).unwrap());
        assert!(!handle_key(&mut app, key(KeyCode::Char('z'))).unwrap());
    }

    #[test]
    fn test_enter_toggles_selected() {
        let mut app = create_test_app();
        let id = app.selected_task_id().unwrap();

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.store.get(id).unwrap().is_running());
    }

    #[test]
    fn test_form_keys_reach_text_field() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Form);

        // '+' is text, not a duration adjustment, inside the form
        for c in "+Project".chars() {
            handle_key(&mut app, key(KeyCode::Char(c))).unwrap();
        }
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.store.parent_tasks().len(), 1);
    }

    #[test]
    fn test_form_escape_cancels() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.rows().len(), 2);
    }

    #[test]
    fn test_banner_cleared_on_keypress() {
        let mut app = create_test_app();
        app.finished_banner = Some("Task 1".to_string());

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert!(app.finished_banner.is_none());
    }
}
