use crate::domain::{flatten_active, FlatRow, TaskId, TaskStore};

/// Duration preloaded into the new-task form, in minutes
pub const DEFAULT_TASK_MINUTES: u32 = 10;

/// Smallest duration the form will offer
pub const MIN_FORM_MINUTES: u32 = 5;

/// Step for the form's duration arrows
pub const FORM_MINUTE_STEP: u32 = 5;

/// Step for adjusting an existing task's clock from the list
pub const ADJUST_STEP_MINUTES: i64 = 5;

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Form,
}

/// What the input form will do with its text on submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    NewTask,
    NewChild(TaskId),
    Rename(TaskId),
}

/// Input form state for adding and renaming tasks
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub text: String,
    pub minutes: u32,
    pub target: FormTarget,
}

/// Main application state: the task store plus everything the terminal
/// needs to drive it (selection, form, pane toggles).
pub struct AppState {
    pub store: TaskStore,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub show_completed: bool,
    /// Label of the last countdown that hit zero, shown until the next key
    pub finished_banner: Option<String>,
}

impl AppState {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            show_completed: true,
            finished_banner: None,
        }
    }

    /// The selectable rows, recomputed from the store each time
    pub fn rows(&self) -> Vec<FlatRow> {
        flatten_active(&self.store)
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.rows().get(self.selected_index).map(|row| row.task_id)
    }

    /// Keep the selection inside the list after rows disappear
    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.rows().len() {
            self.selected_index += 1;
        }
    }

    /// Start or hold the selected countdown (parents are no-ops)
    pub fn toggle_pause_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.store.toggle_pause(id);
        }
    }

    pub fn toggle_completed_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.store.toggle_completed(id);
            self.clamp_selection();
        }
    }

    pub fn adjust_selected(&mut self, delta_minutes: i64) {
        if let Some(id) = self.selected_task_id() {
            self.store.adjust_task_time(id, delta_minutes);
        }
    }

    pub fn reset_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.store.reset_task(id);
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.store.delete_task(id);
            self.clamp_selection();
        }
    }

    /// Open the form for a new top-level task
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState {
            text: String::new(),
            minutes: DEFAULT_TASK_MINUTES,
            target: FormTarget::NewTask,
        });
        self.ui_mode = UiMode::Form;
    }

    /// Open the form for a child of the selected parent task. No-op when
    /// the selection is not a parent.
    pub fn start_add_child(&mut self) {
        let Some(id) = self.selected_task_id() else { return };
        if !self.store.get(id).is_some_and(|t| t.is_parent()) {
            return;
        }
        self.input_form = Some(InputFormState {
            text: String::new(),
            minutes: DEFAULT_TASK_MINUTES,
            target: FormTarget::NewChild(id),
        });
        self.ui_mode = UiMode::Form;
    }

    /// Open the form prefilled with the selected task's label
    pub fn start_rename(&mut self) {
        let Some(id) = self.selected_task_id() else { return };
        let Some(task) = self.store.get(id) else { return };
        self.input_form = Some(InputFormState {
            text: task.text.clone(),
            minutes: DEFAULT_TASK_MINUTES,
            target: FormTarget::Rename(id),
        });
        self.ui_mode = UiMode::Form;
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.text.push(c);
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.text.pop();
        }
    }

    /// Step the form's duration up or down, floored at [`MIN_FORM_MINUTES`]
    pub fn input_form_adjust_minutes(&mut self, up: bool) {
        if let Some(form) = &mut self.input_form {
            form.minutes = if up {
                form.minutes.saturating_add(FORM_MINUTE_STEP)
            } else {
                form.minutes.saturating_sub(FORM_MINUTE_STEP).max(MIN_FORM_MINUTES)
            };
        }
    }

    /// Apply the form through the store's command surface. Invalid input
    /// (empty text, stale target) is the store's silent no-op.
    pub fn submit_input_form(&mut self) {
        if let Some(form) = self.input_form.take() {
            match form.target {
                FormTarget::NewTask => {
                    self.store.add_task(&form.text, form.minutes);
                }
                FormTarget::NewChild(parent_id) => {
                    self.store.add_child_task(parent_id, &form.text, form.minutes);
                }
                FormTarget::Rename(id) => {
                    self.store.rename_task(id, &form.text);
                }
            }
            self.ui_mode = UiMode::Normal;
            self.clamp_selection();
        }
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn toggle_show_completed(&mut self) {
        self.show_completed = !self.show_completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_app() -> AppState {
        let mut store = TaskStore::in_memory();
        store.add_task("Task 1", 10);
        store.add_task("Task 2", 25);
        AppState::new(store)
    }

    #[test]
    fn test_app_state_new() {
        let app = create_test_app();
        assert_eq!(app.rows().len(), 2);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
    }

    #[test]
    fn test_move_selection() {
        let mut app = create_test_app();

        app.move_selection_down();
        assert_eq!(app.selected_index, 1);

        // Can't go past the end
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);

        app.move_selection_up();
        assert_eq!(app.selected_index, 0);

        // Can't go below 0
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_toggle_pause_selected() {
        let mut app = create_test_app();
        let id = app.selected_task_id().unwrap();

        app.toggle_pause_selected();
        assert!(app.store.get(id).unwrap().is_running());

        app.toggle_pause_selected();
        assert!(!app.store.get(id).unwrap().is_running());
    }

    #[test]
    fn test_complete_clamps_selection() {
        let mut app = create_test_app();
        app.move_selection_down();

        app.toggle_completed_selected();
        assert_eq!(app.rows().len(), 1);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_delete_last_row_clamps_selection() {
        let mut app = create_test_app();
        app.delete_selected();
        app.delete_selected();
        assert!(app.rows().is_empty());
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_add_task_via_form() {
        let mut app = create_test_app();
        app.start_add_task();
        assert_eq!(app.ui_mode, UiMode::Form);

        for c in "Review notes".chars() {
            app.input_form_add_char(c);
        }
        app.input_form_adjust_minutes(true);
        app.submit_input_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.rows().len(), 3);
        let id = app.rows()[2].task_id;
        let task = app.store.get(id).unwrap();
        assert_eq!(task.text, "Review notes");
        assert_eq!(task.countdown().unwrap().remaining, 15 * 60);
    }

    #[test]
    fn test_form_minutes_floor() {
        let mut app = create_test_app();
        app.start_add_task();

        app.input_form_adjust_minutes(false);
        app.input_form_adjust_minutes(false);
        assert_eq!(app.input_form.as_ref().unwrap().minutes, MIN_FORM_MINUTES);
    }

    #[test]
    fn test_add_child_requires_parent_selection() {
        let mut app = create_test_app();

        // Selection is a timed task: no form opens
        app.start_add_child();
        assert!(app.input_form.is_none());
        assert_eq!(app.ui_mode, UiMode::Normal);

        app.store.add_task("+Project", 10);
        app.selected_index = 2;
        app.start_add_child();
        assert!(app.input_form.is_some());

        for c in "Child".chars() {
            app.input_form_add_char(c);
        }
        app.submit_input_form();

        let parent_id = app.rows()[2].task_id;
        assert_eq!(app.store.children_of(parent_id).len(), 1);
    }

    #[test]
    fn test_rename_via_form() {
        let mut app = create_test_app();
        let id = app.selected_task_id().unwrap();

        app.start_rename();
        let form = app.input_form.as_ref().unwrap();
        assert_eq!(form.text, "Task 1");

        app.input_form_backspace();
        app.input_form_add_char('9');
        app.submit_input_form();

        assert_eq!(app.store.get(id).unwrap().text, "Task 9");
    }

    #[test]
    fn test_cancel_form_changes_nothing() {
        let mut app = create_test_app();
        app.start_add_task();
        app.input_form_add_char('x');
        app.cancel_input_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
        assert_eq!(app.rows().len(), 2);
    }
}
