pub mod active_pane;
pub mod completed_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod status_bar;
pub mod styles;

use crate::app::AppState;
use active_pane::render_active_pane;
use completed_pane::render_completed_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use ratatui::Frame;
use status_bar::render_status_bar;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size, app.show_completed);

    render_keybindings(f, layout.keybindings_area);
    render_active_pane(f, app, layout.active_area);

    if let Some(completed_area) = layout.completed_area {
        render_completed_pane(f, app, completed_area);
    }

    render_status_bar(f, app, layout.status_area);

    // Input form floats over everything when open
    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }
}
