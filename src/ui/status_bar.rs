use crate::app::AppState;
use crate::ui::styles::{banner_style, hint_style};
use ratatui::{layout::Rect, text::Span, widgets::Paragraph, Frame};

/// Render the bottom status bar: the time-up banner when a countdown just
/// finished, otherwise a quiet task count.
pub fn render_status_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let paragraph = if let Some(text) = &app.finished_banner {
        Paragraph::new(Span::styled(
            format!(" ⏰ Time up: {} — press 'd' to complete it ", text),
            banner_style(),
        ))
    } else {
        let active = app.store.active_tasks().len();
        let completed = app.store.completed_tasks().len();
        Paragraph::new(Span::styled(
            format!(" {} active · {} completed ", active, completed),
            hint_style(),
        ))
    };

    f.render_widget(paragraph, area);
}
