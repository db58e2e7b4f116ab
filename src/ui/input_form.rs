use crate::app::{AppState, FormTarget};
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for adding and renaming tasks
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let title_text = match form.target {
            FormTarget::NewTask => " Add Task ",
            FormTarget::NewChild(_) => " Add Subtask ",
            FormTarget::Rename(_) => " Rename Task ",
        };

        let mut lines = Vec::new();
        lines.push(Line::raw(""));
        lines.push(Line::raw("Name:"));
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(&form.text, modal_title_style()),
            Span::styled("█", modal_title_style()), // Cursor
        ]));
        lines.push(Line::raw(""));

        // Renames keep the existing clock, so no duration field
        if !matches!(form.target, FormTarget::Rename(_)) {
            lines.push(Line::from(vec![
                Span::raw("Duration: "),
                Span::styled(format!("{}m", form.minutes), modal_title_style()),
                Span::raw("  (↑/↓ adjust)"),
            ]));
            lines.push(Line::raw(""));
        }

        lines.push(Line::raw("Enter to submit  ·  Esc to cancel"));
        if matches!(form.target, FormTarget::NewTask) {
            lines.push(Line::raw(""));
            lines.push(Line::raw("Start the name with '+' to create a parent task"));
        }

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title_text, modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
