use crate::ui::styles::hint_style;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" ↑/↓ select   "),
        Span::raw("Enter start/pause   "),
        Span::raw("d done   "),
        Span::raw("+ / - time   "),
        Span::raw("0 reset   "),
        Span::raw("a add (+name = parent)   "),
        Span::raw("A subtask   "),
        Span::raw("r rename   "),
        Span::raw("x delete   "),
        Span::raw("c completed   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
