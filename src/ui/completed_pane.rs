use crate::app::AppState;
use crate::domain::{format_countdown, Task};
use crate::ui::styles::{
    border_style, default_style, done_style, parent_style, title_style, tree_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Build one completed-task row
fn create_completed_line(task: &Task, indented: bool) -> Line {
    let mut spans = Vec::new();

    if indented {
        spans.push(Span::styled("   ", tree_style()));
    }

    spans.push(Span::styled("✓ ", done_style()));
    spans.push(Span::styled(task.text.as_str(), default_style()));
    if let Some(countdown) = task.countdown() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("({})", format_countdown(countdown.initial)),
            done_style(),
        ));
    }

    Line::from(spans)
}

/// Render the completed tasks pane, grouped by resolved parent so each
/// finished subtask appears under its parent's label.
pub fn render_completed_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let completed = app.store.completed_tasks();
    let groups = app.store.group_by_parent(&completed);

    let mut items: Vec<ListItem> = Vec::new();
    for group in &groups {
        match group.parent {
            Some(parent) => {
                items.push(ListItem::new(Line::from(Span::styled(
                    format!("▸ {}", parent.text),
                    parent_style(),
                ))));
                for &task in &group.tasks {
                    items.push(ListItem::new(create_completed_line(task, true)));
                }
            }
            None => {
                for &task in &group.tasks {
                    items.push(ListItem::new(create_completed_line(task, false)));
                }
            }
        }
    }

    let title = format!(" Completed ({}) ", completed.len());

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}
