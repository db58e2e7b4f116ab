use crate::app::AppState;
use crate::domain::{format_countdown, status_badge, tree_connector, Task};
use crate::ui::styles::{
    border_style, date_style, default_style, hint_style, parent_style, paused_style,
    running_style, selected_style, time_up_style, title_style, tree_style,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

fn badge_style(task: &Task) -> Style {
    match task.countdown() {
        Some(c) if c.remaining == 0 => time_up_style(),
        Some(c) if c.paused => paused_style(),
        Some(_) => running_style(),
        None => parent_style(),
    }
}

/// Build one row of the active list
fn create_task_line<'a>(app: &'a AppState, task: &'a Task, depth: usize, is_last: bool) -> Line<'a> {
    let mut spans = Vec::new();

    if depth > 0 {
        spans.push(Span::styled("   ", tree_style()));
        spans.push(Span::styled(tree_connector(is_last), tree_style()));
        spans.push(Span::raw(" "));
    }

    if task.is_parent() {
        let child_count = app.store.children_of(task.id).len();
        spans.push(Span::styled(format!("▸ {}", task.text), parent_style()));
        spans.push(Span::styled(
            format!("  ({} subtasks)", child_count),
            tree_style(),
        ));
    } else if let Some(countdown) = task.countdown() {
        spans.push(Span::styled(task.text.as_str(), default_style()));
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format_countdown(countdown.remaining),
            badge_style(task),
        ));
        spans.push(Span::raw("  "));
        spans.push(Span::styled(status_badge(task), badge_style(task)));
    }

    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        task.created_at.format("%b %d").to_string(),
        date_style(),
    ));

    Line::from(spans)
}

/// Render the active tasks pane
pub fn render_active_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let rows = app.rows();

    let items: Vec<ListItem> = if rows.is_empty() {
        vec![ListItem::new(Line::from(Span::raw("  Press 'a' to add a task"))).style(hint_style())]
    } else {
        rows.iter()
            .enumerate()
            .filter_map(|(idx, row)| {
                let task = app.store.get(row.task_id)?;
                let line = create_task_line(app, task, row.depth, row.is_last);
                let style = if idx == app.selected_index {
                    selected_style()
                } else {
                    default_style()
                };
                Some(ListItem::new(line).style(style))
            })
            .collect()
    };

    let title = if let Some(running) = app.store.running_task() {
        format!(" Active Tasks — {} running ", running.text)
    } else {
        format!(" Active Tasks ({}) ", rows.len())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}
