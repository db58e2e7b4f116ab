use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub active_area: Rect,
    pub completed_area: Option<Rect>,
    pub status_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Active tasks pane, with the completed pane below it when visible
/// - Bottom bar: status / time-up banner (1 row)
pub fn create_layout(area: Rect, show_completed: bool) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let keybindings_area = chunks[0];
    let content_area = chunks[1];
    let status_area = chunks[2];

    if show_completed {
        let content_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(60), // Active pane
                Constraint::Percentage(40), // Completed pane
            ])
            .split(content_area);

        MainLayout {
            keybindings_area,
            active_area: content_chunks[0],
            completed_area: Some(content_chunks[1]),
            status_area,
        }
    } else {
        MainLayout {
            keybindings_area,
            active_area: content_area,
            completed_area: None,
            status_area,
        }
    }
}

/// Create centered modal area (for the input form)
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(12),
            Constraint::Percentage(30),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 50);

        let layout = create_layout(area, false);
        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.status_area.height, 1);
        assert!(layout.active_area.height > 0);
        assert!(layout.completed_area.is_none());

        let layout_with_completed = create_layout(area, true);
        assert!(layout_with_completed.completed_area.is_some());
        assert!(layout_with_completed.active_area.height > 0);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area);

        assert!(modal.width < area.width);
        assert!(modal.height < area.height);
        assert_eq!(modal.height, 12);
    }
}
