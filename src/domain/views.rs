use super::store::TaskStore;
use super::task::{Task, TaskId};

/// One group from [`TaskStore::group_by_parent`]: a resolved parent (or
/// `None` for the ungrouped bucket) and the tasks filed under it.
#[derive(Debug)]
pub struct TaskGroup<'a> {
    pub parent: Option<&'a Task>,
    pub tasks: Vec<&'a Task>,
}

/// A flattened row for rendering the active task list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatRow {
    pub task_id: TaskId,
    /// 0 = top level, 1 = child under its parent
    pub depth: usize,
    /// Whether this is the last child of its parent
    pub is_last: bool,
}

/// Flatten the non-completed tasks into a linear list for rendering and
/// selection: parents with their children indented beneath them, orphans
/// at top level, all in creation order.
pub fn flatten_active(store: &TaskStore) -> Vec<FlatRow> {
    let mut rows = Vec::new();

    for task in store.tasks() {
        if task.completed {
            continue;
        }
        // Children render under their parent, not at top level
        if !task.is_parent() && store.resolved_parent(task).is_some() {
            continue;
        }

        rows.push(FlatRow {
            task_id: task.id,
            depth: 0,
            is_last: false,
        });

        if task.is_parent() {
            let children: Vec<&Task> = store
                .children_of(task.id)
                .into_iter()
                .filter(|c| !c.completed)
                .collect();
            let count = children.len();
            for (idx, child) in children.iter().enumerate() {
                rows.push(FlatRow {
                    task_id: child.id,
                    depth: 1,
                    is_last: idx + 1 == count,
                });
            }
        }
    }

    rows
}

/// Format seconds of countdown as "MM:SS", or "H:MM:SS" past the hour
pub fn format_countdown(secs: u32) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Get status badge text
pub fn status_badge(task: &Task) -> &'static str {
    if task.completed {
        return "✓ DONE";
    }
    match task.countdown() {
        None => "",
        Some(c) if c.remaining == 0 => "⏰ TIME UP",
        Some(c) if c.paused => "⏸ PAUSED",
        Some(_) => "⏱ RUNNING",
    }
}

/// Get tree connector for child rows
pub fn tree_connector(is_last: bool) -> &'static str {
    if is_last {
        "└─"
    } else {
        "├─"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_parents_children_and_orphans() {
        let mut store = TaskStore::in_memory();
        let parent_id = store.add_task("+Project", 10).unwrap();
        let child_a = store.add_child_task(parent_id, "Child A", 10).unwrap();
        let child_b = store.add_child_task(parent_id, "Child B", 10).unwrap();
        let loose = store.add_task("Loose end", 10).unwrap();

        let rows = flatten_active(&store);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].task_id, parent_id);
        assert_eq!(rows[0].depth, 0);
        assert_eq!(rows[1].task_id, child_a);
        assert_eq!(rows[1].depth, 1);
        assert!(!rows[1].is_last);
        assert_eq!(rows[2].task_id, child_b);
        assert!(rows[2].is_last);
        assert_eq!(rows[3].task_id, loose);
        assert_eq!(rows[3].depth, 0);
    }

    #[test]
    fn test_flatten_skips_completed() {
        let mut store = TaskStore::in_memory();
        let parent_id = store.add_task("+Project", 10).unwrap();
        let child_a = store.add_child_task(parent_id, "Child A", 10).unwrap();
        let child_b = store.add_child_task(parent_id, "Child B", 10).unwrap();
        store.toggle_completed(child_a);

        let rows = flatten_active(&store);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].task_id, child_b);
        assert!(rows[1].is_last);
    }

    #[test]
    fn test_flatten_promotes_orphaned_children() {
        let mut store = TaskStore::in_memory();
        let parent_id = store.add_task("+Project", 10).unwrap();
        let child_id = store.add_child_task(parent_id, "Child", 10).unwrap();
        store.delete_task(parent_id);

        let rows = flatten_active(&store);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].task_id, child_id);
        assert_eq!(rows[0].depth, 0);
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(0), "00:00");
        assert_eq!(format_countdown(59), "00:59");
        assert_eq!(format_countdown(90), "01:30");
        assert_eq!(format_countdown(1500), "25:00");
        assert_eq!(format_countdown(3661), "1:01:01");
    }

    #[test]
    fn test_status_badge() {
        let mut store = TaskStore::in_memory();
        let id = store.add_task("Task", 1).unwrap();
        assert_eq!(status_badge(store.get(id).unwrap()), "⏸ PAUSED");

        store.toggle_pause(id);
        assert_eq!(status_badge(store.get(id).unwrap()), "⏱ RUNNING");

        for _ in 0..60 {
            store.tick_running();
        }
        assert_eq!(status_badge(store.get(id).unwrap()), "⏰ TIME UP");

        store.toggle_completed(id);
        assert_eq!(status_badge(store.get(id).unwrap()), "✓ DONE");

        let parent_id = store.add_task("+Project", 10).unwrap();
        assert_eq!(status_badge(store.get(parent_id).unwrap()), "");
    }

    #[test]
    fn test_tree_connector() {
        assert_eq!(tree_connector(false), "├─");
        assert_eq!(tree_connector(true), "└─");
    }
}
