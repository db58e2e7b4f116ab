use super::task::{Task, TaskId, TaskKind};
use super::views::TaskGroup;
use crate::persistence;
use chrono::Local;
use std::path::PathBuf;

/// Leading marker that turns new-task text into a parent task
pub const PARENT_MARKER: char = '+';

/// Outcome of advancing the running countdown by one second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No task is currently counting down
    Idle,
    /// The running task lost one second and is still above zero
    Ticked(TaskId),
    /// The running task just hit zero; the completion cue fires once
    Finished(TaskId),
}

/// Owns the task collection, enforces the single-active-timer rule, and
/// writes the whole list back to its storage slot after every mutation.
///
/// Every operation is a silent no-op on invalid input (empty text, unknown
/// id, timer operation on a parent); the store never raises.
pub struct TaskStore {
    tasks: Vec<Task>,
    slot: Option<PathBuf>,
    last_id: i64,
}

impl TaskStore {
    /// Store with no storage slot; nothing is ever written to disk
    pub fn in_memory() -> Self {
        Self {
            tasks: Vec::new(),
            slot: None,
            last_id: 0,
        }
    }

    /// Load the collection from a storage slot. A missing or unparseable
    /// slot yields an empty collection rather than an error.
    pub fn open(slot: PathBuf) -> Self {
        let tasks = persistence::load_or_default(&slot);
        let last_id = tasks.iter().map(|t| t.id.0).max().unwrap_or(0);
        let mut store = Self {
            tasks,
            slot: Some(slot),
            last_id,
        };
        store.repair_single_active();
        store
    }

    /// A hand-edited slot may hold several unpaused tasks; keep the first
    /// and hold the rest so the invariant is true from the start.
    fn repair_single_active(&mut self) {
        let mut seen_running = false;
        for task in &mut self.tasks {
            if task.is_running() {
                if seen_running {
                    task.set_paused(true);
                } else {
                    seen_running = true;
                }
            }
        }
    }

    /// Write-through after a mutation. Fire-and-forget: a failed save is
    /// never surfaced to callers.
    fn persist(&self) {
        if let Some(slot) = &self.slot {
            let _ = persistence::save_tasks(slot, &self.tasks);
        }
    }

    fn next_id(&mut self) -> TaskId {
        let now = Local::now().timestamp_millis();
        let id = now.max(self.last_id + 1);
        self.last_id = id;
        TaskId(id)
    }

    /// Add a top-level task. Text starting with [`PARENT_MARKER`] creates a
    /// parent task (marker stripped); anything else creates a timed task
    /// with a `duration_minutes` clock, paused.
    pub fn add_task(&mut self, text: &str, duration_minutes: u32) -> Option<TaskId> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let task = if let Some(rest) = trimmed.strip_prefix(PARENT_MARKER) {
            let name = rest.trim();
            if name.is_empty() {
                return None;
            }
            Task::parent(self.next_id(), name.to_string())
        } else {
            Task::timed(
                self.next_id(),
                trimmed.to_string(),
                duration_minutes.saturating_mul(60),
            )
        };

        let id = task.id;
        self.tasks.push(task);
        self.persist();
        Some(id)
    }

    /// Add a timed task under an existing parent, recording the ownership
    /// on both ends.
    pub fn add_child_task(
        &mut self,
        parent_id: TaskId,
        text: &str,
        duration_minutes: u32,
    ) -> Option<TaskId> {
        let trimmed = text.trim();
        if trimmed.is_empty() || !self.get(parent_id).is_some_and(Task::is_parent) {
            return None;
        }

        let id = self.next_id();
        self.tasks.push(Task::child_of(
            id,
            parent_id,
            trimmed.to_string(),
            duration_minutes.saturating_mul(60),
        ));
        if let Some(parent) = self.get_mut(parent_id) {
            if let TaskKind::Parent { child_ids } = &mut parent.kind {
                child_ids.push(id);
            }
        }
        self.persist();
        Some(id)
    }

    /// Flip completion. Completing stops the task's clock in the same step.
    pub fn toggle_completed(&mut self, id: TaskId) {
        let Some(task) = self.get_mut(id) else { return };
        task.toggle_completed();
        self.persist();
    }

    /// Flip the hold on one task and hold every other task in the same
    /// step; this is where the single-active-timer rule is enforced.
    /// Parents and completed tasks are not toggleable.
    pub fn toggle_pause(&mut self, id: TaskId) {
        match self.get(id) {
            Some(task) if !task.is_parent() && !task.completed => {}
            _ => return,
        }

        for task in &mut self.tasks {
            if task.id == id {
                if let Some(countdown) = task.countdown_mut() {
                    countdown.paused = !countdown.paused;
                }
            } else {
                task.set_paused(true);
            }
        }
        self.persist();
    }

    /// Shift a task's clock by whole minutes, floored at zero. The reset
    /// target follows the new value.
    pub fn adjust_task_time(&mut self, id: TaskId, delta_minutes: i64) {
        let Some(countdown) = self.get_mut(id).and_then(|t| t.countdown_mut()) else {
            return;
        };
        countdown.adjust(delta_minutes.saturating_mul(60));
        self.persist();
    }

    /// Replace a task's label; empty replacement text is a no-op
    pub fn rename_task(&mut self, id: TaskId, new_text: &str) {
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            return;
        }
        let Some(task) = self.get_mut(id) else { return };
        task.text = trimmed.to_string();
        self.persist();
    }

    /// Put the clock back to its reset target and hold it
    pub fn reset_task(&mut self, id: TaskId) {
        let Some(countdown) = self.get_mut(id).and_then(|t| t.countdown_mut()) else {
            return;
        };
        countdown.reset();
        self.persist();
    }

    /// Remove a task record. Children of a deleted parent keep their
    /// `parent_id`; the views resolve them as orphans from then on.
    pub fn delete_task(&mut self, id: TaskId) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            self.persist();
        }
    }

    /// Advance the running countdown by one second. At most one task
    /// qualifies; a task that reaches zero stays unpaused and active until
    /// the user completes it, but no longer qualifies for further ticks.
    pub fn tick_running(&mut self) -> TickOutcome {
        let Some(task) = self.tasks.iter_mut().find(|t| t.is_running()) else {
            return TickOutcome::Idle;
        };
        let id = task.id;
        let finished = task
            .countdown_mut()
            .map(|countdown| countdown.tick())
            .unwrap_or(false);
        self.persist();
        if finished {
            TickOutcome::Finished(id)
        } else {
            TickOutcome::Ticked(id)
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Tasks still in play, in creation order
    pub fn active_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| !t.completed).collect()
    }

    pub fn completed_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.completed).collect()
    }

    pub fn parent_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.is_parent()).collect()
    }

    /// Top-level timed tasks: no parent, or a parent that no longer exists
    pub fn orphan_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| !t.is_parent() && self.resolved_parent(t).is_none())
            .collect()
    }

    /// A parent's children in `child_ids` order; stale ids are skipped
    pub fn children_of(&self, parent_id: TaskId) -> Vec<&Task> {
        let Some(parent) = self.get(parent_id) else {
            return Vec::new();
        };
        parent
            .child_ids()
            .iter()
            .filter_map(|id| self.get(*id))
            .collect()
    }

    /// The unique task the ticker would advance, if any
    pub fn running_task(&self) -> Option<&Task> {
        self.tasks.iter().find(|t| t.is_running())
    }

    /// Follow a task's `parent_id` to a still-existing parent task.
    /// Dangling references resolve to `None`, which is how deleted-parent
    /// children become orphans without rewriting their records.
    pub fn resolved_parent(&self, task: &Task) -> Option<&Task> {
        task.parent_id
            .and_then(|id| self.get(id))
            .filter(|t| t.is_parent())
    }

    /// Partition a task list into groups keyed by resolved parent. Tasks
    /// with no resolvable parent share the ungrouped bucket. Group order
    /// follows first appearance in the input.
    pub fn group_by_parent<'a>(&'a self, tasks: &[&'a Task]) -> Vec<TaskGroup<'a>> {
        let mut groups: Vec<TaskGroup<'a>> = Vec::new();
        for &task in tasks {
            let parent = self.resolved_parent(task);
            let key = parent.map(|p| p.id);
            match groups.iter_mut().find(|g| g.parent.map(|p| p.id) == key) {
                Some(group) => group.tasks.push(task),
                None => groups.push(TaskGroup {
                    parent,
                    tasks: vec![task],
                }),
            }
        }
        groups
    }
}
