use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Task identity. Ids are issued from the creation timestamp in
/// milliseconds and bumped forward on collision, so they are unique and
/// strictly increasing within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

/// Countdown state carried by every timed task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    /// Seconds left on the clock (never negative, saturates at zero)
    pub remaining: u32,
    /// Duration the clock resets to; follows the most recent adjustment
    pub initial: u32,
    /// Whether the countdown is currently held
    pub paused: bool,
}

impl Countdown {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            remaining: duration_secs,
            initial: duration_secs,
            paused: true,
        }
    }

    /// Shift the clock by a signed number of seconds, floored at zero.
    /// The reset target moves with it.
    pub fn adjust(&mut self, delta_secs: i64) {
        let next = (i64::from(self.remaining) + delta_secs).max(0) as u32;
        self.remaining = next;
        self.initial = next;
    }

    /// Put the clock back to its reset target and hold it
    pub fn reset(&mut self) {
        self.remaining = self.initial;
        self.paused = true;
    }

    /// Drop one second off the clock. Returns true exactly when the
    /// decrement lands on zero.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}

/// What a task is: a countdown that can run, or a container for children.
/// A parent carrying timer state is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskKind {
    Timed(Countdown),
    Parent { child_ids: Vec<TaskId> },
}

/// A task record. The whole collection is persisted as a flat list;
/// parent/child structure lives in `parent_id` and `child_ids`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Local>,
    #[serde(default)]
    pub parent_id: Option<TaskId>,
    #[serde(flatten)]
    pub kind: TaskKind,
}

impl Task {
    /// Create a standalone timed task, paused with a full clock
    pub fn timed(id: TaskId, text: String, duration_secs: u32) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at: Local::now(),
            parent_id: None,
            kind: TaskKind::Timed(Countdown::new(duration_secs)),
        }
    }

    /// Create a parent task with no timer and no children yet
    pub fn parent(id: TaskId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at: Local::now(),
            parent_id: None,
            kind: TaskKind::Parent {
                child_ids: Vec::new(),
            },
        }
    }

    /// Create a timed task owned by a parent
    pub fn child_of(id: TaskId, parent_id: TaskId, text: String, duration_secs: u32) -> Self {
        let mut task = Self::timed(id, text, duration_secs);
        task.parent_id = Some(parent_id);
        task
    }

    pub fn is_parent(&self) -> bool {
        matches!(self.kind, TaskKind::Parent { .. })
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        match &self.kind {
            TaskKind::Timed(countdown) => Some(countdown),
            TaskKind::Parent { .. } => None,
        }
    }

    pub fn countdown_mut(&mut self) -> Option<&mut Countdown> {
        match &mut self.kind {
            TaskKind::Timed(countdown) => Some(countdown),
            TaskKind::Parent { .. } => None,
        }
    }

    /// Ids of owned children, in order. Empty for timed tasks.
    pub fn child_ids(&self) -> &[TaskId] {
        match &self.kind {
            TaskKind::Parent { child_ids } => child_ids,
            TaskKind::Timed(_) => &[],
        }
    }

    /// The one task the ticker advances satisfies this: not completed,
    /// not paused, clock above zero.
    pub fn is_running(&self) -> bool {
        !self.completed
            && self
                .countdown()
                .is_some_and(|c| !c.paused && c.remaining > 0)
    }

    /// Hold or release the countdown. No effect on parents.
    pub fn set_paused(&mut self, paused: bool) {
        if let Some(countdown) = self.countdown_mut() {
            countdown.paused = paused;
        }
    }

    /// Flip completion; completing a task always stops its clock
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
        if self.completed {
            self.set_paused(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_countdown_new() {
        let countdown = Countdown::new(1500);
        assert_eq!(countdown.remaining, 1500);
        assert_eq!(countdown.initial, 1500);
        assert!(countdown.paused);
    }

    #[test]
    fn test_countdown_adjust_moves_reset_target() {
        let mut countdown = Countdown::new(300);
        countdown.adjust(5 * 60);
        assert_eq!(countdown.remaining, 600);
        assert_eq!(countdown.initial, 600);
    }

    #[test]
    fn test_countdown_adjust_saturates_at_zero() {
        let mut countdown = Countdown::new(300);
        countdown.adjust(-1000 * 60);
        assert_eq!(countdown.remaining, 0);
        assert_eq!(countdown.initial, 0);
    }

    #[test]
    fn test_countdown_reset_holds_clock() {
        let mut countdown = Countdown::new(120);
        countdown.paused = false;
        countdown.remaining = 7;
        countdown.reset();
        assert_eq!(countdown.remaining, 120);
        assert!(countdown.paused);
    }

    #[test]
    fn test_countdown_tick_reports_zero_crossing() {
        let mut countdown = Countdown::new(2);
        assert!(!countdown.tick());
        assert!(countdown.tick());
        // Already at zero: still zero, no negative values
        assert!(countdown.tick());
        assert_eq!(countdown.remaining, 0);
    }

    #[test]
    fn test_parent_has_no_countdown() {
        let task = Task::parent(TaskId(1), "Project X".to_string());
        assert!(task.is_parent());
        assert!(task.countdown().is_none());
        assert!(task.child_ids().is_empty());
        assert!(!task.is_running());
    }

    #[test]
    fn test_timed_task_starts_paused() {
        let task = Task::timed(TaskId(1), "Write report".to_string(), 1500);
        assert!(!task.is_parent());
        assert!(!task.completed);
        assert!(!task.is_running());
        assert_eq!(task.countdown().unwrap().remaining, 1500);
    }

    #[test]
    fn test_toggle_completed_forces_pause() {
        let mut task = Task::timed(TaskId(1), "Test".to_string(), 60);
        task.set_paused(false);
        assert!(task.is_running());

        task.toggle_completed();
        assert!(task.completed);
        assert!(task.countdown().unwrap().paused);
        assert!(!task.is_running());

        // Un-completing leaves the clock held
        task.toggle_completed();
        assert!(!task.completed);
        assert!(task.countdown().unwrap().paused);
    }

    #[test]
    fn test_child_of_links_parent() {
        let task = Task::child_of(TaskId(2), TaskId(1), "Draft outline".to_string(), 600);
        assert_eq!(task.parent_id, Some(TaskId(1)));
        assert_eq!(task.countdown().unwrap().remaining, 600);
    }

    #[test]
    fn test_task_json_round_trip() {
        let timed = Task::timed(TaskId(10), "Write report".to_string(), 1500);
        let json = serde_json::to_string(&timed).unwrap();
        assert!(json.contains(r#""kind":"timed""#));
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, timed);

        let parent = Task::parent(TaskId(11), "Project X".to_string());
        let json = serde_json::to_string(&parent).unwrap();
        assert!(json.contains(r#""kind":"parent""#));
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, parent);
    }
}
