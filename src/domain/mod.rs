pub mod store;
pub mod task;
pub mod views;

pub use store::{TaskStore, TickOutcome, PARENT_MARKER};
pub use task::{Countdown, Task, TaskId, TaskKind};
pub use views::{
    flatten_active, format_countdown, status_badge, tree_connector, FlatRow, TaskGroup,
};
