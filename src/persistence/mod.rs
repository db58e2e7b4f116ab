pub mod files;
pub mod slot;

pub use files::{atomic_write, ensure_data_dir, get_data_dir, init_local_toki, tasks_file};
pub use slot::{load_or_default, load_tasks, save_tasks, StorageError};
