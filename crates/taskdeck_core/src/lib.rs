//! Core domain logic for taskdeck.
//! This crate owns task records, their ordering, and the synchronized list
//! the view layer renders.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod sort;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::task::{Task, TaskDraft, TaskId, TaskLayout, TaskPatch, TaskValidationError};
pub use repo::task_repo::{
    ErrorKind, RepoError, RepoResult, SchemaProblem, SqliteTaskRepository, TaskRepository,
};
pub use service::task_synchronizer::{SubscriptionId, TaskListView, TaskSynchronizer};
pub use sort::collation::locale_compare;
pub use sort::preset::{SortPreset, UnknownSortPreset};
pub use sort::strategy::{
    apply_sort, sort_by_completion, sort_by_due_date, sort_by_name, SortCriteria, SortDirection,
    SortProperty,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
