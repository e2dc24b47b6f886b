//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical `Task` record shown by the list view.
//! - Define `TaskDraft` (create input) and `TaskPatch` (partial update input).
//! - Provide view-facing projections (overdue check, card layout).
//!
//! # Invariants
//! - `id` is assigned once by the persistence layer and never changes.
//! - `title` is non-blank after trim.
//! - `description: None` and `Some("")` are distinct values.
//! - `due_date` is Unix epoch milliseconds (UTC); `None` means no deadline.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a task.
pub type TaskId = Uuid;

/// Validation failures for task records and drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Nil UUID cannot identify a task.
    NilId,
    /// Title is empty or whitespace only.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be nil"),
            Self::EmptyTitle => write!(f, "task title must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// Card layout picked by the list view for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskLayout {
    /// Title-only card; description is absent or empty.
    NoDescription,
    /// Card with description and a deadline.
    Timed,
    /// Card with description and no deadline.
    Basic,
}

/// Canonical to-do record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    /// Unix epoch milliseconds.
    pub due_date: Option<i64>,
}

/// Unchecked wire shape; converted into `Task` through validation.
#[derive(Deserialize)]
struct TaskRecord {
    id: TaskId,
    title: String,
    description: Option<String>,
    #[serde(default)]
    completed: bool,
    due_date: Option<i64>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskValidationError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let task = Self {
            id: record.id,
            title: record.title,
            description: record.description,
            completed: record.completed,
            due_date: record.due_date,
        };
        task.validate()?;
        Ok(task)
    }
}

impl Task {
    /// Materializes a draft under a persistence-assigned id.
    pub fn from_draft(id: TaskId, draft: &TaskDraft) -> Result<Self, TaskValidationError> {
        let task = Self {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            completed: draft.completed,
            due_date: draft.due_date,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        validate_title(&self.title)
    }

    /// Returns whether the deadline has passed without completion.
    ///
    /// A task due exactly at `now_epoch_ms` is not overdue yet.
    pub fn is_overdue(&self, now_epoch_ms: i64) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now_epoch_ms)
    }

    /// Picks the card layout used by the list view.
    pub fn layout(&self) -> TaskLayout {
        match self.description.as_deref() {
            None | Some("") => TaskLayout::NoDescription,
            Some(_) if self.due_date.is_some() => TaskLayout::Timed,
            Some(_) => TaskLayout::Basic,
        }
    }
}

/// Create input; the id is assigned by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub due_date: Option<i64>,
}

impl TaskDraft {
    /// Creates an incomplete draft with no description or deadline.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
            due_date: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due_epoch_ms: i64) -> Self {
        self.due_date = Some(due_epoch_ms);
        self
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_title(&self.title)
    }
}

/// Partial update payload.
///
/// Outer `None` leaves a field untouched. For nullable fields the inner
/// `None` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub due_date: Option<Option<i64>>,
}

impl TaskPatch {
    /// Builds a patch that overwrites every mutable field with `task`'s values.
    pub fn replace_with(task: &Task) -> Self {
        Self {
            title: Some(task.title.clone()),
            description: Some(task.description.clone()),
            completed: Some(task.completed),
            due_date: Some(task.due_date),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.due_date.is_none()
    }

    /// Applies this patch in place. Does not validate the result.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
    }
}

fn validate_title(title: &str) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(())
}
