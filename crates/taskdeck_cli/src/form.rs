//! Turns command-line fields into drafts and edited records.
//!
//! Blank titles are refused here, before anything reaches the synchronizer.

use crate::due::parse_due;
use anyhow::{bail, Result};
use taskdeck_core::{Task, TaskDraft};

/// Field changes requested by `edit`; `clear_*` wins over a replacement.
#[derive(Debug, Default)]
pub struct EditFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub clear_description: bool,
    pub due: Option<String>,
    pub clear_due: bool,
}

pub fn build_draft(
    title: String,
    description: Option<String>,
    due: Option<&str>,
) -> Result<TaskDraft> {
    let mut draft = TaskDraft::new(require_title(title)?);
    draft.description = description;
    draft.due_date = due.map(parse_due).transpose()?;
    Ok(draft)
}

/// Applies `fields` to a copy of `task`. Untouched fields keep their value.
pub fn apply_edit(task: &Task, fields: EditFields) -> Result<Task> {
    let mut edited = task.clone();
    if let Some(title) = fields.title {
        edited.title = require_title(title)?;
    }

    if fields.clear_description {
        edited.description = None;
    } else if let Some(description) = fields.description {
        edited.description = Some(description);
    }

    if fields.clear_due {
        edited.due_date = None;
    } else if let Some(due) = fields.due.as_deref() {
        edited.due_date = Some(parse_due(due)?);
    }
    Ok(edited)
}

fn require_title(title: String) -> Result<String> {
    if title.trim().is_empty() {
        bail!("Title is required");
    }
    Ok(title)
}
