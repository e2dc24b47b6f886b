//! Plain-text rendering of the synchronized task list.

use crate::due::format_due;
use taskdeck_core::{Task, TaskLayout};

pub fn print_tasks(tasks: &[Task], now_epoch_ms: i64) {
    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }
    for task in tasks {
        println!("{}", task_line(task, now_epoch_ms));
    }
}

/// One line per task; the layout decides which optional parts are shown.
fn task_line(task: &Task, now_epoch_ms: i64) -> String {
    let mark = if task.completed { "[x]" } else { "[ ]" };
    let mut line = format!("{mark} {}  {}", task.id, task.title);

    if task.layout() != TaskLayout::NoDescription {
        if let Some(description) = task.description.as_deref() {
            line.push_str(" - ");
            line.push_str(description);
        }
    }
    if let Some(due) = task.due_date {
        line.push_str("  (due ");
        line.push_str(&format_due(due));
        line.push(')');
        if task.is_overdue(now_epoch_ms) {
            line.push_str(" OVERDUE");
        }
    }
    line
}
