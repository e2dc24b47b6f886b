//! Terminal front end for taskdeck.
//!
//! # Responsibility
//! - Collect draft/edit fields from arguments and reject blank titles early.
//! - Drive every mutation through `TaskSynchronizer` and render its list.
//!
//! # Invariants
//! - The rendered list is always `TaskSynchronizer::tasks()`, never a locally
//!   re-ordered copy.

mod due;
mod form;
mod render;

use anyhow::{Context, Result};
use form::{apply_edit, build_draft, EditFields};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use taskdeck_core::db::open_db;
use taskdeck_core::{
    default_log_level, init_logging, LogLevel, SortPreset, SqliteTaskRepository, TaskId,
    TaskSynchronizer,
};

const DEFAULT_DB_FILE_NAME: &str = "taskdeck.sqlite3";

/// Single-user task list backed by SQLite.
#[derive(Parser, Debug)]
#[command(name = "taskdeck", version = taskdeck_core::core_version(), about)]
struct Cli {
    /// SQLite database file.
    #[arg(long, env = "TASKDECK_DB", default_value = DEFAULT_DB_FILE_NAME)]
    db: PathBuf,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, env = "TASKDECK_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "TASKDECK_LOG_LEVEL")]
    log_level: Option<LogLevel>,

    /// Display order (see `sort-options`).
    #[arg(long, global = true, default_value = "none")]
    sort: SortPreset,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all tasks.
    List,

    /// Create a task.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD` or RFC 3339; UTC unless an offset is given.
        #[arg(long)]
        due: Option<String>,
    },

    /// Edit fields of an existing task.
    Edit {
        id: TaskId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        clear_description: bool,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,
        #[arg(long)]
        clear_due: bool,
    },

    /// Mark a task completed.
    Complete { id: TaskId },

    /// Delete a task.
    Delete { id: TaskId },

    /// Show the available `--sort` values.
    SortOptions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.unwrap_or_else(default_log_level);
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    if let Command::SortOptions = cli.cmd {
        for preset in SortPreset::ALL {
            println!("{:<10} {}", preset.value(), preset.label());
        }
        return Ok(());
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
    let repo = SqliteTaskRepository::try_new(&conn)?;
    let mut sync = TaskSynchronizer::with_criteria(repo, cli.sort.criteria());
    sync.load().context("failed to load tasks")?;
    info!(
        "event=cli_command module=cli sort={} task_count={}",
        cli.sort,
        sync.len()
    );

    if let Some(outcome) = run(&mut sync, cli.cmd)? {
        eprintln!("{}", outcome.message());
    }

    let now = due::now_epoch_ms();
    render::print_tasks(sync.tasks(), now);
    let overdue = sync.overdue_count(now);
    if overdue > 0 {
        eprintln!("You have {overdue} overdue task(s)!");
    }
    Ok(())
}

/// Confirmation shown after a successful mutation.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Created,
    Updated,
    Completed,
    Deleted { title: String },
}

impl Outcome {
    fn message(&self) -> String {
        match self {
            Self::Created => "Task created successfully!".to_string(),
            Self::Updated => "Task updated successfully!".to_string(),
            Self::Completed => "Task completed.".to_string(),
            Self::Deleted { title } => format!("Deleted \"{title}\"."),
        }
    }
}

fn run(
    sync: &mut TaskSynchronizer<SqliteTaskRepository<'_>>,
    cmd: Command,
) -> Result<Option<Outcome>> {
    let outcome = match cmd {
        Command::List | Command::SortOptions => return Ok(None),
        Command::Add {
            title,
            description,
            due,
        } => {
            let draft = build_draft(title, description, due.as_deref())?;
            sync.create(&draft).context("Failed to create task")?;
            Outcome::Created
        }
        Command::Edit {
            id,
            title,
            description,
            clear_description,
            due,
            clear_due,
        } => {
            let current = sync
                .tasks()
                .iter()
                .find(|task| task.id == id)
                .with_context(|| format!("task not found: {id}"))?;
            let task = apply_edit(
                current,
                EditFields {
                    title,
                    description,
                    clear_description,
                    due,
                    clear_due,
                },
            )?;
            sync.update(&task).context("Failed to update task")?;
            Outcome::Updated
        }
        Command::Complete { id } => {
            sync.complete(id).context("Failed to complete task")?;
            Outcome::Completed
        }
        Command::Delete { id } => {
            let deleted = sync.remove(id).context("Failed to delete task")?;
            Outcome::Deleted {
                title: deleted.title,
            }
        }
    };
    Ok(Some(outcome))
}
