//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the persistence collaborator consumed by the synchronizer:
//!   create, update, delete, complete and list tasks.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate the resulting record before SQL mutations.
//! - Every mutation returns the authoritative post-mutation record.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - `list_tasks` returns insertion order.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    description,
    completed,
    due_date
FROM tasks";

const REQUIRED_TASK_COLUMNS: &[&str] = &[
    "uuid",
    "title",
    "description",
    "completed",
    "due_date",
    "created_at",
    "updated_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Coarse classification of repository failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input rejected before touching storage.
    Validation,
    /// Target id is unknown.
    NotFound,
    /// Storage-side failure of any other cause.
    StorageFault,
}

/// Repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    NotFound(TaskId),
    InvalidData(String),
    /// The connection was not prepared through `db::open_db*`.
    Schema(SchemaProblem),
}

/// Why a connection is not ready for task storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaProblem {
    Unmigrated { expected: u32, found: u32 },
    MissingTasksTable,
    MissingColumn(&'static str),
}

impl Display for SchemaProblem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unmigrated { expected, found } => write!(
                f,
                "schema is at v{found}, tasks need v{expected}; open the store with open_db"
            ),
            Self::MissingTasksTable => f.write_str("`tasks` table is missing"),
            Self::MissingColumn(column) => write!(f, "`tasks.{column}` column is missing"),
        }
    }
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Db(_) | Self::InvalidData(_) | Self::Schema(_) => ErrorKind::StorageFault,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::Schema(problem) => write!(f, "task store not ready: {problem}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence collaborator for tasks.
pub trait TaskRepository {
    /// Persists a draft and returns it with its newly assigned id.
    fn create_task(&self, draft: &TaskDraft) -> RepoResult<Task>;
    /// Applies `patch` to task `id` and returns the full updated record.
    fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task>;
    /// Deletes task `id` and returns the removed record.
    fn delete_task(&self, id: TaskId) -> RepoResult<Task>;
    /// Marks task `id` completed and returns the full record.
    fn complete_task(&self, id: TaskId) -> RepoResult<Task>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Wraps a connection opened through `db::open_db*`.
    ///
    /// # Errors
    /// `Schema` when migrations are missing or the `tasks` table lacks a
    /// column this build writes.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn fetch(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, draft: &TaskDraft) -> RepoResult<Task> {
        draft.validate()?;
        let task = Task::from_draft(Uuid::new_v4(), draft)?;

        self.conn.execute(
            "INSERT INTO tasks (
                uuid,
                title,
                description,
                completed,
                due_date,
                created_at,
                updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                (strftime('%s', 'now') * 1000),
                (strftime('%s', 'now') * 1000)
            );",
            params![
                task.id.to_string(),
                task.title.as_str(),
                task.description.as_deref(),
                bool_to_int(task.completed),
                task.due_date,
            ],
        )?;

        Ok(task)
    }

    fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task> {
        let tx = self.conn.unchecked_transaction()?;
        let mut task = self.fetch(id)?.ok_or(RepoError::NotFound(id))?;
        patch.apply_to(&mut task);
        task.validate()?;

        tx.execute(
            "UPDATE tasks
             SET
                title = ?1,
                description = ?2,
                completed = ?3,
                due_date = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?5;",
            params![
                task.title.as_str(),
                task.description.as_deref(),
                bool_to_int(task.completed),
                task.due_date,
                id.to_string(),
            ],
        )?;
        tx.commit()?;

        Ok(task)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<Task> {
        let tx = self.conn.unchecked_transaction()?;
        let task = self.fetch(id)?.ok_or(RepoError::NotFound(id))?;
        tx.execute("DELETE FROM tasks WHERE uuid = ?1;", [id.to_string()])?;
        tx.commit()?;
        Ok(task)
    }

    fn complete_task(&self, id: TaskId) -> RepoResult<Task> {
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                completed = 1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        self.fetch(id)?.ok_or(RepoError::NotFound(id))
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.fetch(id)
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected = latest_version();
    let found = schema_version(conn)?;
    if found < expected {
        return Err(RepoError::Schema(SchemaProblem::Unmigrated { expected, found }));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('tasks');")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    if columns.is_empty() {
        return Err(RepoError::Schema(SchemaProblem::MissingTasksTable));
    }
    let missing = REQUIRED_TASK_COLUMNS
        .iter()
        .copied()
        .find(|required| !columns.iter().any(|name| name == required));
    if let Some(missing) = missing {
        return Err(RepoError::Schema(SchemaProblem::MissingColumn(missing)));
    }

    Ok(())
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in tasks.uuid"))
    })?;

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed"
            )));
        }
    };

    let task = Task {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        completed,
        due_date: row.get("due_date")?,
    };
    task.validate()
        .map_err(|err| RepoError::InvalidData(format!("task {id}: {err}")))?;
    Ok(task)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
