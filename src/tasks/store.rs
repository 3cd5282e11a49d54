//! Task store trait and `SQLite` implementation.

use crate::error::Result;
use crate::tasks::models::{validate_content, ReviewOutcome, Task};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long a connection waits for another writer to release the database lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

const TASK_COLUMNS: &str =
    "id, question, answer, stage, next_review_at, created_at, updated_at, completed_at";

/// Trait for task storage operations.
///
/// All methods return a `Result` and may fail with database errors.
/// Read-modify-write operations are atomic per task.
#[allow(clippy::missing_errors_doc)]
pub trait TaskStore: Send + Sync {
    /// Create and persist a new task.
    fn create_task(&self, question: &str, answer: &str, now: DateTime<Utc>) -> Result<Task>;

    /// Get a task by ID, failing with [`TaskNotFound`] if absent.
    fn get_task(&self, id: &str) -> Result<Task>;

    /// List every task, oldest first.
    fn list_tasks(&self) -> Result<Vec<Task>>;

    /// Replace a task's question and answer.
    fn update_content(
        &self,
        id: &str,
        question: &str,
        answer: &str,
        now: DateTime<Utc>,
    ) -> Result<Task>;

    /// Apply a review outcome to a task.
    fn review_task(&self, id: &str, outcome: ReviewOutcome, now: DateTime<Utc>) -> Result<Task>;

    /// Permanently delete a task, failing with [`TaskNotFound`] if absent.
    fn delete_task(&self, id: &str) -> Result<()>;
}

/// Error when a referenced task is not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskNotFound(pub String);

impl std::fmt::Display for TaskNotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "task not found: {}", self.0)
    }
}

impl std::error::Error for TaskNotFound {}

/// SQLite-based task store.
///
/// Each operation opens a new connection to the database file, so the store
/// can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    db_path: PathBuf,
}

impl SqliteTaskStore {
    /// Create a new `SQLite` task store at the given database path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let store = Self { db_path: db_path.as_ref().to_path_buf() };
        store.init_schema()?;
        Ok(store)
    }

    /// Get the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection to the database.
    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        Ok(conn)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                stage INTEGER NOT NULL CHECK (stage >= 0),
                next_review_at TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                completed_at TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at);
            ",
        )?;

        Ok(())
    }

    /// Parse a task from a row selected with [`TASK_COLUMNS`].
    fn parse_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: row.get(0)?,
            question: row.get(1)?,
            answer: row.get(2)?,
            stage: row.get(3)?,
            next_review_at: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
            completed_at: row.get(7)?,
        })
    }

    fn select_task(conn: &Connection, id: &str) -> Result<Task> {
        conn.query_row(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
            params![id],
            Self::parse_task,
        )
        .optional()?
        .ok_or_else(|| TaskNotFound(id.to_string()).into())
    }

    /// Load a task under the write lock, let `apply` change it, then persist it.
    ///
    /// `BEGIN IMMEDIATE` takes the database write lock before the row is read,
    /// so concurrent read-modify-write sequences cannot interleave.
    fn modify_task(
        &self,
        id: &str,
        apply: impl FnOnce(&mut Task) -> Result<()>,
    ) -> Result<Task> {
        let mut conn = self.open()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut task = Self::select_task(&tx, id)?;
        apply(&mut task)?;

        tx.execute(
            "UPDATE tasks
             SET question = ?1, answer = ?2, stage = ?3, next_review_at = ?4,
                 updated_at = ?5, completed_at = ?6
             WHERE id = ?7",
            params![
                task.question,
                task.answer,
                task.stage,
                task.next_review_at,
                task.updated_at,
                task.completed_at,
                task.id,
            ],
        )?;
        tx.commit()?;

        Ok(task)
    }
}

impl TaskStore for SqliteTaskStore {
    fn create_task(&self, question: &str, answer: &str, now: DateTime<Utc>) -> Result<Task> {
        let task = Task::new(question, answer, now)?;
        let conn = self.open()?;

        conn.execute(
            &format!("INSERT INTO tasks ({TASK_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
            params![
                task.id,
                task.question,
                task.answer,
                task.stage,
                task.next_review_at,
                task.created_at,
                task.updated_at,
                task.completed_at,
            ],
        )?;

        tracing::debug!(task_id = %task.id, "created task");
        Ok(task)
    }

    fn get_task(&self, id: &str) -> Result<Task> {
        let conn = self.open()?;
        Self::select_task(&conn, id)
    }

    fn list_tasks(&self) -> Result<Vec<Task>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at ASC, id ASC"
        ))?;
        let tasks = stmt.query_map([], Self::parse_task)?.collect::<rusqlite::Result<_>>()?;
        Ok(tasks)
    }

    fn update_content(
        &self,
        id: &str,
        question: &str,
        answer: &str,
        now: DateTime<Utc>,
    ) -> Result<Task> {
        // Reject bad input before touching the database.
        let (question, answer) = validate_content(question, answer)?;

        let task = self.modify_task(id, |task| {
            task.update_content(&question, &answer)?;
            task.updated_at = now;
            Ok(())
        })?;

        tracing::debug!(task_id = %task.id, "updated task content");
        Ok(task)
    }

    fn review_task(&self, id: &str, outcome: ReviewOutcome, now: DateTime<Utc>) -> Result<Task> {
        let task = self.modify_task(id, |task| {
            task.apply_review(outcome, now);
            Ok(())
        })?;

        tracing::info!(
            task_id = %task.id,
            outcome = outcome.as_str(),
            stage = task.stage,
            completed = task.completed_at.is_some(),
            "reviewed task"
        );
        Ok(task)
    }

    fn delete_task(&self, id: &str) -> Result<()> {
        let conn = self.open()?;
        let rows = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(TaskNotFound(id.to_string()).into());
        }

        tracing::debug!(task_id = %id, "deleted task");
        Ok(())
    }
}
