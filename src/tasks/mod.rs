//! Spaced-repetition task tracking.
//!
//! This module provides:
//! - The fixed stage ladder of review intervals
//! - Tasks with question, answer and review schedule
//! - The review state machine (remembered advances, forgot resets)
//! - A `SQLite`-backed store with atomic read-modify-write updates
//!
//! Every operation that depends on time takes `now` explicitly.
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use spaced_review::tasks::{ReviewOutcome, SqliteTaskStore, TaskStore};
//!
//! let store = SqliteTaskStore::new("/tmp/tasks.sqlite3").unwrap();
//!
//! let task = store.create_task("Capital of France?", "Paris", Utc::now()).unwrap();
//! let task = store.review_task(&task.id, ReviewOutcome::Remembered, Utc::now()).unwrap();
//! assert_eq!(task.stage, 1);
//! ```

pub mod id;
pub mod models;
pub mod stages;
pub mod store;

pub use models::{validate_content, EmptyContent, InvalidReviewResult, ReviewOutcome, Status, Task};
pub use store::{SqliteTaskStore, TaskNotFound, TaskStore};
