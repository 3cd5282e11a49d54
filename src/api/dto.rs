//! Request and response bodies.

use crate::tasks::{stages, Status, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of create and update requests. Missing fields read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContentRequest {
    /// Question text.
    pub question: String,
    /// Answer text.
    pub answer: String,
}

/// Body of a review request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewRequest {
    /// Review result, e.g. `remembered` or `forgot`.
    pub result: String,
}

/// Query string of the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Status filter: `all`, `ready`, `pending` or `done`.
    pub status: String,
}

impl ListQuery {
    /// Build from decoded query pairs. A repeated `status` keeps its first value.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let status = pairs.into_iter().find(|(key, _)| key == "status").map(|(_, value)| value);
        Self { status: status.unwrap_or_default() }
    }

    /// Whether a task with `status` passes the filter.
    ///
    /// An empty filter or `all` passes everything; an unknown value passes nothing.
    #[must_use]
    pub fn matches(&self, status: Status) -> bool {
        let filter = self.status.trim().to_lowercase();
        filter.is_empty() || filter == "all" || filter == status.as_str()
    }
}

/// A task as rendered to clients, with its status derived at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    /// Task ID.
    pub id: String,
    /// Question text.
    pub question: String,
    /// Answer text.
    pub answer: String,
    /// Current stage.
    pub stage: u32,
    /// Number of stages before completion.
    pub total_stages: u32,
    /// Derived status.
    pub status: Status,
    /// Next due review, omitted once completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Completion time, omitted while incomplete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskView {
    /// Render `task` as seen at `now`.
    #[must_use]
    pub fn new(task: Task, now: DateTime<Utc>) -> Self {
        let status = task.status(now);
        Self {
            id: task.id,
            question: task.question,
            answer: task.answer,
            stage: task.stage,
            total_stages: stages::total_stages(),
            status,
            next_review_at: task.next_review_at,
            created_at: task.created_at,
            updated_at: task.updated_at,
            completed_at: task.completed_at,
        }
    }
}
