//! Task model types and the review state machine.

use crate::tasks::id::generate_task_id;
use crate::tasks::stages;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derived review status of a task. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Scheduled for a review that is not yet due.
    Pending,
    /// The scheduled review time has arrived.
    Ready,
    /// Every stage of the ladder has been passed.
    Done,
}

impl Status {
    /// Get the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready => "ready",
            Self::Done => "done",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome reported by a client after reviewing a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// The answer was recalled; advance one stage.
    Remembered,
    /// The answer was not recalled; restart the ladder.
    Forgot,
}

impl ReviewOutcome {
    /// Parse a review result string.
    ///
    /// Matching ignores surrounding whitespace and case.
    ///
    /// # Errors
    ///
    /// Returns an error if the string names neither outcome.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, InvalidReviewResult> {
        match s.trim().to_lowercase().as_str() {
            "remembered" | "remember" | "ok" | "done" => Ok(Self::Remembered),
            "forgot" | "forget" | "miss" => Ok(Self::Forgot),
            _ => Err(InvalidReviewResult(s.to_string())),
        }
    }

    /// Get the canonical string representation of the outcome.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Remembered => "remembered",
            Self::Forgot => "forgot",
        }
    }
}

/// Error when a review result string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidReviewResult(pub String);

impl std::fmt::Display for InvalidReviewResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "result must be 'remembered' or 'forgot'")
    }
}

impl std::error::Error for InvalidReviewResult {}

/// Error when a question or answer is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyContent;

impl std::fmt::Display for EmptyContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "question and answer are required")
    }
}

impl std::error::Error for EmptyContent {}

/// Trim question and answer, rejecting either if nothing is left.
///
/// # Errors
///
/// Returns [`EmptyContent`] if either value is empty after trimming.
pub fn validate_content(question: &str, answer: &str) -> Result<(String, String), EmptyContent> {
    let question = question.trim();
    let answer = answer.trim();
    if question.is_empty() || answer.is_empty() {
        return Err(EmptyContent);
    }
    Ok((question.to_string(), answer.to_string()))
}

/// One question/answer item progressing through the stage ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier (24 hex chars).
    pub id: String,
    /// Prompt shown at review time.
    pub question: String,
    /// Expected answer.
    pub answer: String,
    /// Zero-based index into the stage ladder; equals the ladder length once done.
    pub stage: u32,
    /// When the next review is due. `None` once the task is completed.
    pub next_review_at: Option<DateTime<Utc>>,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task was last changed.
    pub updated_at: DateTime<Utc>,
    /// When the last stage was passed, if it has been.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a task at stage 0 with its first review scheduled.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyContent`] if the question or answer is blank.
    pub fn new(question: &str, answer: &str, now: DateTime<Utc>) -> Result<Self, EmptyContent> {
        let (question, answer) = validate_content(question, answer)?;
        Ok(Self {
            id: generate_task_id(),
            question,
            answer,
            stage: 0,
            next_review_at: Some(now + stages::first_interval()),
            created_at: now,
            updated_at: now,
            completed_at: None,
        })
    }

    /// Whether every stage has been passed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed_at.is_some() || self.stage >= stages::total_stages()
    }

    /// Classify the task relative to `now`.
    #[must_use]
    pub fn status(&self, now: DateTime<Utc>) -> Status {
        if self.is_completed() {
            return Status::Done;
        }
        match self.next_review_at {
            Some(due) if due > now => Status::Pending,
            _ => Status::Ready,
        }
    }

    /// Advance to the next stage, or complete the task from the last one.
    ///
    /// Does nothing if the task is already completed.
    pub fn mark_remembered(&mut self, now: DateTime<Utc>) {
        if self.completed_at.is_some() {
            return;
        }

        // The wait is chosen by the stage being entered, so 0 -> 1 waits ladder[1].
        let next = self.stage.saturating_add(1);
        if let Some(wait) = stages::interval(next) {
            self.stage = next;
            self.next_review_at = Some(now + wait);
        } else {
            self.stage = stages::total_stages();
            self.next_review_at = None;
            self.completed_at = Some(now);
        }
        self.updated_at = now;
    }

    /// Restart the ladder, un-completing the task if necessary.
    pub fn mark_forgot(&mut self, now: DateTime<Utc>) {
        self.stage = 0;
        self.completed_at = None;
        self.next_review_at = Some(now + stages::first_interval());
        self.updated_at = now;
    }

    /// Apply a review outcome at `now`.
    pub fn apply_review(&mut self, outcome: ReviewOutcome, now: DateTime<Utc>) {
        match outcome {
            ReviewOutcome::Remembered => self.mark_remembered(now),
            ReviewOutcome::Forgot => self.mark_forgot(now),
        }
    }

    /// Replace the question and answer text.
    ///
    /// The caller is responsible for bumping `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyContent`] if either value is blank; the task is left unchanged.
    pub fn update_content(&mut self, question: &str, answer: &str) -> Result<(), EmptyContent> {
        let (question, answer) = validate_content(question, answer)?;
        self.question = question;
        self.answer = answer;
        Ok(())
    }
}
