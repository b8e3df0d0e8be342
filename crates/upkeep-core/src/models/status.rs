//! Task instance status and its lifecycle rules.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status of a generated task instance.
///
/// The lifecycle is one-directional: a pending task is closed exactly once,
/// as either completed or skipped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Awaiting the maintenance visit
    #[default]
    Pending,

    /// Work was carried out
    Completed,

    /// Occurrence was deliberately not carried out
    Skipped,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "completed" | "complete" | "done" => Ok(TaskStatus::Completed),
            "skipped" | "skip" => Ok(TaskStatus::Skipped),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

impl TaskStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
            TaskStatus::Skipped => "skipped",
        }
    }

    /// Whether this status ends the lifecycle.
    pub fn is_closed(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Skipped)
    }

    /// Whether a task in this status may be moved to `next`.
    ///
    /// Re-applying the current status is always allowed and is a no-op.
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        *self == next || (*self == TaskStatus::Pending && next.is_closed())
    }

    /// Status with an icon, for checklist cells and listings.
    ///
    /// ```rust
    /// use upkeep_core::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(TaskStatus::Skipped.with_icon(), "⤼ Skipped");
    /// assert_eq!(TaskStatus::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "✓ Completed",
            TaskStatus::Skipped => "⤼ Skipped",
            TaskStatus::Pending => "○ Pending",
        }
    }

    /// Single-character marker used inside checklist grids.
    pub fn icon(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "✓",
            TaskStatus::Skipped => "⤼",
            TaskStatus::Pending => "○",
        }
    }
}
