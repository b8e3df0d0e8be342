//! Task instance model.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::TaskStatus;

/// Kind tag carried by every generated instance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TaskKind {
    #[default]
    Preventive,
}

impl TaskKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Preventive => "Preventive",
        }
    }
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Preventive" => Ok(TaskKind::Preventive),
            _ => Err(format!("Invalid task kind: {s}")),
        }
    }
}

/// One concrete, dated occurrence of a plan's task description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskInstance {
    /// Unique identifier for the instance
    pub id: u64,

    /// Owning plan
    pub plan_id: u64,

    /// Asset ID copied from the plan at generation time
    pub asset_id: String,

    /// Task description copied from the plan at generation time
    pub task_description: String,

    /// Scheduled date; fixed once generated
    pub due_date: Date,

    /// Lifecycle status
    pub status: TaskStatus,

    /// Set once, never cleared
    pub archived: bool,

    /// When `archived` was set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<Timestamp>,

    /// Kind tag
    #[serde(default)]
    pub kind: TaskKind,

    /// Timestamp when the instance was generated (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the instance was last modified (UTC)
    pub updated_at: Timestamp,
}

/// A task instance that generation wants to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskInstance {
    pub plan_id: u64,
    pub asset_id: String,
    pub task_description: String,
    pub due_date: Date,
}
