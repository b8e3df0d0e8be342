//! Parameter structures for engine operations.
//!
//! These structures are shared by every interface (the CLI today, an HTTP
//! trigger or scheduler adapter later) and carry no framework derives.
//! Interface layers define their own argument types and convert into these
//! with `From`:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │     Engine      │
//! │  (clap derives) │───▶│ (validated here)│───▶│   operations    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Values that arrive as text (frequencies, dates, statuses) are validated by
//! the `validate` methods so every interface reports the same errors.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, UpkeepError},
    models::{Frequency, TaskStatus},
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for authoring a maintenance plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlan {
    /// Asset the plan maintains
    pub asset_id: String,
    /// Recurrence interval (daily, weekly, monthly, quarterly,
    /// semi-annually, annually)
    pub frequency: Option<String>,
    /// First occurrence, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Task descriptions; each recurs on its own
    #[serde(default)]
    pub tasks: Vec<String>,
}

impl CreatePlan {
    /// Validates the textual fields.
    ///
    /// Frequency and start date may be absent (the plan is then inert), but
    /// when present they must parse.
    ///
    /// ```rust
    /// use upkeep_core::params::CreatePlan;
    ///
    /// let params = CreatePlan {
    ///     asset_id: "CHILLER-2".to_string(),
    ///     frequency: Some("quarterly".to_string()),
    ///     start_date: Some("2024-02-01".to_string()),
    ///     tasks: vec!["Check refrigerant pressure".to_string()],
    /// };
    /// let (frequency, start_date) = params.validate()?;
    /// assert!(frequency.is_some() && start_date.is_some());
    /// # Ok::<(), upkeep_core::UpkeepError>(())
    /// ```
    pub fn validate(&self) -> Result<(Option<Frequency>, Option<Date>)> {
        if self.asset_id.trim().is_empty() {
            return Err(UpkeepError::invalid_input("asset_id").with_reason("Asset ID cannot be empty"));
        }
        if self.tasks.iter().any(|t| t.trim().is_empty()) {
            return Err(UpkeepError::invalid_input("tasks")
                .with_reason("Task descriptions cannot be empty"));
        }

        let frequency = self
            .frequency
            .as_deref()
            .map(|f| {
                f.parse::<Frequency>()
                    .map_err(|reason| UpkeepError::invalid_input("frequency").with_reason(reason))
            })
            .transpose()?;
        let start_date = self
            .start_date
            .as_deref()
            .map(|d| parse_date("start_date", d))
            .transpose()?;

        Ok((frequency, start_date))
    }
}

/// Parameters for listing plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPlans {
    /// Include deactivated plans
    #[serde(default)]
    pub include_inactive: bool,
}

/// Parameters for permanently deleting a plan and its task instances.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeletePlan {
    /// The ID of the plan to delete
    pub id: u64,
    /// Must be true to proceed
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for a generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateTasks {
    /// Restrict the run to one plan; all plans when `None`
    pub plan_id: Option<u64>,
}

/// Parameters for listing task instances.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTasks {
    /// Only instances of this plan
    pub plan_id: Option<u64>,
    /// Only instances in this status
    pub status: Option<String>,
    /// Earliest due date, `YYYY-MM-DD`, inclusive
    pub due_from: Option<String>,
    /// Latest due date, `YYYY-MM-DD`, inclusive
    pub due_until: Option<String>,
    /// Include archived instances
    #[serde(default)]
    pub include_archived: bool,
}

/// Parameters for changing a task instance's status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetTaskStatus {
    /// The ID of the task instance
    pub id: u64,
    /// New status (pending, completed, skipped)
    pub status: String,
}

impl SetTaskStatus {
    /// Parses the requested status.
    pub fn validate(&self) -> Result<TaskStatus> {
        self.status
            .parse::<TaskStatus>()
            .map_err(|reason| UpkeepError::invalid_input("status").with_reason(reason))
    }
}

/// Parameters for rendering a plan's checklist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowChecklist {
    /// The ID of the plan
    pub plan_id: u64,
    /// Checklist year; the current year when `None`
    pub year: Option<i16>,
}

/// Parameters for creating or updating a work order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordWorkOrder {
    /// Existing work order to update; a new one is created when `None`
    pub id: Option<u64>,
    /// Optional short title
    pub title: Option<String>,
    /// Free-form status
    pub status: String,
    /// Due date as entered; unparseable values are stored as-is
    pub due_date: Option<String>,
}

impl RecordWorkOrder {
    /// Rejects a blank status and IDs outside SQLite's positive rowid
    /// range; everything else is free-form.
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = self.id {
            if id == 0 || id > i64::MAX as u64 {
                return Err(UpkeepError::invalid_input("id")
                    .with_reason(format!("Work order ID must be between 1 and {}", i64::MAX)));
            }
        }
        if self.status.trim().is_empty() {
            return Err(UpkeepError::invalid_input("status")
                .with_reason("Work order status cannot be empty"));
        }
        Ok(())
    }
}

/// Parameters for registering a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddUser {
    pub name: String,
}

pub(crate) fn parse_date(field: &str, value: &str) -> Result<Date> {
    value.trim().parse::<Date>().map_err(|e| {
        UpkeepError::invalid_input(field).with_reason(format!("Expected YYYY-MM-DD, got '{value}': {e}"))
    })
}
