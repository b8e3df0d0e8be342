//! Filter types for querying task instances.

use jiff::civil::Date;

use super::TaskStatus;
use crate::params::parse_date;

/// Filter options for listing task instances.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Only instances of this plan
    pub plan_id: Option<u64>,

    /// Only instances in this status
    pub status: Option<TaskStatus>,

    /// Inclusive due date range
    pub due_from: Option<Date>,
    pub due_until: Option<Date>,

    /// Include archived instances (hidden by default)
    pub include_archived: bool,
}

impl TaskFilter {
    /// Every instance of a plan, archived ones included.
    ///
    /// ```rust
    /// use upkeep_core::models::TaskFilter;
    ///
    /// let filter = TaskFilter::for_plan(7);
    /// assert_eq!(filter.plan_id, Some(7));
    /// assert!(filter.include_archived);
    /// ```
    pub fn for_plan(plan_id: u64) -> Self {
        Self {
            plan_id: Some(plan_id),
            include_archived: true,
            ..Default::default()
        }
    }
}

impl TryFrom<&crate::params::ListTasks> for TaskFilter {
    type Error = crate::UpkeepError;

    fn try_from(params: &crate::params::ListTasks) -> Result<Self, Self::Error> {
        let status = params
            .status
            .as_deref()
            .map(|s| {
                s.parse::<TaskStatus>()
                    .map_err(|reason| crate::UpkeepError::invalid_input("status").with_reason(reason))
            })
            .transpose()?;
        let due_from = params
            .due_from
            .as_deref()
            .map(|d| parse_date("due_from", d))
            .transpose()?;
        let due_until = params
            .due_until
            .as_deref()
            .map(|d| parse_date("due_until", d))
            .transpose()?;

        if let (Some(from), Some(until)) = (due_from, due_until) {
            if from > until {
                return Err(crate::UpkeepError::invalid_input("due_until")
                    .with_reason(format!("{until} is before {from}")));
            }
        }

        Ok(Self {
            plan_id: params.plan_id,
            status,
            due_from,
            due_until,
            include_archived: params.include_archived,
        })
    }
}
