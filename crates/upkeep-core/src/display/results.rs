//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{MaintenancePlan, PlanDeletion, TaskInstance, WorkOrder};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use upkeep_core::{display::CreateResult, models::WorkOrder};
///
/// let order = WorkOrder {
///     id: 7,
///     title: Some("Leaking valve".to_string()),
///     status: "Scheduled".to_string(),
///     due_date: Some("2024-07-01".to_string()),
///     created_at: Timestamp::UNIX_EPOCH,
///     updated_at: Timestamp::UNIX_EPOCH,
/// };
/// let output = CreateResult::new(order).to_string();
/// assert!(output.starts_with("Recorded work order with ID: 7"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<MaintenancePlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<WorkOrder> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recorded work order with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, with an
/// optional list of changes.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: fmt::Display> UpdateResult<T> {
    fn fmt_update(&self, f: &mut fmt::Formatter<'_>, heading: fmt::Arguments<'_>) -> fmt::Result {
        writeln!(f, "{heading}")?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<MaintenancePlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_update(f, format_args!("Updated plan with ID: {}", self.resource.id))
    }
}

impl fmt::Display for UpdateResult<TaskInstance> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_update(
            f,
            format_args!("Updated task instance with ID: {}", self.resource.id),
        )
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<PlanDeletion> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = &self.resource.plan;
        writeln!(
            f,
            "Deleted plan for '{}' (ID: {}) and {} task instances",
            plan.asset_id, plan.id, self.resource.removed_tasks
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;
    use crate::models::{Frequency, TaskKind, TaskStatus};

    fn plan() -> MaintenancePlan {
        MaintenancePlan {
            id: 3,
            asset_id: "PUMP-7".to_string(),
            frequency: Some(Frequency::Weekly),
            start_date: Some(date(2024, 1, 1)),
            tasks: vec!["Grease bearings".to_string()],
            is_active: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_create_plan_result() {
        let output = CreateResult::new(plan()).to_string();
        assert!(output.starts_with("Created plan with ID: 3\n\n# 3. PUMP-7"));
    }

    #[test]
    fn test_update_task_result_lists_changes() {
        let task = TaskInstance {
            id: 40,
            plan_id: 3,
            asset_id: "PUMP-7".to_string(),
            task_description: "Grease bearings".to_string(),
            due_date: date(2024, 1, 8),
            status: TaskStatus::Completed,
            archived: true,
            archived_at: Some(Timestamp::UNIX_EPOCH),
            kind: TaskKind::Preventive,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };
        let changes = vec!["pending → completed".to_string(), "archived".to_string()];
        let output = UpdateResult::with_changes(task, changes).to_string();

        assert!(output.starts_with("Updated task instance with ID: 40"));
        assert!(output.contains("Changes made:\n- pending → completed\n- archived\n"));
        assert!(output.contains("### 40. Grease bearings (✓ Completed)"));
    }

    #[test]
    fn test_delete_result() {
        let deletion = PlanDeletion {
            plan: plan(),
            removed_tasks: 52,
        };
        assert_eq!(
            DeleteResult::new(deletion).to_string(),
            "Deleted plan for 'PUMP-7' (ID: 3) and 52 task instances\n"
        );
    }
}
