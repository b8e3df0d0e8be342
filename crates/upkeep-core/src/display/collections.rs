//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use crate::models::{MaintenancePlan, TaskInstance};

/// Newtype wrapper for displaying a list of plans, one short block each.
pub struct Plans(pub Vec<MaintenancePlan>);

impl Plans {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plans in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the plans.
    pub fn iter(&self) -> std::slice::Iter<'_, MaintenancePlan> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Plans {
    type Item = &'a MaintenancePlan;
    type IntoIter = std::slice::Iter<'a, MaintenancePlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Plans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }

        for plan in &self.0 {
            let inactive = if plan.is_active { "" } else { " [inactive]" };
            writeln!(f, "## {} (ID: {}){inactive}", plan.asset_id, plan.id)?;
            writeln!(f)?;
            match plan.frequency {
                Some(frequency) => write!(f, "- **Frequency**: {}", frequency.label())?,
                None => write!(f, "- **Frequency**: *not set*")?,
            }
            if let Some(start) = plan.start_date {
                write!(f, ", from {start}")?;
            }
            writeln!(f)?;
            writeln!(f, "- **Tasks**: {}", plan.tasks.len())?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying task instances as a table.
///
/// # Examples
///
/// ```rust
/// use upkeep_core::display::TaskInstances;
///
/// let empty = TaskInstances(vec![]);
/// assert_eq!(empty.to_string(), "No task instances found.\n");
/// ```
pub struct TaskInstances(pub Vec<TaskInstance>);

impl TaskInstances {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of task instances in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the task instances.
    pub fn iter(&self) -> std::slice::Iter<'_, TaskInstance> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a TaskInstances {
    type Item = &'a TaskInstance;
    type IntoIter = std::slice::Iter<'a, TaskInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for TaskInstances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No task instances found.");
        }

        writeln!(f, "| ID | Due | Asset | Task | Status |")?;
        writeln!(f, "|-:|:-|:-|:-|:-|")?;
        for task in &self.0 {
            let archived = if task.archived { " (archived)" } else { "" };
            writeln!(
                f,
                "| {} | {} | {} | {} | {}{archived} |",
                task.id,
                task.due_date,
                task.asset_id,
                task.task_description,
                task.status.with_icon()
            )?;
        }
        Ok(())
    }
}
