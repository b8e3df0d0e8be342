//! Checklist column placement.
//!
//! A checklist renders one row per task description and one column per
//! periodic slot of the plan's frequency. [`slot_for`] must agree with the
//! dates produced by [`super::next_occurrence`]: any renderer that rebuilds
//! the grid independently gets the same column for the same date.
//!
//! | Frequency     | Columns | Slot                                  |
//! |---------------|---------|---------------------------------------|
//! | Daily         | 7       | day of week, Sunday = 0               |
//! | Weekly        | 5       | `(day - 1) / 7`; days 29-31 land in 4 |
//! | Monthly       | 12      | month, January = 0                    |
//! | Quarterly     | 4       | `month / 3`                           |
//! | Semi-annually | 2       | `month / 6`                           |
//! | Annually      | 1       | always 0                              |
//!
//! The annual grid has a single column labelled with the checklist year, so
//! instances from different years share it.

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::Serialize;

use crate::models::{Frequency, MaintenancePlan, TaskInstance, TaskStatus};

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Zero-based checklist column for `date` under `frequency`.
///
/// ```rust
/// use jiff::civil::date;
/// use upkeep_core::{models::Frequency, schedule::slot_for};
///
/// // 2024-06-05 is a Wednesday
/// assert_eq!(slot_for(date(2024, 6, 5), Frequency::Daily), 3);
/// assert_eq!(slot_for(date(2024, 6, 30), Frequency::Weekly), 4);
/// ```
pub fn slot_for(date: Date, frequency: Frequency) -> usize {
    // month() is 1-based, the slots are 0-based
    let month0 = (date.month() - 1) as usize;
    match frequency {
        Frequency::Daily => date.weekday().to_sunday_zero_offset() as usize,
        Frequency::Weekly => ((date.day() - 1) / 7) as usize,
        Frequency::Monthly => month0,
        Frequency::Quarterly => month0 / 3,
        Frequency::SemiAnnually => month0 / 6,
        Frequency::Annually => 0,
    }
}

/// Number of columns in a checklist of this frequency.
pub fn column_count(frequency: Frequency) -> usize {
    match frequency {
        Frequency::Daily => 7,
        Frequency::Weekly => 5,
        Frequency::Monthly => 12,
        Frequency::Quarterly => 4,
        Frequency::SemiAnnually => 2,
        Frequency::Annually => 1,
    }
}

/// Column headers for a checklist of this frequency in `year`.
pub fn column_labels(frequency: Frequency, year: i16) -> Vec<String> {
    match frequency {
        Frequency::Daily => WEEKDAY_LABELS.iter().map(|d| d.to_string()).collect(),
        Frequency::Weekly => (1..=5).map(|w| format!("Week {w}")).collect(),
        Frequency::Monthly => MONTH_LABELS.iter().map(|m| m.to_string()).collect(),
        Frequency::Quarterly => (1..=4).map(|q| format!("Q{q}")).collect(),
        Frequency::SemiAnnually => vec!["H1".to_string(), "H2".to_string()],
        Frequency::Annually => vec![year.to_string()],
    }
}

/// One instance as placed in a checklist cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistEntry {
    pub task_id: u64,
    pub due_date: Date,
    pub status: TaskStatus,
}

/// One task description across all columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistRow {
    pub task_description: String,
    /// One cell per column, entries ordered by due date
    pub cells: Vec<Vec<ChecklistEntry>>,
}

/// A plan's instances arranged by slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checklist {
    pub plan_id: u64,
    pub asset_id: String,
    pub frequency: Frequency,
    pub year: i16,
    pub columns: Vec<String>,
    pub rows: Vec<ChecklistRow>,
}

/// Arranges `tasks` of `plan` into a checklist for `year`.
///
/// Instances due in other years are left out, except on annual checklists
/// where every instance falls into the single column. Rows follow the plan's
/// task order; descriptions no longer on the plan are appended after it.
/// Returns `None` when the plan has no frequency.
pub fn build_checklist(
    plan: &MaintenancePlan,
    tasks: &[TaskInstance],
    year: i16,
) -> Option<Checklist> {
    let frequency = plan.frequency?;
    let columns = column_labels(frequency, year);

    let mut by_description: BTreeMap<&str, Vec<&TaskInstance>> = BTreeMap::new();
    for task in tasks.iter().filter(|t| t.plan_id == plan.id) {
        if frequency != Frequency::Annually && task.due_date.year() != year {
            continue;
        }
        by_description
            .entry(task.task_description.as_str())
            .or_default()
            .push(task);
    }

    let mut order: Vec<&str> = plan.tasks.iter().map(String::as_str).collect();
    for description in by_description.keys() {
        if !order.contains(description) {
            order.push(*description);
        }
    }

    let rows = order
        .into_iter()
        .map(|description| {
            let mut cells = vec![Vec::new(); columns.len()];
            let mut instances = by_description.remove(description).unwrap_or_default();
            instances.sort_by_key(|t| t.due_date);
            for task in instances {
                cells[slot_for(task.due_date, frequency)].push(ChecklistEntry {
                    task_id: task.id,
                    due_date: task.due_date,
                    status: task.status,
                });
            }
            ChecklistRow {
                task_description: description.to_string(),
                cells,
            }
        })
        .collect();

    Some(Checklist {
        plan_id: plan.id,
        asset_id: plan.asset_id.clone(),
        frequency,
        year,
        columns,
        rows,
    })
}
