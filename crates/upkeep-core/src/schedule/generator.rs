//! Expansion of a maintenance plan into dated task instances.

use jiff::{civil::Date, Span};

use super::next_occurrence;
use crate::{
    error::{Result, UpkeepError},
    models::{Frequency, MaintenancePlan, NewTaskInstance, SkipReason},
};

/// Window of dates generation may write: from `today` to `until` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    pub today: Date,
    pub until: Date,
}

impl Horizon {
    /// Horizon ending `horizon_days` after `today`.
    pub fn new(today: Date, horizon_days: i64) -> Result<Self> {
        let until = Span::new()
            .try_days(horizon_days)
            .and_then(|span| today.checked_add(span))
            .map_err(|e| UpkeepError::invalid_input("horizon_days").with_reason(e.to_string()))?;
        Ok(Self { today, until })
    }
}

/// Outcome of expanding one plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanExpansion {
    /// Instances to write, ordered by due date then plan task order
    Ready(Vec<NewTaskInstance>),
    /// Plan is inert for this run
    Skipped(SkipReason),
}

/// Due dates of a `frequency` sequence starting at `start` that fall inside
/// `horizon`.
///
/// Occurrences before `horizon.today` are stepped over without being
/// emitted. Returns `None` if the sequence stops advancing before it leaves
/// the horizon.
///
/// ```rust
/// use jiff::civil::date;
/// use upkeep_core::{models::Frequency, schedule::{due_dates, Horizon}};
///
/// let horizon = Horizon::new(date(2024, 1, 10), 365)?;
/// let dates = due_dates(date(2024, 1, 1), Frequency::Weekly, &horizon).unwrap();
/// assert_eq!(dates[0], date(2024, 1, 15));
/// # Ok::<(), upkeep_core::UpkeepError>(())
/// ```
pub fn due_dates(start: Date, frequency: Frequency, horizon: &Horizon) -> Option<Vec<Date>> {
    let mut due = start;
    while due < horizon.today {
        due = advance(due, frequency)?;
    }

    let mut dates = Vec::new();
    while due <= horizon.until {
        dates.push(due);
        due = advance(due, frequency)?;
    }
    Some(dates)
}

fn advance(due: Date, frequency: Frequency) -> Option<Date> {
    let next = next_occurrence(due, frequency);
    (next > due).then_some(next)
}

/// Expands `plan` into the instances due inside `horizon`.
///
/// Every task description recurs independently, so each due date yields one
/// instance per description.
pub fn expand_plan(plan: &MaintenancePlan, horizon: &Horizon) -> PlanExpansion {
    if !plan.is_active {
        return PlanExpansion::Skipped(SkipReason::Inactive);
    }
    let Some(start) = plan.start_date else {
        return PlanExpansion::Skipped(SkipReason::MissingStartDate);
    };
    let Some(frequency) = plan.frequency else {
        return PlanExpansion::Skipped(SkipReason::MissingFrequency);
    };
    if plan.tasks.is_empty() {
        return PlanExpansion::Skipped(SkipReason::NoTasks);
    }
    let Some(dates) = due_dates(start, frequency, horizon) else {
        return PlanExpansion::Skipped(SkipReason::RecurrenceStalled);
    };

    let instances = dates
        .into_iter()
        .flat_map(|due_date| {
            plan.tasks.iter().map(move |description| NewTaskInstance {
                plan_id: plan.id,
                asset_id: plan.asset_id.clone(),
                task_description: description.clone(),
                due_date,
            })
        })
        .collect();
    PlanExpansion::Ready(instances)
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;

    fn plan(frequency: Option<Frequency>, start_date: Option<Date>, tasks: &[&str]) -> MaintenancePlan {
        MaintenancePlan {
            id: 1,
            asset_id: "AHU-01".to_string(),
            frequency,
            start_date,
            tasks: tasks.iter().map(|t| t.to_string()).collect(),
            is_active: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_weekly_sequence_from_past_start() {
        let horizon = Horizon::new(date(2024, 1, 10), 365).unwrap();
        assert_eq!(horizon.until, date(2025, 1, 9));

        let dates = due_dates(date(2024, 1, 1), Frequency::Weekly, &horizon).unwrap();
        assert_eq!(dates.first(), Some(&date(2024, 1, 15)));
        assert!(dates.windows(2).all(|w| w[1] == next_occurrence(w[0], Frequency::Weekly)));
        assert!(dates.iter().all(|d| *d <= horizon.until));
        assert_eq!(dates.last(), Some(&date(2025, 1, 6)));
    }

    #[test]
    fn test_occurrence_due_today_is_generated() {
        let horizon = Horizon::new(date(2024, 3, 1), 365).unwrap();
        let dates = due_dates(date(2024, 1, 1), Frequency::Monthly, &horizon).unwrap();
        assert_eq!(dates.first(), Some(&date(2024, 3, 1)));
        // 2024-03-01 through 2025-03-01 inclusive
        assert_eq!(dates.len(), 13);
    }

    #[test]
    fn test_future_start_is_first_occurrence() {
        let horizon = Horizon::new(date(2024, 1, 1), 365).unwrap();
        let dates = due_dates(date(2024, 5, 20), Frequency::Quarterly, &horizon).unwrap();
        assert_eq!(dates, vec![date(2024, 5, 20), date(2024, 8, 20), date(2024, 11, 20)]);
    }

    #[test]
    fn test_start_beyond_horizon_yields_nothing() {
        let horizon = Horizon::new(date(2024, 1, 1), 365).unwrap();
        let dates = due_dates(date(2026, 1, 1), Frequency::Daily, &horizon).unwrap();
        assert!(dates.is_empty());
    }

    #[test]
    fn test_one_instance_per_date_and_description() {
        let horizon = Horizon::new(date(2024, 1, 1), 365).unwrap();
        let plan = plan(
            Some(Frequency::SemiAnnually),
            Some(date(2024, 1, 1)),
            &["Replace filters", "Inspect belts"],
        );

        let PlanExpansion::Ready(instances) = expand_plan(&plan, &horizon) else {
            panic!("plan should expand");
        };
        // 2024-01-01 and 2024-07-01; 2025-01-01 is one day past the horizon
        assert_eq!(instances.len(), 4);
        assert_eq!(instances[0].task_description, "Replace filters");
        assert_eq!(instances[1].task_description, "Inspect belts");
        assert_eq!(instances[1].due_date, date(2024, 1, 1));
        assert_eq!(instances[3].due_date, date(2024, 7, 1));
        assert!(instances.iter().all(|i| i.asset_id == "AHU-01" && i.plan_id == 1));
    }

    #[test]
    fn test_incomplete_plans_are_skipped() {
        let horizon = Horizon::new(date(2024, 1, 1), 365).unwrap();

        let no_start = plan(Some(Frequency::Daily), None, &["Check"]);
        assert_eq!(
            expand_plan(&no_start, &horizon),
            PlanExpansion::Skipped(SkipReason::MissingStartDate)
        );

        let no_frequency = plan(None, Some(date(2024, 1, 1)), &["Check"]);
        assert_eq!(
            expand_plan(&no_frequency, &horizon),
            PlanExpansion::Skipped(SkipReason::MissingFrequency)
        );

        let no_tasks = plan(Some(Frequency::Daily), Some(date(2024, 1, 1)), &[]);
        assert_eq!(
            expand_plan(&no_tasks, &horizon),
            PlanExpansion::Skipped(SkipReason::NoTasks)
        );

        let mut inactive = plan(Some(Frequency::Daily), Some(date(2024, 1, 1)), &["Check"]);
        inactive.is_active = false;
        assert_eq!(
            expand_plan(&inactive, &horizon),
            PlanExpansion::Skipped(SkipReason::Inactive)
        );
    }

    #[test]
    fn test_stalled_sequence_is_detected() {
        let horizon = Horizon {
            today: date(9999, 12, 1),
            until: date(9999, 12, 31),
        };
        assert_eq!(due_dates(date(9999, 12, 1), Frequency::Annually, &horizon), None);
    }
}
