//! Pure scheduling rules: recurrence, checklist slots, plan expansion, the
//! archival rule and work-order tallying.
//!
//! Nothing in this module touches the database or the clock; callers pass
//! "today" or "now" explicitly. The [`crate::db`] and [`crate::engine`]
//! layers apply these rules inside transactions.

pub mod generator;
pub mod lifecycle;
pub mod recurrence;
pub mod slots;
pub mod tally;

use jiff::{civil::Date, tz::TimeZone, Timestamp};

pub use generator::{due_dates, expand_plan, Horizon, PlanExpansion};
pub use lifecycle::{age_in_days, should_archive};
pub use recurrence::next_occurrence;
pub use slots::{build_checklist, column_count, column_labels, slot_for, Checklist, ChecklistRow};
pub use tally::WorkOrderTally;

/// Calendar date of `now` in UTC. All day-granular rules use this date.
pub fn civil_today(now: Timestamp) -> Date {
    now.to_zoned(TimeZone::UTC).date()
}
