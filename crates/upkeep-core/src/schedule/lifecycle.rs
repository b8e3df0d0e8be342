//! Archival rule applied when a task instance is closed.

use jiff::civil::Date;

use crate::models::TaskStatus;

/// Whole days from `due` to `today`; negative for future due dates.
pub fn age_in_days(due: Date, today: Date) -> i64 {
    today
        .since(due)
        .map(|span| i64::from(span.get_days()))
        .unwrap_or(0)
}

/// Whether a status change from `from` to `to` archives the instance.
///
/// Only a change *into* completed or skipped from a different status counts,
/// only while the instance is unarchived, and only once the due date is at
/// least `archive_after_days` old. Archival never reverts, so an archived
/// instance always yields `false`.
pub fn should_archive(
    from: TaskStatus,
    to: TaskStatus,
    archived: bool,
    due: Date,
    today: Date,
    archive_after_days: i64,
) -> bool {
    if archived || from == to || !to.is_closed() {
        return false;
    }
    age_in_days(due, today) >= archive_after_days
}
