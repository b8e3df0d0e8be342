//! Work-order classification for the dashboard snapshot.

use jiff::{
    civil::{Date, DateTime},
    tz::TimeZone,
    Timestamp,
};

use crate::models::{AggregateSnapshot, WorkOrder};

/// Running counters over a set of work orders.
///
/// Statuses are compared lower-cased. Every status other than `completed`
/// counts as open; `in progress`, `scheduled` and `pending` are additionally
/// counted in their own buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkOrderTally {
    pub total: u64,
    pub completed: u64,
    pub in_progress: u64,
    pub scheduled: u64,
    pub pending: u64,
    pub open: u64,
    pub overdue: u64,
}

impl WorkOrderTally {
    /// Tallies a complete set of work orders.
    pub fn from_orders<'a, I>(orders: I, now: Timestamp) -> Self
    where
        I: IntoIterator<Item = &'a WorkOrder>,
    {
        let mut tally = Self::default();
        for order in orders {
            tally.record(order, now);
        }
        tally
    }

    /// Adds one work order to the counters.
    ///
    /// An order is overdue when it is not completed and its due date is
    /// strictly before `now`. Orders without a readable due date are never
    /// overdue.
    pub fn record(&mut self, order: &WorkOrder, now: Timestamp) {
        self.total += 1;

        let status = order.status.trim().to_lowercase();
        let completed = status == "completed";
        match status.as_str() {
            "completed" => self.completed += 1,
            "in progress" | "in-progress" | "in_progress" | "inprogress" => {
                self.in_progress += 1;
                self.open += 1;
            }
            "scheduled" => {
                self.scheduled += 1;
                self.open += 1;
            }
            "pending" => {
                self.pending += 1;
                self.open += 1;
            }
            _ => self.open += 1,
        }

        if !completed
            && order
                .due_date
                .as_deref()
                .and_then(parse_due)
                .is_some_and(|due| due < now)
        {
            self.overdue += 1;
        }
    }

    /// Completed share of all work orders, in whole percent.
    pub fn completion_rate(&self) -> u32 {
        percentage(self.completed, self.total)
    }

    /// Overdue share of open work orders, in whole percent.
    pub fn overdue_rate(&self) -> u32 {
        percentage(self.overdue, self.open)
    }

    /// Snapshot of these counters plus the independent totals.
    pub fn into_snapshot(
        self,
        total_users: u64,
        total_task_instances: u64,
        now: Timestamp,
    ) -> AggregateSnapshot {
        AggregateSnapshot {
            total_work_orders: self.total,
            open_work_orders: self.open,
            completed_work_orders: self.completed,
            in_progress_work_orders: self.in_progress,
            scheduled_work_orders: self.scheduled,
            pending_work_orders: self.pending,
            overdue_work_orders: self.overdue,
            total_users,
            total_task_instances,
            completion_rate: self.completion_rate(),
            overdue_rate: self.overdue_rate(),
            last_updated: now,
        }
    }
}

/// Reads a work-order due date.
///
/// Accepts an RFC 3339 timestamp, a civil datetime (taken as UTC) or a bare
/// date (midnight UTC).
pub fn parse_due(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Some(ts);
    }
    if let Ok(dt) = raw.parse::<DateTime>() {
        return dt.to_zoned(TimeZone::UTC).ok().map(|z| z.timestamp());
    }
    raw.parse::<Date>()
        .ok()
        .and_then(|d| d.to_zoned(TimeZone::UTC).ok())
        .map(|z| z.timestamp())
}

fn percentage(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}
