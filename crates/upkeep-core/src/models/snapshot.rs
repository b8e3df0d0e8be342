//! Dashboard aggregate snapshot.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Singleton summary of operational counters, stored as
/// `dashboard_stats/summary`.
///
/// The snapshot is a cache: every recompute overwrites it and no history is
/// kept. `last_updated` is always written so a stale snapshot can be told
/// apart from a fresh one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSnapshot {
    pub total_work_orders: u64,
    pub open_work_orders: u64,
    pub completed_work_orders: u64,
    pub in_progress_work_orders: u64,
    pub scheduled_work_orders: u64,
    pub pending_work_orders: u64,
    pub overdue_work_orders: u64,
    pub total_users: u64,
    pub total_task_instances: u64,
    /// Percentage of work orders completed, rounded
    pub completion_rate: u32,
    /// Percentage of open work orders that are overdue, rounded
    pub overdue_rate: u32,
    pub last_updated: Timestamp,
}
