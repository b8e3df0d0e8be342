//! Work orders, users and the dashboard snapshot.

use super::Engine;
use crate::{
    error::{Result, UpkeepError},
    models::{AggregateSnapshot, WorkOrder},
    params::{AddUser, Id, RecordWorkOrder},
    schedule::WorkOrderTally,
};

impl Engine {
    /// Creates or updates a work order, then refreshes the snapshot.
    ///
    /// A failed refresh is logged and does not fail the write; the previous
    /// snapshot stays in place with its older `last_updated`.
    pub async fn record_work_order(&self, params: &RecordWorkOrder) -> Result<WorkOrder> {
        params.validate()?;
        let id = params.id;
        let title = params.title.clone();
        let status = params.status.trim().to_string();
        let due_date = params.due_date.clone();
        let now = self.now();

        let order = self
            .run_blocking(move |db| {
                db.upsert_work_order(id, title.as_deref(), &status, due_date.as_deref(), now)
            })
            .await?;

        if let Err(e) = self.recompute_stats().await {
            log::error!(
                "Dashboard statistics not refreshed after work order {}: {e}",
                order.id
            );
        }
        Ok(order)
    }

    /// Retrieves a work order by its ID.
    pub async fn get_work_order(&self, params: &Id) -> Result<Option<WorkOrder>> {
        let order_id = params.id;
        self.run_blocking(move |db| db.get_work_order(order_id)).await
    }

    /// Rescans every work order and the two counters and merges the result
    /// into the snapshot.
    ///
    /// Work orders are read in pages of `stats_page_size`. Concurrent
    /// recomputes are not coordinated; the last one to write wins.
    pub async fn recompute_stats(&self) -> Result<AggregateSnapshot> {
        let now = self.now();
        let page_size = self.policy.stats_page_size;

        self.run_blocking(move |db| {
            let mut tally = WorkOrderTally::default();
            let mut after_id = 0;
            loop {
                let page = db.work_order_page(after_id, page_size)?;
                for order in &page {
                    tally.record(order, now);
                }
                match page.last() {
                    Some(last) if page.len() == page_size => after_id = last.id,
                    _ => break,
                }
            }

            let snapshot = tally.into_snapshot(db.count_users()?, db.count_tasks()?, now);
            db.merge_snapshot(&snapshot)?;

            log::debug!(
                "Recomputed dashboard statistics over {} work orders",
                snapshot.total_work_orders
            );
            Ok(snapshot)
        })
        .await
    }

    /// Reads the current snapshot without recomputing it.
    pub async fn stats(&self) -> Result<Option<AggregateSnapshot>> {
        self.run_blocking(|db| db.read_snapshot()).await
    }

    /// Registers a user. Returns the new ID.
    pub async fn add_user(&self, params: &AddUser) -> Result<u64> {
        let name = params.name.trim().to_string();
        if name.is_empty() {
            return Err(UpkeepError::invalid_input("name").with_reason("User name cannot be empty"));
        }
        let now = self.now();
        self.run_blocking(move |db| db.create_user(&name, now)).await
    }
}
