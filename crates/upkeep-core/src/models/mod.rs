//! Data models for maintenance plans, task instances, work orders and the
//! dashboard snapshot.
//!
//! Display implementations live in [`crate::display`], keeping the records
//! here free of presentation concerns.
//!
//! # Ownership
//!
//! - [`MaintenancePlan`] is authored outside the engine and only read by it.
//! - [`TaskInstance`] is created in bulk by generation, mutated by status
//!   changes, and removed by cascade deletes or the retention sweep.
//! - [`WorkOrder`] is read by the statistics aggregation only.
//! - [`AggregateSnapshot`] is a cache that is fully recomputed on demand.

pub mod filters;
pub mod frequency;
pub mod plan;
pub mod report;
pub mod snapshot;
pub mod status;
pub mod task;
pub mod work_order;


pub use filters::TaskFilter;
pub use frequency::Frequency;
pub use plan::MaintenancePlan;
pub use report::{GenerationReport, PlanDeletion, SkipReason, SkippedPlan, SweepReport};
pub use snapshot::AggregateSnapshot;
pub use status::TaskStatus;
pub use task::{NewTaskInstance, TaskInstance, TaskKind};
pub use work_order::WorkOrder;
