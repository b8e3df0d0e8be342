//! Core library for the Upkeep maintenance engine.
//!
//! Upkeep turns recurring maintenance plans into dated task instances,
//! tracks each instance through its short lifecycle, purges archived
//! instances after a retention window, and keeps a cached summary of work
//! order statistics for dashboards.
//!
//! # Layers
//!
//! - [`schedule`]: pure rules (recurrence, checklist slots, plan expansion,
//!   the archival rule, work-order tallying). No I/O, no clock.
//! - [`db`]: SQLite persistence; every multi-row write is one transaction.
//! - [`engine`]: the async [`Engine`] facade that external triggers call.
//! - [`display`]: markdown formatting for the CLI.
//!
//! # Quick Start
//!
//! ```rust
//! use upkeep_core::{
//!     params::{CreatePlan, GenerateTasks, ListTasks},
//!     EngineBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = EngineBuilder::new()
//!     .with_database_path(Some("upkeep.db"))
//!     .build()
//!     .await?;
//!
//! let plan = engine
//!     .create_plan(&CreatePlan {
//!         asset_id: "AHU-1".to_string(),
//!         frequency: Some("monthly".to_string()),
//!         start_date: Some("2024-01-01".to_string()),
//!         tasks: vec!["Replace filters".to_string()],
//!     })
//!     .await?;
//!
//! let report = engine.generate_tasks(&GenerateTasks::default()).await?;
//! println!("{report}");
//!
//! let tasks = engine
//!     .list_tasks(&ListTasks {
//!         plan_id: Some(plan.id),
//!         ..Default::default()
//!     })
//!     .await?;
//! for task in &tasks {
//!     println!("{} due {}", task.task_description, task.due_date);
//! }
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod params;
pub mod schedule;

// Re-export commonly used types
pub use db::Database;
pub use display::{CreateResult, DeleteResult, OperationStatus, Plans, TaskInstances, UpdateResult};
pub use engine::{Engine, EngineBuilder, EnginePolicy};
pub use error::{Result, UpkeepError};
pub use models::{
    AggregateSnapshot, Frequency, GenerationReport, MaintenancePlan, PlanDeletion, SkipReason,
    SweepReport, TaskFilter, TaskInstance, TaskStatus, WorkOrder,
};
pub use params::{
    AddUser, CreatePlan, DeletePlan, GenerateTasks, Id, ListPlans, ListTasks, RecordWorkOrder,
    SetTaskStatus, ShowChecklist,
};
pub use schedule::Checklist;
