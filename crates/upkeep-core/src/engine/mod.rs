//! Async facade over the maintenance engine.
//!
//! [`Engine`] is the single entry point for every trigger: the weekly
//! generation tick, the daily retention tick, status changes, plan deletion
//! and work-order mutations. Each operation opens its own connection on the
//! blocking thread pool and runs as an independent unit of work, so several
//! triggers may run at once against the same file.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Triggers     │    │     Engine      │    │    Database     │
//! │ (CLI, cron,     │───▶│ (schedule rules │───▶│   (via db/)     │
//! │  timers)        │    │  + policy)      │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: configures and creates [`Engine`] instances
//! - [`policy`]: archival, retention, horizon and paging constants
//! - [`plan_ops`]: plan authoring, deletion and the cascade delete
//! - [`generation`]: expansion of plans into task instances
//! - [`task_ops`]: task listing, status lifecycle and checklists
//! - [`retention`]: the bounded purge of aged-out archived instances
//! - [`stats`]: work orders, users and the dashboard snapshot
//!
//! # Usage
//!
//! ```rust,no_run
//! use upkeep_core::{params::GenerateTasks, EngineBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = EngineBuilder::new()
//!     .with_database_path(Some("/var/lib/upkeep/upkeep.db"))
//!     .build()
//!     .await?;
//!
//! // Weekly tick
//! let report = engine.generate_tasks(&GenerateTasks::default()).await?;
//! println!("{} instances created", report.created);
//!
//! // Daily tick
//! let sweep = engine.sweep_retention().await?;
//! println!("{} purged, {} left", sweep.deleted, sweep.remaining);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use jiff::{civil::Date, Timestamp};
use tokio::task;

pub mod builder;
pub mod generation;
pub mod plan_ops;
pub mod policy;
pub mod retention;
pub mod stats;
pub mod task_ops;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use policy::EnginePolicy;

use crate::{
    db::{utils::truncate_to_second, Database},
    error::{Result, UpkeepError},
    schedule::civil_today,
};

/// Main engine interface for plans, task instances and statistics.
#[derive(Debug, Clone)]
pub struct Engine {
    pub(crate) db_path: PathBuf,
    pub(crate) policy: EnginePolicy,
    pub(crate) pinned_now: Option<Timestamp>,
}

impl Engine {
    /// Creates a new engine over the given database path.
    pub(crate) fn new(db_path: PathBuf, policy: EnginePolicy, pinned_now: Option<Timestamp>) -> Self {
        Self {
            db_path,
            policy,
            pinned_now,
        }
    }

    /// Path of the database file this engine writes to.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Active policy.
    pub fn policy(&self) -> &EnginePolicy {
        &self.policy
    }

    /// Current instant, or the pinned one, truncated to the second.
    pub fn now(&self) -> Timestamp {
        truncate_to_second(self.pinned_now.unwrap_or_else(Timestamp::now))
    }

    /// UTC calendar date of [`Engine::now`].
    pub fn today(&self) -> Date {
        civil_today(self.now())
    }

    /// Runs `f` against a fresh connection on the blocking thread pool.
    pub(crate) async fn run_blocking<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(UpkeepError::join)?
    }
}
