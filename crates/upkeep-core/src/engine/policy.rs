//! Tunable constants of the engine.

use serde::{Deserialize, Serialize};

use crate::error::{Result, UpkeepError};

const MAX_WINDOW_DAYS: i64 = 36_500;

/// Archival, retention and batching limits.
///
/// The defaults are the production values. Tests and back-dated
/// administrative runs may shrink them through
/// [`super::EngineBuilder::with_policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnginePolicy {
    /// Minimum age in days, measured from the due date, at which closing a
    /// task archives it
    pub archive_after_days: i64,

    /// Days an instance stays archived before the sweep may delete it
    pub retention_days: i64,

    /// Maximum deletions per retention sweep
    pub sweep_limit: usize,

    /// Days past today that generation writes instances for
    pub horizon_days: i64,

    /// Work orders read per page during a statistics rescan
    pub stats_page_size: usize,
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self {
            archive_after_days: 14,
            retention_days: 14,
            sweep_limit: 100,
            horizon_days: 365,
            stats_page_size: 500,
        }
    }
}

impl EnginePolicy {
    /// Rejects negative or century-long windows and zero-sized batches.
    pub fn validate(&self) -> Result<()> {
        for (field, days) in [
            ("archive_after_days", self.archive_after_days),
            ("retention_days", self.retention_days),
            ("horizon_days", self.horizon_days),
        ] {
            if days > MAX_WINDOW_DAYS {
                return Err(UpkeepError::invalid_input(field)
                    .with_reason(format!("Window of {days} days exceeds {MAX_WINDOW_DAYS}")));
            }
        }
        if self.archive_after_days < 0 {
            return Err(UpkeepError::invalid_input("archive_after_days")
                .with_reason("Archive age cannot be negative"));
        }
        if self.retention_days < 0 {
            return Err(UpkeepError::invalid_input("retention_days")
                .with_reason("Retention window cannot be negative"));
        }
        if self.horizon_days < 0 {
            return Err(UpkeepError::invalid_input("horizon_days")
                .with_reason("Generation horizon cannot be negative"));
        }
        if self.sweep_limit == 0 {
            return Err(UpkeepError::invalid_input("sweep_limit")
                .with_reason("Sweep limit must be at least 1"));
        }
        if self.stats_page_size == 0 {
            return Err(UpkeepError::invalid_input("stats_page_size")
                .with_reason("Page size must be at least 1"));
        }
        Ok(())
    }
}
