//! Retention sweep over archived task instances.

use jiff::SignedDuration;

use super::Engine;
use crate::{
    error::{Result, UpkeepError},
    models::SweepReport,
};

impl Engine {
    /// Deletes instances archived more than `retention_days` ago.
    ///
    /// At most `sweep_limit` instances are removed per call, oldest archive
    /// first. Whatever is left over is reported in
    /// [`SweepReport::remaining`] and picked up by the next run.
    pub async fn sweep_retention(&self) -> Result<SweepReport> {
        let retention = SignedDuration::from_hours(self.policy.retention_days * 24);
        let cutoff = self.now().checked_sub(retention).map_err(|e| {
            UpkeepError::invalid_input("retention_days").with_reason(e.to_string())
        })?;
        let limit = self.policy.sweep_limit;

        let report = self
            .run_blocking(move |db| {
                let deleted = db.purge_archived(cutoff, limit)?;
                let remaining = db.count_archived_before(cutoff)?;
                Ok(SweepReport { deleted, remaining })
            })
            .await?;

        log::info!(
            "Retention sweep deleted {} archived task instances ({} remaining)",
            report.deleted,
            report.remaining
        );
        Ok(report)
    }
}
