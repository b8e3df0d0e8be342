//! Generation runs: expansion of plans into task instances.

use super::Engine;
use crate::{
    error::{Result, UpkeepError},
    models::{GenerationReport, SkippedPlan},
    params::GenerateTasks,
    schedule::{expand_plan, Horizon, PlanExpansion},
};

impl Engine {
    /// Expands active plans into pending task instances up to the horizon.
    ///
    /// With `plan_id` set only that plan is expanded (and reported as
    /// skipped if it is inactive); otherwise every active plan is. Plans
    /// missing a start date, a frequency or task descriptions are skipped
    /// and listed in the report.
    ///
    /// All instances of the run are written in one transaction: if the
    /// write fails nothing is stored and the error is returned to the
    /// trigger. Occurrences that already exist are not written again, so a
    /// retried or repeated run only fills gaps. Two runs started at the
    /// same time are not serialized; the scheduler should not overlap them.
    ///
    /// # Errors
    ///
    /// Returns `UpkeepError::PlanNotFound` if `plan_id` names no plan
    pub async fn generate_tasks(&self, params: &GenerateTasks) -> Result<GenerationReport> {
        let now = self.now();
        let horizon = Horizon::new(self.today(), self.policy.horizon_days)?;
        let plan_id = params.plan_id;

        self.run_blocking(move |db| {
            let plans = match plan_id {
                Some(id) => vec![db.get_plan(id)?.ok_or(UpkeepError::PlanNotFound { id })?],
                None => db.list_plans(true)?,
            };

            let mut report = GenerationReport {
                plans_scanned: plans.len(),
                ..Default::default()
            };
            let mut batch = Vec::new();

            for plan in &plans {
                match expand_plan(plan, &horizon) {
                    PlanExpansion::Ready(instances) => batch.extend(instances),
                    PlanExpansion::Skipped(reason) => {
                        log::info!("Skipping plan {}: {}", plan.id, reason.as_str());
                        report.skipped.push(SkippedPlan {
                            plan_id: plan.id,
                            reason,
                        });
                    }
                }
            }

            log::debug!(
                "Writing {} task instances from {} plans (through {})",
                batch.len(),
                plans.len() - report.skipped.len(),
                horizon.until
            );

            let outcome = db.insert_task_batch(&batch, now)?;
            report.created = outcome.inserted;
            report.duplicates = outcome.duplicates;

            if outcome.duplicates > 0 {
                log::info!(
                    "Left {} existing task instances untouched",
                    outcome.duplicates
                );
            }
            Ok(report)
        })
        .await
    }
}
