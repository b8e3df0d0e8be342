//! Plan operations for the Engine.

use super::Engine;
use crate::{
    error::{Result, UpkeepError},
    models::{MaintenancePlan, PlanDeletion},
    params::{CreatePlan, DeletePlan, Id, ListPlans},
};

impl Engine {
    /// Creates an active plan.
    ///
    /// Frequency and start date are optional; a plan missing either is
    /// stored but skipped by generation until both are set.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<MaintenancePlan> {
        let (frequency, start_date) = params.validate()?;
        let asset_id = params.asset_id.trim().to_string();
        let tasks: Vec<String> = params.tasks.iter().map(|t| t.trim().to_string()).collect();
        let now = self.now();

        self.run_blocking(move |db| db.create_plan(&asset_id, frequency, start_date, &tasks, now))
            .await
    }

    /// Retrieves a plan by its ID.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<MaintenancePlan>> {
        let plan_id = params.id;
        self.run_blocking(move |db| db.get_plan(plan_id)).await
    }

    /// Lists active plans, or all plans when `include_inactive` is set.
    pub async fn list_plans(&self, params: &ListPlans) -> Result<Vec<MaintenancePlan>> {
        let active_only = !params.include_inactive;
        self.run_blocking(move |db| db.list_plans(active_only)).await
    }

    /// Activates or deactivates a plan. Returns `None` if the plan doesn't
    /// exist.
    pub async fn set_plan_active(&self, params: &Id, active: bool) -> Result<Option<MaintenancePlan>> {
        let plan_id = params.id;
        let now = self.now();
        self.run_blocking(move |db| db.set_plan_active(plan_id, active, now))
            .await
    }

    /// Permanently deletes a plan and every task instance generated from it.
    ///
    /// Requires explicit confirmation via the `confirmed` field. Uses the
    /// get-before-delete pattern so the caller can show what was removed;
    /// returns `None` if the plan doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `UpkeepError::InvalidInput` if `confirmed` is false
    pub async fn delete_plan(&self, params: &DeletePlan) -> Result<Option<PlanDeletion>> {
        if !params.confirmed {
            return Err(UpkeepError::invalid_input("confirmed").with_reason(
                "Plan deletion requires explicit confirmation. Set 'confirmed' to true to proceed with permanent deletion.",
            ));
        }

        let plan_id = params.id;
        let deletion = self
            .run_blocking(move |db| {
                let Some(plan) = db.get_plan(plan_id)? else {
                    return Ok(None);
                };
                match db.delete_plan(plan_id) {
                    Ok(removed_tasks) => Ok(Some(PlanDeletion {
                        plan,
                        removed_tasks,
                    })),
                    // Lost a race with another delete
                    Err(UpkeepError::PlanNotFound { .. }) => Ok(None),
                    Err(e) => Err(e),
                }
            })
            .await?;

        if let Some(deletion) = &deletion {
            log::info!(
                "Deleted plan {} with {} task instances",
                plan_id,
                deletion.removed_tasks
            );
        }
        Ok(deletion)
    }

    /// Removes the task instances of a plan that no longer exists.
    ///
    /// Covers plans deleted by another writer, whose instances would
    /// otherwise dangle. Archived and live instances alike are removed.
    /// Finding nothing to remove is a normal outcome. Returns the number of
    /// instances deleted.
    ///
    /// # Errors
    ///
    /// Returns `UpkeepError::InvalidInput` if the plan still exists; use
    /// [`Engine::delete_plan`] for that.
    pub async fn cascade_delete(&self, params: &Id) -> Result<usize> {
        let plan_id = params.id;

        let removed = self
            .run_blocking(move |db| {
                if db.get_plan(plan_id)?.is_some() {
                    return Err(UpkeepError::invalid_input("plan_id").with_reason(format!(
                        "Plan {plan_id} still exists; delete the plan instead"
                    )));
                }
                db.delete_tasks_for_plan(plan_id)
            })
            .await?;

        if removed == 0 {
            log::info!("No task instances reference plan {plan_id}; nothing to cascade");
        } else {
            log::info!("Cascade removed {removed} task instances of plan {plan_id}");
        }
        Ok(removed)
    }
}
