//! Task instance operations for the Engine.

use super::Engine;
use crate::{
    db::StatusChange,
    error::{Result, UpkeepError},
    models::{TaskFilter, TaskInstance},
    params::{Id, ListTasks, SetTaskStatus, ShowChecklist},
    schedule::{build_checklist, Checklist},
};

impl Engine {
    /// Retrieves a task instance by its ID.
    pub async fn get_task(&self, params: &Id) -> Result<Option<TaskInstance>> {
        let task_id = params.id;
        self.run_blocking(move |db| db.get_task(task_id)).await
    }

    /// Lists task instances ordered by due date.
    pub async fn list_tasks(&self, params: &ListTasks) -> Result<Vec<TaskInstance>> {
        let filter = TaskFilter::try_from(params)?;
        self.run_blocking(move |db| db.list_tasks(&filter)).await
    }

    /// Changes a task instance's status.
    ///
    /// Closing a pending task whose due date is at least
    /// `archive_after_days` old archives it and stamps the archive time.
    /// A task that was deleted in the meantime yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `UpkeepError::InvalidInput` for an unknown status
    /// Returns `UpkeepError::InvalidTransition` when reopening or switching
    /// a closed task
    pub async fn set_task_status(&self, params: &SetTaskStatus) -> Result<Option<StatusChange>> {
        let status = params.validate()?;
        let task_id = params.id;
        let now = self.now();
        let archive_after_days = self.policy.archive_after_days;

        let change = self
            .run_blocking(move |db| db.set_task_status(task_id, status, now, archive_after_days))
            .await?;

        match &change {
            None => log::info!("Task instance {task_id} no longer exists; status change ignored"),
            Some(change) if change.archived_now => {
                log::info!("Archived task instance {task_id} on {}", status.as_str())
            }
            Some(_) => {}
        }
        Ok(change)
    }

    /// Arranges a plan's task instances into checklist columns.
    ///
    /// Archived instances are included. The year defaults to the current
    /// one.
    ///
    /// # Errors
    ///
    /// Returns `UpkeepError::PlanNotFound` if the plan doesn't exist
    /// Returns `UpkeepError::InvalidInput` if the plan has no frequency
    pub async fn checklist(&self, params: &ShowChecklist) -> Result<Checklist> {
        let plan_id = params.plan_id;
        let year = params.year.unwrap_or_else(|| self.today().year());

        self.run_blocking(move |db| {
            let plan = db
                .get_plan(plan_id)?
                .ok_or(UpkeepError::PlanNotFound { id: plan_id })?;
            let tasks = db.list_tasks(&TaskFilter::for_plan(plan_id))?;

            build_checklist(&plan, &tasks, year).ok_or_else(|| {
                UpkeepError::invalid_input("plan_id")
                    .with_reason(format!("Plan {plan_id} has no frequency to lay out"))
            })
        })
        .await
    }
}
