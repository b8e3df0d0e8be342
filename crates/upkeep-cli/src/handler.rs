//! Command handlers
//!
//! Each handler converts its clap arguments into core parameters, calls the
//! engine and renders the result through the core display wrappers.

use anyhow::{bail, Result};
use upkeep_core::{
    params::*, CreateResult, DeleteResult, Engine, OperationStatus, Plans, TaskInstances,
    UpdateResult,
};

use crate::{
    cli::{
        CascadeArgs, ChecklistArgs, GenerateArgs, PlanCommands, StatsCommands, TaskCommands,
        UserCommands, WorkOrderCommands,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    engine: Engine,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(engine: Engine, renderer: TerminalRenderer) -> Self {
        Self { engine, renderer }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let generate = args.generate;
                let plan = self.engine.create_plan(&args.into()).await?;
                let plan_id = plan.id;
                self.renderer.render(&CreateResult::new(plan).to_string())?;
                if generate {
                    self.generate(&GenerateTasks {
                        plan_id: Some(plan_id),
                    })
                    .await?;
                }
                Ok(())
            }
            PlanCommands::List(args) => self.list_plans(&args.into()).await,
            PlanCommands::Show(args) => {
                let id = Id::from(args);
                let Some(plan) = self.engine.get_plan(&id).await? else {
                    bail!("Plan with ID {} not found", id.id);
                };
                self.renderer.render(&plan.to_string())
            }
            PlanCommands::Activate(args) => self.set_plan_active(args.into(), true).await,
            PlanCommands::Deactivate(args) => self.set_plan_active(args.into(), false).await,
            PlanCommands::Delete(args) => {
                let params = DeletePlan::from(args);
                match self.engine.delete_plan(&params).await? {
                    Some(deletion) => self.renderer.render(&DeleteResult::new(deletion).to_string()),
                    None => bail!("Plan with ID {} not found", params.id),
                }
            }
        }
    }

    pub async fn list_plans(&self, params: &ListPlans) -> Result<()> {
        let plans = self.engine.list_plans(params).await?;
        self.renderer.render(&Plans(plans).to_string())
    }

    async fn set_plan_active(&self, id: Id, active: bool) -> Result<()> {
        let Some(plan) = self.engine.set_plan_active(&id, active).await? else {
            bail!("Plan with ID {} not found", id.id);
        };
        let change = if active { "Activated" } else { "Deactivated" };
        self.renderer
            .render(&UpdateResult::with_changes(plan, vec![change.to_string()]).to_string())
    }

    pub async fn handle_generate(&self, args: GenerateArgs) -> Result<()> {
        let params = GenerateTasks::from(args);
        if params.plan_id.is_some() {
            log::warn!(
                "Manual generation is not serialized with the scheduled run; \
                 avoid starting both at once"
            );
        }
        self.generate(&params).await
    }

    async fn generate(&self, params: &GenerateTasks) -> Result<()> {
        let report = self.engine.generate_tasks(params).await?;
        self.renderer.render(&report.to_string())
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::List(args) => {
                let tasks = self.engine.list_tasks(&args.into()).await?;
                self.renderer.render(&TaskInstances(tasks).to_string())
            }
            TaskCommands::Show(args) => {
                let id = Id::from(args);
                let Some(task) = self.engine.get_task(&id).await? else {
                    bail!("Task instance with ID {} not found", id.id);
                };
                self.renderer.render(&task.to_string())
            }
            TaskCommands::Status(args) => {
                let params = SetTaskStatus::from(args);
                let Some(change) = self.engine.set_task_status(&params).await? else {
                    let status = OperationStatus::failure(format!(
                        "Task instance with ID {} no longer exists",
                        params.id
                    ));
                    return self.renderer.render(&status.to_string());
                };

                let mut changes = Vec::new();
                if change.previous != change.task.status {
                    changes.push(format!("Status: {} → {}", change.previous, change.task.status));
                }
                if change.archived_now {
                    changes.push("Archived".to_string());
                }
                self.renderer
                    .render(&UpdateResult::with_changes(change.task, changes).to_string())
            }
        }
    }

    pub async fn handle_checklist(&self, args: ChecklistArgs) -> Result<()> {
        let checklist = self.engine.checklist(&args.into()).await?;
        self.renderer.render(&checklist.to_string())
    }

    pub async fn handle_sweep(&self) -> Result<()> {
        let report = self.engine.sweep_retention().await?;
        self.renderer.render(&report.to_string())
    }

    pub async fn handle_cascade(&self, args: CascadeArgs) -> Result<()> {
        let id = Id::from(args);
        let removed = self.engine.cascade_delete(&id).await?;
        let status = OperationStatus::success(format!(
            "Removed {removed} task instances of plan {}",
            id.id
        ));
        self.renderer.render(&status.to_string())
    }

    pub async fn handle_work_order_command(&self, command: WorkOrderCommands) -> Result<()> {
        match command {
            WorkOrderCommands::Record(args) => {
                let order = self.engine.record_work_order(&args.into()).await?;
                self.renderer.render(&CreateResult::new(order).to_string())
            }
        }
    }

    pub async fn handle_stats_command(&self, command: StatsCommands) -> Result<()> {
        match command {
            StatsCommands::Show => match self.engine.stats().await? {
                Some(snapshot) => self.renderer.render(&snapshot.to_string()),
                None => self.renderer.render("No statistics recorded yet.\n"),
            },
            StatsCommands::Recompute => {
                let snapshot = self.engine.recompute_stats().await?;
                self.renderer.render(&snapshot.to_string())
            }
        }
    }

    pub async fn handle_user_command(&self, command: UserCommands) -> Result<()> {
        match command {
            UserCommands::Add(args) => {
                let params = AddUser::from(args);
                let id = self.engine.add_user(&params).await?;
                let status =
                    OperationStatus::success(format!("Added user '{}' with ID: {id}", params.name.trim()));
                self.renderer.render(&status.to_string())
            }
        }
    }
}
