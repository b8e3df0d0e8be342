//! Command argument definitions using clap
//!
//! Each command has a clap-derived wrapper that converts into the matching
//! core parameter type with `From`, so clap attributes never leak into
//! `upkeep-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Engine
//! ```
//!
//! Textual values are validated by the core parameter types; the value
//! enums below only give the shell completions and help text.

use clap::{Args, Subcommand, ValueEnum};
use upkeep_core::{models::Frequency, params::*, TaskStatus};

/// Create a maintenance plan
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Asset the plan maintains
    pub asset_id: String,
    /// Recurrence interval
    #[arg(short, long)]
    pub frequency: Option<FrequencyArg>,
    /// First occurrence, YYYY-MM-DD
    #[arg(short, long = "start")]
    pub start_date: Option<String>,
    /// Task description; repeat for several tasks
    #[arg(short, long = "task")]
    pub tasks: Vec<String>,
    /// Generate task instances for the new plan right away
    #[arg(long)]
    pub generate: bool,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            asset_id: val.asset_id,
            frequency: val.frequency.map(|f| Frequency::from(f).as_str().to_string()),
            start_date: val.start_date,
            tasks: val.tasks,
        }
    }
}

/// List plans
#[derive(Args)]
pub struct ListPlansArgs {
    /// Include deactivated plans
    #[arg(short, long)]
    pub all: bool,
}

impl From<ListPlansArgs> for ListPlans {
    fn from(val: ListPlansArgs) -> Self {
        ListPlans {
            include_inactive: val.all,
        }
    }
}

/// Identify a plan by ID
#[derive(Args)]
pub struct PlanIdArgs {
    /// ID of the plan
    pub id: u64,
}

impl From<PlanIdArgs> for Id {
    fn from(val: PlanIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete a plan permanently, with all its task instances
#[derive(Args)]
pub struct DeletePlanArgs {
    /// ID of the plan to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a maintenance plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show a plan and its tasks
    #[command(alias = "s")]
    Show(PlanIdArgs),
    /// Resume generation for a plan
    Activate(PlanIdArgs),
    /// Stop generating new instances for a plan
    Deactivate(PlanIdArgs),
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
}

/// Expand plans into task instances
///
/// Without `--plan-id` every active plan is expanded; this is the weekly
/// scheduled run. Existing occurrences are never written twice, but
/// overlapping runs are not serialized.
#[derive(Args)]
pub struct GenerateArgs {
    /// Only expand this plan
    #[arg(long)]
    pub plan_id: Option<u64>,
}

impl From<GenerateArgs> for GenerateTasks {
    fn from(val: GenerateArgs) -> Self {
        GenerateTasks {
            plan_id: val.plan_id,
        }
    }
}

/// List task instances
#[derive(Args)]
pub struct ListTasksArgs {
    /// Only instances of this plan
    #[arg(long)]
    pub plan_id: Option<u64>,
    /// Only instances in this status
    #[arg(long)]
    pub status: Option<TaskStatusArg>,
    /// Only instances due on or after this date, YYYY-MM-DD
    #[arg(long)]
    pub due_from: Option<String>,
    /// Only instances due on or before this date, YYYY-MM-DD
    #[arg(long)]
    pub due_until: Option<String>,
    /// Include archived instances
    #[arg(long)]
    pub archived: bool,
}

impl From<ListTasksArgs> for ListTasks {
    fn from(val: ListTasksArgs) -> Self {
        ListTasks {
            plan_id: val.plan_id,
            status: val.status.map(|s| TaskStatus::from(s).as_str().to_string()),
            due_from: val.due_from,
            due_until: val.due_until,
            include_archived: val.archived,
        }
    }
}

/// Show a task instance
#[derive(Args)]
pub struct ShowTaskArgs {
    /// ID of the task instance
    pub id: u64,
}

impl From<ShowTaskArgs> for Id {
    fn from(val: ShowTaskArgs) -> Self {
        Id { id: val.id }
    }
}

/// Change a task instance's status
///
/// Pending tasks can be completed or skipped once. Closing a task whose due
/// date is two weeks old or more archives it.
#[derive(Args)]
pub struct SetStatusArgs {
    /// ID of the task instance
    pub id: u64,
    /// New status
    pub status: TaskStatusArg,
}

impl From<SetStatusArgs> for SetTaskStatus {
    fn from(val: SetStatusArgs) -> Self {
        SetTaskStatus {
            id: val.id,
            status: val.status.to_string(),
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List task instances by due date
    #[command(aliases = ["l", "ls"])]
    List(ListTasksArgs),
    /// Show a task instance
    #[command(alias = "s")]
    Show(ShowTaskArgs),
    /// Change a task instance's status
    Status(SetStatusArgs),
}

/// Show a plan's checklist grid
#[derive(Args)]
pub struct ChecklistArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Checklist year; defaults to the current year
    #[arg(long)]
    pub year: Option<i16>,
}

impl From<ChecklistArgs> for ShowChecklist {
    fn from(val: ChecklistArgs) -> Self {
        ShowChecklist {
            plan_id: val.plan_id,
            year: val.year,
        }
    }
}

/// Remove task instances left behind by a deleted plan
#[derive(Args)]
pub struct CascadeArgs {
    /// ID of the deleted plan
    pub plan_id: u64,
}

impl From<CascadeArgs> for Id {
    fn from(val: CascadeArgs) -> Self {
        Id { id: val.plan_id }
    }
}

/// Create or update a work order
#[derive(Args)]
pub struct RecordWorkOrderArgs {
    /// Existing work order to update
    #[arg(long)]
    pub id: Option<u64>,
    /// Short title
    #[arg(long)]
    pub title: Option<String>,
    /// Status, e.g. Pending, Scheduled, In Progress, Completed
    #[arg(short, long)]
    pub status: String,
    /// Due date, YYYY-MM-DD or RFC 3339
    #[arg(short, long = "due")]
    pub due_date: Option<String>,
}

impl From<RecordWorkOrderArgs> for RecordWorkOrder {
    fn from(val: RecordWorkOrderArgs) -> Self {
        RecordWorkOrder {
            id: val.id,
            title: val.title,
            status: val.status,
            due_date: val.due_date,
        }
    }
}

#[derive(Subcommand)]
pub enum WorkOrderCommands {
    /// Create or update a work order and refresh statistics
    Record(RecordWorkOrderArgs),
}

#[derive(Subcommand)]
pub enum StatsCommands {
    /// Show the stored snapshot
    Show,
    /// Rescan work orders and rewrite the snapshot
    Recompute,
}

/// Register a user
#[derive(Args)]
pub struct AddUserArgs {
    /// Display name
    pub name: String,
}

impl From<AddUserArgs> for AddUser {
    fn from(val: AddUserArgs) -> Self {
        AddUser { name: val.name }
    }
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a user
    Add(AddUserArgs),
}

/// Command-line representation of plan frequencies
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum FrequencyArg {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    SemiAnnually,
    Annually,
}

impl From<FrequencyArg> for Frequency {
    fn from(val: FrequencyArg) -> Self {
        match val {
            FrequencyArg::Daily => Frequency::Daily,
            FrequencyArg::Weekly => Frequency::Weekly,
            FrequencyArg::Monthly => Frequency::Monthly,
            FrequencyArg::Quarterly => Frequency::Quarterly,
            FrequencyArg::SemiAnnually => Frequency::SemiAnnually,
            FrequencyArg::Annually => Frequency::Annually,
        }
    }
}

/// Command-line representation of task statuses
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskStatusArg {
    /// Not yet carried out
    Pending,
    /// Work was carried out
    Completed,
    /// Deliberately not carried out
    Skipped,
}

impl From<TaskStatusArg> for TaskStatus {
    fn from(val: TaskStatusArg) -> Self {
        match val {
            TaskStatusArg::Pending => TaskStatus::Pending,
            TaskStatusArg::Completed => TaskStatus::Completed,
            TaskStatusArg::Skipped => TaskStatus::Skipped,
        }
    }
}

impl std::fmt::Display for TaskStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", TaskStatus::from(*self))
    }
}
