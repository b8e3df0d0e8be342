//! Outcome reports for the batch jobs.

use serde::{Deserialize, Serialize};

/// Why generation left a plan alone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    Inactive,
    MissingStartDate,
    MissingFrequency,
    NoTasks,
    /// Date arithmetic stopped advancing (calendar overflow)
    RecurrenceStalled,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Inactive => "plan is inactive",
            SkipReason::MissingStartDate => "plan has no start date",
            SkipReason::MissingFrequency => "plan has no frequency",
            SkipReason::NoTasks => "plan has no task descriptions",
            SkipReason::RecurrenceStalled => "recurrence stopped advancing",
        }
    }
}

/// A plan generation skipped, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedPlan {
    pub plan_id: u64,
    pub reason: SkipReason,
}

/// Result of one generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationReport {
    /// Plans examined
    pub plans_scanned: usize,

    /// Plans left inert
    pub skipped: Vec<SkippedPlan>,

    /// Instances written
    pub created: usize,

    /// Occurrences that already existed and were not written again
    pub duplicates: usize,
}

/// Result of one retention sweep.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SweepReport {
    /// Archived instances deleted by this run
    pub deleted: usize,

    /// Eligible instances left for later runs
    pub remaining: u64,
}

/// A deleted plan and the task instances removed with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDeletion {
    pub plan: super::MaintenancePlan,
    pub removed_tasks: usize,
}
