//! Display implementations for domain models, reports and checklists.
//!
//! All output is markdown. Enums print their canonical text form so error
//! messages and tables agree.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    models::{
        AggregateSnapshot, Frequency, GenerationReport, MaintenancePlan, SkipReason, SweepReport,
        TaskInstance, TaskKind, TaskStatus, WorkOrder,
    },
    schedule::Checklist,
};

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for MaintenancePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.asset_id)?;
        writeln!(f)?;

        let state = if self.is_active { "active" } else { "inactive" };
        writeln!(f, "- Status: {state}")?;
        match self.frequency {
            Some(frequency) => writeln!(f, "- Frequency: {}", frequency.label())?,
            None => writeln!(f, "- Frequency: *not set*")?,
        }
        match self.start_date {
            Some(start) => writeln!(f, "- Starts: {start}")?,
            None => writeln!(f, "- Starts: *not set*")?,
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if self.tasks.is_empty() {
            writeln!(f, "\nNo tasks in this plan.")?;
        } else {
            writeln!(f, "\n## Tasks")?;
            writeln!(f)?;
            for (position, task) in self.tasks.iter().enumerate() {
                writeln!(f, "{}. {task}", position + 1)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for TaskInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.id,
            self.task_description,
            self.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "- Asset: {}", self.asset_id)?;
        writeln!(f, "- Plan: {}", self.plan_id)?;
        writeln!(f, "- Due: {}", self.due_date)?;
        writeln!(f, "- Kind: {}", self.kind)?;
        if self.archived {
            match &self.archived_at {
                Some(at) => writeln!(f, "- Archived: {}", LocalDateTime(at))?,
                None => writeln!(f, "- Archived: yes")?,
            }
        }
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)
    }
}

impl fmt::Display for WorkOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => writeln!(f, "### Work order {}: {title}", self.id)?,
            None => writeln!(f, "### Work order {}", self.id)?,
        }
        writeln!(f)?;
        writeln!(f, "- Status: {}", self.status)?;
        if let Some(due) = &self.due_date {
            writeln!(f, "- Due: {due}")?;
        }
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))
    }
}

impl fmt::Display for AggregateSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Dashboard")?;
        writeln!(f)?;
        writeln!(f, "| Metric | Value |")?;
        writeln!(f, "|:-|-:|")?;
        writeln!(f, "| Work orders | {} |", self.total_work_orders)?;
        writeln!(f, "| Open | {} |", self.open_work_orders)?;
        writeln!(f, "| Completed | {} |", self.completed_work_orders)?;
        writeln!(f, "| In progress | {} |", self.in_progress_work_orders)?;
        writeln!(f, "| Scheduled | {} |", self.scheduled_work_orders)?;
        writeln!(f, "| Pending | {} |", self.pending_work_orders)?;
        writeln!(f, "| Overdue | {} |", self.overdue_work_orders)?;
        writeln!(f, "| Completion rate | {}% |", self.completion_rate)?;
        writeln!(f, "| Overdue rate | {}% |", self.overdue_rate)?;
        writeln!(f, "| Users | {} |", self.total_users)?;
        writeln!(f, "| Task instances | {} |", self.total_task_instances)?;
        writeln!(f)?;
        writeln!(f, "*Last updated {}*", LocalDateTime(&self.last_updated))
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Generated {} task instances from {} plans.",
            self.created, self.plans_scanned
        )?;
        if self.duplicates > 0 {
            writeln!(f, "{} already existed and were left alone.", self.duplicates)?;
        }
        if !self.skipped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped plans:")?;
            for skipped in &self.skipped {
                writeln!(f, "- Plan {}: {}", skipped.plan_id, skipped.reason)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Purged {} archived task instances.", self.deleted)?;
        if self.remaining > 0 {
            writeln!(f, "{} remain for the next sweep.", self.remaining)?;
        }
        Ok(())
    }
}

impl fmt::Display for Checklist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "# {} checklist {} ({})",
            self.asset_id,
            self.year,
            self.frequency.label()
        )?;
        writeln!(f)?;

        if self.rows.is_empty() {
            return writeln!(f, "No task instances for this plan.");
        }

        write!(f, "| Task |")?;
        for column in &self.columns {
            write!(f, " {column} |")?;
        }
        writeln!(f)?;
        write!(f, "|:-|")?;
        for _ in &self.columns {
            write!(f, ":-:|")?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(f, "| {} |", row.task_description)?;
            for cell in &row.cells {
                let entries: Vec<String> = cell
                    .iter()
                    .map(|e| format!("{} {}", e.status.icon(), e.due_date.strftime("%m-%d")))
                    .collect();
                write!(f, " {} |", entries.join(" "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;
    use crate::{
        models::SkippedPlan,
        schedule::build_checklist,
    };

    fn plan() -> MaintenancePlan {
        MaintenancePlan {
            id: 4,
            asset_id: "AHU-1".to_string(),
            frequency: Some(Frequency::Quarterly),
            start_date: Some(date(2024, 1, 15)),
            tasks: vec!["Replace filters".to_string(), "Inspect belts".to_string()],
            is_active: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn task(id: u64, description: &str, due: jiff::civil::Date, status: TaskStatus) -> TaskInstance {
        TaskInstance {
            id,
            plan_id: 4,
            asset_id: "AHU-1".to_string(),
            task_description: description.to_string(),
            due_date: due,
            status,
            archived: false,
            archived_at: None,
            kind: TaskKind::Preventive,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_plan_display_lists_tasks_in_order() {
        let output = plan().to_string();
        assert!(output.starts_with("# 4. AHU-1"));
        assert!(output.contains("- Frequency: Quarterly"));
        assert!(output.contains("1. Replace filters\n2. Inspect belts"));
    }

    #[test]
    fn test_plan_display_marks_missing_fields() {
        let mut inert = plan();
        inert.frequency = None;
        inert.start_date = None;
        inert.tasks.clear();
        let output = inert.to_string();
        assert!(output.contains("- Frequency: *not set*"));
        assert!(output.contains("- Starts: *not set*"));
        assert!(output.contains("No tasks in this plan."));
    }

    #[test]
    fn test_task_display() {
        let output = task(9, "Replace filters", date(2024, 4, 15), TaskStatus::Completed).to_string();
        assert!(output.contains("### 9. Replace filters (✓ Completed)"));
        assert!(output.contains("- Due: 2024-04-15"));
        assert!(!output.contains("Archived"));
    }

    #[test]
    fn test_generation_report_lists_skipped_plans() {
        let report = GenerationReport {
            plans_scanned: 3,
            skipped: vec![SkippedPlan {
                plan_id: 2,
                reason: SkipReason::MissingStartDate,
            }],
            created: 8,
            duplicates: 0,
        };
        let output = report.to_string();
        assert!(output.contains("Generated 8 task instances from 3 plans."));
        assert!(output.contains("- Plan 2: plan has no start date"));
        assert!(!output.contains("already existed"));
    }

    #[test]
    fn test_sweep_report_mentions_backlog() {
        let partial = SweepReport {
            deleted: 100,
            remaining: 50,
        };
        assert!(partial.to_string().contains("50 remain"));

        let done = SweepReport {
            deleted: 50,
            remaining: 0,
        };
        assert_eq!(done.to_string(), "Purged 50 archived task instances.\n");
    }

    #[test]
    fn test_checklist_table() {
        let tasks = vec![
            task(1, "Replace filters", date(2024, 1, 15), TaskStatus::Completed),
            task(2, "Replace filters", date(2024, 4, 15), TaskStatus::Pending),
            task(3, "Inspect belts", date(2024, 1, 15), TaskStatus::Skipped),
        ];
        let checklist = build_checklist(&plan(), &tasks, 2024).unwrap();
        let output = checklist.to_string();

        assert!(output.contains("| Task | Q1 | Q2 | Q3 | Q4 |"));
        assert!(output.contains("| Replace filters | ✓ 01-15 | ○ 04-15 |  |  |"));
        assert!(output.contains("| Inspect belts | ⤼ 01-15 |  |  |  |"));
    }

    #[test]
    fn test_snapshot_display() {
        let snapshot = AggregateSnapshot {
            total_work_orders: 4,
            open_work_orders: 3,
            completed_work_orders: 1,
            in_progress_work_orders: 1,
            scheduled_work_orders: 1,
            pending_work_orders: 1,
            overdue_work_orders: 1,
            total_users: 2,
            total_task_instances: 10,
            completion_rate: 25,
            overdue_rate: 33,
            last_updated: Timestamp::UNIX_EPOCH,
        };
        let output = snapshot.to_string();
        assert!(output.contains("| Completion rate | 25% |"));
        assert!(output.contains("| Overdue rate | 33% |"));
    }
}
