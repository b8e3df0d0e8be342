//! Task instance operations: batch insert, lifecycle updates, cascade delete
//! and retention purge.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::utils::{date_at, opt_timestamp_at, parsed_at, sql_timestamp, timestamp_at, truncate_to_second};
use crate::{
    error::{DatabaseResultExt, Result, UpkeepError},
    models::{NewTaskInstance, TaskFilter, TaskInstance, TaskKind, TaskStatus},
    schedule::{civil_today, should_archive},
};

const TASK_COLUMNS: &str = "id, plan_id, asset_id, task_description, due_date, status, archived, archived_at, kind, created_at, updated_at";
const CHECK_OCCURRENCE_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM task_instances WHERE plan_id = ?1 AND due_date = ?2 AND task_description = ?3)";
const INSERT_TASK_SQL: &str = "INSERT INTO task_instances (plan_id, asset_id, task_description, due_date, status, archived, kind, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?7, ?7)";
const UPDATE_TASK_STATUS_SQL: &str =
    "UPDATE task_instances SET status = ?1, updated_at = ?2 WHERE id = ?3";
const ARCHIVE_TASK_SQL: &str = "UPDATE task_instances SET archived = 1, archived_at = ?1, updated_at = ?1 WHERE id = ?2 AND archived = 0";
pub(super) const DELETE_PLAN_INSTANCES_SQL: &str = "DELETE FROM task_instances WHERE plan_id = ?1";
const PURGE_ARCHIVED_SQL: &str = "DELETE FROM task_instances WHERE id IN (SELECT id FROM task_instances WHERE archived = 1 AND archived_at IS NOT NULL AND archived_at < ?1 ORDER BY archived_at, id LIMIT ?2)";
const COUNT_ARCHIVED_BEFORE_SQL: &str = "SELECT COUNT(*) FROM task_instances WHERE archived = 1 AND archived_at IS NOT NULL AND archived_at < ?1";
const COUNT_TASKS_SQL: &str = "SELECT COUNT(*) FROM task_instances";

/// Result of writing a generation batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Rows written
    pub inserted: usize,
    /// Occurrences already present and left alone
    pub duplicates: usize,
}

/// Result of a status change.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    /// Status before the change
    pub previous: TaskStatus,
    /// Instance after the change
    pub task: TaskInstance,
    /// Whether this change flipped the archived flag
    pub archived_now: bool,
}

impl super::Database {
    /// Helper function to construct a TaskInstance from a database row
    fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<TaskInstance> {
        Ok(TaskInstance {
            id: row.get::<_, i64>(0)? as u64,
            plan_id: row.get::<_, i64>(1)? as u64,
            asset_id: row.get(2)?,
            task_description: row.get(3)?,
            due_date: date_at(row, 4)?,
            status: parsed_at::<TaskStatus>(row, 5)?,
            archived: row.get(6)?,
            archived_at: opt_timestamp_at(row, 7)?,
            kind: parsed_at::<TaskKind>(row, 8)?,
            created_at: timestamp_at(row, 9)?,
            updated_at: timestamp_at(row, 10)?,
        })
    }

    /// Writes a generation batch in one transaction.
    ///
    /// An instance whose `(plan_id, due_date, task_description)` already
    /// exists is skipped, so re-running generation over the same horizon
    /// writes nothing new. Either the whole batch commits or nothing does.
    pub fn insert_task_batch(
        &mut self,
        batch: &[NewTaskInstance],
        now: Timestamp,
    ) -> Result<BatchOutcome> {
        let now_str = sql_timestamp(now);
        let mut outcome = BatchOutcome::default();

        let tx = self.write_transaction()?;

        {
            let mut exists_stmt = tx
                .prepare(CHECK_OCCURRENCE_EXISTS_SQL)
                .db_context("Failed to prepare occurrence check")?;
            let mut insert_stmt = tx
                .prepare(INSERT_TASK_SQL)
                .db_context("Failed to prepare task insert")?;

            for task in batch {
                let due = task.due_date.to_string();
                let exists: bool = exists_stmt
                    .query_row(
                        params![task.plan_id as i64, &due, &task.task_description],
                        |row| row.get(0),
                    )
                    .db_context("Failed to check existing occurrence")?;

                if exists {
                    outcome.duplicates += 1;
                    continue;
                }

                insert_stmt
                    .execute(params![
                        task.plan_id as i64,
                        &task.asset_id,
                        &task.task_description,
                        &due,
                        TaskStatus::Pending.as_str(),
                        TaskKind::Preventive.as_str(),
                        &now_str
                    ])
                    .db_context("Failed to insert task instance")?;
                outcome.inserted += 1;
            }
        }

        tx.commit().db_context("Failed to commit generation batch")?;

        Ok(outcome)
    }

    /// Retrieves a single task instance by its ID.
    pub fn get_task(&self, id: u64) -> Result<Option<TaskInstance>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM task_instances WHERE id = ?1");
        self.connection
            .query_row(&sql, params![id as i64], Self::build_task_from_row)
            .optional()
            .db_context("Failed to get task instance")
    }

    /// Lists task instances ordered by due date.
    pub fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<TaskInstance>> {
        let mut query = format!("SELECT {TASK_COLUMNS} FROM task_instances");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(plan_id) = filter.plan_id {
            conditions.push("plan_id = ?");
            params_vec.push(Box::new(plan_id as i64));
        }

        if let Some(status) = filter.status {
            conditions.push("status = ?");
            params_vec.push(Box::new(status.as_str()));
        }

        if let Some(from) = filter.due_from {
            conditions.push("due_date >= ?");
            params_vec.push(Box::new(from.to_string()));
        }

        if let Some(until) = filter.due_until {
            conditions.push("due_date <= ?");
            params_vec.push(Box::new(until.to_string()));
        }

        if !filter.include_archived {
            conditions.push("archived = 0");
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY due_date, id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let tasks = stmt
            .query_map(&params_refs[..], Self::build_task_from_row)
            .db_context("Failed to query task instances")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch task instances")?;

        Ok(tasks)
    }

    /// Changes a task instance's status and applies the archival rule.
    ///
    /// Returns `None` when the instance no longer exists, which happens when
    /// a cascade delete or retention purge wins a race with the status
    /// change. Moving a closed instance to another status is rejected.
    /// Re-applying the current status changes nothing.
    pub fn set_task_status(
        &mut self,
        id: u64,
        status: TaskStatus,
        now: Timestamp,
        archive_after_days: i64,
    ) -> Result<Option<StatusChange>> {
        let now = truncate_to_second(now);
        let now_str = sql_timestamp(now);
        let select_sql = format!("SELECT {TASK_COLUMNS} FROM task_instances WHERE id = ?1");

        let tx = self.write_transaction()?;

        let current = tx
            .query_row(&select_sql, params![id as i64], Self::build_task_from_row)
            .optional()
            .db_context("Failed to get task instance")?;

        let Some(current) = current else {
            return Ok(None);
        };

        if !current.status.can_transition_to(status) {
            return Err(UpkeepError::InvalidTransition {
                id,
                from: current.status,
                to: status,
            });
        }

        if current.status == status {
            return Ok(Some(StatusChange {
                previous: status,
                task: current,
                archived_now: false,
            }));
        }

        tx.execute(
            UPDATE_TASK_STATUS_SQL,
            params![status.as_str(), &now_str, id as i64],
        )
        .db_context("Failed to update task status")?;

        let archived_now = if should_archive(
            current.status,
            status,
            current.archived,
            current.due_date,
            civil_today(now),
            archive_after_days,
        ) {
            tx.execute(ARCHIVE_TASK_SQL, params![&now_str, id as i64])
                .db_context("Failed to archive task instance")?
                == 1
        } else {
            false
        };

        let task = tx
            .query_row(&select_sql, params![id as i64], Self::build_task_from_row)
            .db_context("Failed to reload task instance")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Some(StatusChange {
            previous: current.status,
            task,
            archived_now,
        }))
    }

    /// Deletes every task instance of a plan, archived or not. Returns the
    /// number of rows removed.
    pub fn delete_tasks_for_plan(&mut self, plan_id: u64) -> Result<usize> {
        let tx = self.write_transaction()?;

        let removed = tx
            .execute(DELETE_PLAN_INSTANCES_SQL, params![plan_id as i64])
            .db_context("Failed to delete plan task instances")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(removed)
    }

    /// Deletes up to `limit` instances archived before `cutoff`, oldest
    /// archive first.
    pub fn purge_archived(&mut self, cutoff: Timestamp, limit: usize) -> Result<usize> {
        let tx = self.write_transaction()?;

        let deleted = tx
            .execute(
                PURGE_ARCHIVED_SQL,
                params![sql_timestamp(cutoff), limit as i64],
            )
            .db_context("Failed to purge archived task instances")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(deleted)
    }

    /// Counts instances archived before `cutoff`.
    pub fn count_archived_before(&self, cutoff: Timestamp) -> Result<u64> {
        let count: i64 = self
            .connection
            .query_row(
                COUNT_ARCHIVED_BEFORE_SQL,
                params![sql_timestamp(cutoff)],
                |row| row.get(0),
            )
            .db_context("Failed to count archived task instances")?;
        Ok(count as u64)
    }

    /// Counts all task instances.
    pub fn count_tasks(&self) -> Result<u64> {
        let count: i64 = self
            .connection
            .query_row(COUNT_TASKS_SQL, [], |row| row.get(0))
            .db_context("Failed to count task instances")?;
        Ok(count as u64)
    }
}
