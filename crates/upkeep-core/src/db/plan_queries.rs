//! Maintenance plan CRUD operations and queries.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, Connection, OptionalExtension};

use super::task_queries::DELETE_PLAN_INSTANCES_SQL;
use super::utils::{opt_date_at, opt_parsed_at, sql_timestamp, timestamp_at, truncate_to_second};
use crate::{
    error::{DatabaseResultExt, Result, UpkeepError},
    models::{Frequency, MaintenancePlan},
};

const PLAN_COLUMNS: &str = "id, asset_id, frequency, start_date, is_active, created_at, updated_at";
const INSERT_PLAN_SQL: &str = "INSERT INTO maintenance_plans (asset_id, frequency, start_date, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, 1, ?4, ?5)";
const INSERT_PLAN_TASK_SQL: &str =
    "INSERT INTO plan_tasks (plan_id, position, description) VALUES (?1, ?2, ?3)";
const SELECT_PLAN_TASKS_SQL: &str =
    "SELECT description FROM plan_tasks WHERE plan_id = ?1 ORDER BY position";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM maintenance_plans WHERE id = ?1)";
const UPDATE_PLAN_ACTIVE_SQL: &str =
    "UPDATE maintenance_plans SET is_active = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_PLAN_TASKS_SQL: &str = "DELETE FROM plan_tasks WHERE plan_id = ?1";
const DELETE_PLAN_SQL: &str = "DELETE FROM maintenance_plans WHERE id = ?1";

impl super::Database {
    /// Builds a plan from a row selected with `PLAN_COLUMNS`. Tasks are
    /// loaded separately.
    fn build_plan_from_row(row: &rusqlite::Row) -> rusqlite::Result<MaintenancePlan> {
        Ok(MaintenancePlan {
            id: row.get::<_, i64>(0)? as u64,
            asset_id: row.get(1)?,
            frequency: opt_parsed_at::<Frequency>(row, 2)?,
            start_date: opt_date_at(row, 3)?,
            tasks: Vec::new(),
            is_active: row.get(4)?,
            created_at: timestamp_at(row, 5)?,
            updated_at: timestamp_at(row, 6)?,
        })
    }

    fn load_plan_tasks(connection: &Connection, plan_id: u64) -> Result<Vec<String>> {
        let mut stmt = connection
            .prepare(SELECT_PLAN_TASKS_SQL)
            .db_context("Failed to prepare plan task query")?;
        let tasks = stmt
            .query_map(params![plan_id as i64], |row| row.get(0))
            .db_context("Failed to query plan tasks")?
            .collect::<std::result::Result<Vec<String>, _>>()
            .db_context("Failed to fetch plan tasks")?;
        Ok(tasks)
    }

    /// Creates an active plan with its ordered task descriptions.
    pub fn create_plan(
        &mut self,
        asset_id: &str,
        frequency: Option<Frequency>,
        start_date: Option<Date>,
        tasks: &[String],
        now: Timestamp,
    ) -> Result<MaintenancePlan> {
        let now = truncate_to_second(now);
        let now_str = sql_timestamp(now);

        let tx = self.write_transaction()?;

        tx.execute(
            INSERT_PLAN_SQL,
            params![
                asset_id,
                frequency.map(|f| f.as_str()),
                start_date.map(|d| d.to_string()),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert plan")?;

        let id = tx.last_insert_rowid() as u64;

        for (position, description) in tasks.iter().enumerate() {
            tx.execute(
                INSERT_PLAN_TASK_SQL,
                params![id as i64, position as i64, description],
            )
            .db_context("Failed to insert plan task")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(MaintenancePlan {
            id,
            asset_id: asset_id.to_string(),
            frequency,
            start_date,
            tasks: tasks.to_vec(),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a plan with its task descriptions.
    pub fn get_plan(&self, id: u64) -> Result<Option<MaintenancePlan>> {
        let sql = format!("SELECT {PLAN_COLUMNS} FROM maintenance_plans WHERE id = ?1");
        let mut plan = self
            .connection
            .query_row(&sql, params![id as i64], Self::build_plan_from_row)
            .optional()
            .db_context("Failed to query plan")?;

        if let Some(ref mut plan) = plan {
            plan.tasks = Self::load_plan_tasks(&self.connection, plan.id)?;
        }

        Ok(plan)
    }

    /// Lists plans in creation order, optionally only the active ones.
    pub fn list_plans(&self, active_only: bool) -> Result<Vec<MaintenancePlan>> {
        let filter = if active_only { " WHERE is_active = 1" } else { "" };
        let sql = format!("SELECT {PLAN_COLUMNS} FROM maintenance_plans{filter} ORDER BY id");

        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let mut plans = stmt
            .query_map([], Self::build_plan_from_row)
            .db_context("Failed to query plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plans")?;

        for plan in &mut plans {
            plan.tasks = Self::load_plan_tasks(&self.connection, plan.id)?;
        }

        Ok(plans)
    }

    /// Activates or deactivates a plan. Returns `None` if the plan doesn't
    /// exist.
    pub fn set_plan_active(
        &mut self,
        id: u64,
        active: bool,
        now: Timestamp,
    ) -> Result<Option<MaintenancePlan>> {
        let rows = self
            .connection
            .execute(
                UPDATE_PLAN_ACTIVE_SQL,
                params![active, sql_timestamp(now), id as i64],
            )
            .db_context("Failed to update plan")?;

        if rows == 0 {
            return Ok(None);
        }
        self.get_plan(id)
    }

    /// Permanently deletes a plan together with every task instance that
    /// references it. Returns the number of task instances removed.
    pub fn delete_plan(&mut self, id: u64) -> Result<usize> {
        let tx = self.write_transaction()?;

        let exists: bool = tx
            .query_row(CHECK_PLAN_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check plan existence")?;

        if !exists {
            return Err(UpkeepError::PlanNotFound { id });
        }

        let removed = tx
            .execute(DELETE_PLAN_INSTANCES_SQL, params![id as i64])
            .db_context("Failed to delete plan task instances")?;

        tx.execute(DELETE_PLAN_TASKS_SQL, params![id as i64])
            .db_context("Failed to delete plan tasks")?;

        tx.execute(DELETE_PLAN_SQL, params![id as i64])
            .db_context("Failed to delete plan")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(removed)
    }
}
