//! Work order and user queries consumed by the statistics aggregation.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::utils::{sql_timestamp, timestamp_at, truncate_to_second};
use crate::{
    error::{DatabaseResultExt, Result},
    models::WorkOrder,
};

const WORK_ORDER_COLUMNS: &str = "id, title, status, due_date, created_at, updated_at";
const INSERT_WORK_ORDER_SQL: &str = "INSERT INTO work_orders (title, status, due_date, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)";
const INSERT_WORK_ORDER_WITH_ID_SQL: &str = "INSERT INTO work_orders (id, title, status, due_date, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)";
const UPDATE_WORK_ORDER_SQL: &str = "UPDATE work_orders SET title = COALESCE(?1, title), status = ?2, due_date = COALESCE(?3, due_date), updated_at = ?4 WHERE id = ?5";
const INSERT_USER_SQL: &str = "INSERT INTO users (name, created_at) VALUES (?1, ?2)";
const COUNT_USERS_SQL: &str = "SELECT COUNT(*) FROM users";

impl super::Database {
    fn build_work_order_from_row(row: &rusqlite::Row) -> rusqlite::Result<WorkOrder> {
        Ok(WorkOrder {
            id: row.get::<_, i64>(0)? as u64,
            title: row.get(1)?,
            status: row.get(2)?,
            due_date: row.get(3)?,
            created_at: timestamp_at(row, 4)?,
            updated_at: timestamp_at(row, 5)?,
        })
    }

    /// Creates a work order, or updates it when `id` names an existing one.
    ///
    /// An `id` that doesn't exist yet is created under that ID, mirroring a
    /// document store's set-with-ID. On update, absent title and due date
    /// keep their stored values.
    pub fn upsert_work_order(
        &mut self,
        id: Option<u64>,
        title: Option<&str>,
        status: &str,
        due_date: Option<&str>,
        now: Timestamp,
    ) -> Result<WorkOrder> {
        let now_str = sql_timestamp(truncate_to_second(now));

        let tx = self.write_transaction()?;

        let id = match id {
            Some(id) => {
                let updated = tx
                    .execute(
                        UPDATE_WORK_ORDER_SQL,
                        params![title, status, due_date, &now_str, id as i64],
                    )
                    .db_context("Failed to update work order")?;
                if updated == 0 {
                    tx.execute(
                        INSERT_WORK_ORDER_WITH_ID_SQL,
                        params![id as i64, title, status, due_date, &now_str],
                    )
                    .db_context("Failed to insert work order")?;
                }
                id
            }
            None => {
                tx.execute(
                    INSERT_WORK_ORDER_SQL,
                    params![title, status, due_date, &now_str],
                )
                .db_context("Failed to insert work order")?;
                tx.last_insert_rowid() as u64
            }
        };

        let sql = format!("SELECT {WORK_ORDER_COLUMNS} FROM work_orders WHERE id = ?1");
        let order = tx
            .query_row(&sql, params![id as i64], Self::build_work_order_from_row)
            .db_context("Failed to reload work order")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(order)
    }

    /// Retrieves a work order by its ID.
    pub fn get_work_order(&self, id: u64) -> Result<Option<WorkOrder>> {
        let sql = format!("SELECT {WORK_ORDER_COLUMNS} FROM work_orders WHERE id = ?1");
        self.connection
            .query_row(&sql, params![id as i64], Self::build_work_order_from_row)
            .optional()
            .db_context("Failed to get work order")
    }

    /// Reads up to `limit` work orders with IDs greater than `after_id`, in
    /// ID order. Callers page through the table by passing the last ID seen.
    pub fn work_order_page(&self, after_id: u64, limit: usize) -> Result<Vec<WorkOrder>> {
        let sql = format!(
            "SELECT {WORK_ORDER_COLUMNS} FROM work_orders WHERE id > ?1 ORDER BY id LIMIT ?2"
        );
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let orders = stmt
            .query_map(
                params![after_id as i64, limit as i64],
                Self::build_work_order_from_row,
            )
            .db_context("Failed to query work orders")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch work orders")?;

        Ok(orders)
    }

    /// Registers a user and returns the new ID.
    pub fn create_user(&mut self, name: &str, now: Timestamp) -> Result<u64> {
        self.connection
            .execute(INSERT_USER_SQL, params![name, sql_timestamp(now)])
            .db_context("Failed to insert user")?;
        Ok(self.connection.last_insert_rowid() as u64)
    }

    /// Counts registered users.
    pub fn count_users(&self) -> Result<u64> {
        let count: i64 = self
            .connection
            .query_row(COUNT_USERS_SQL, [], |row| row.get(0))
            .db_context("Failed to count users")?;
        Ok(count as u64)
    }
}
