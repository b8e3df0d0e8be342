//! SQLite persistence for plans, task instances, work orders and the
//! dashboard snapshot.
//!
//! Every multi-row write runs in a single transaction, so a failed batch
//! leaves the store untouched. Timestamps are stored as second-precision
//! RFC 3339 UTC strings and dates as `YYYY-MM-DD`, so both compare correctly
//! as text.

use std::{path::Path, time::Duration};

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod plan_queries;
pub mod stats_queries;
pub mod task_queries;
pub mod utils;
pub mod work_order_queries;

pub use stats_queries::SNAPSHOT_KEY;
pub use task_queries::{BatchOutcome, StatusChange};

/// How long a writer waits for a concurrent trigger to release the file.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (creating if needed) the database and brings the schema up to
    /// date.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Begins a transaction that takes the write lock up front.
    ///
    /// Read-then-write transactions use this so a concurrent writer makes
    /// them wait out the busy timeout instead of failing on lock upgrade.
    fn write_transaction(&mut self) -> Result<Transaction<'_>> {
        self.connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")
    }
}
