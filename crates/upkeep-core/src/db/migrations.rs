//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Ensures columns the retention sweep relies on are present.
    fn apply_migrations(&self) -> Result<()> {
        let has_archived_at: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('task_instances') WHERE name = 'archived_at'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect task_instances columns")?;

        if !has_archived_at {
            self.connection
                .execute("ALTER TABLE task_instances ADD COLUMN archived_at TEXT", [])
                .db_context("Failed to add archived_at column to task_instances")?;
        }

        Ok(())
    }
}
