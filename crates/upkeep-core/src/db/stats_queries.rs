//! Storage of the dashboard aggregate snapshot.

use rusqlite::{params, OptionalExtension};
use serde_json::{Map, Value};

use super::utils::sql_timestamp;
use crate::{
    error::{DatabaseResultExt, Result},
    models::AggregateSnapshot,
};

/// Key of the singleton summary document in `dashboard_stats`.
pub const SNAPSHOT_KEY: &str = "summary";

const SELECT_PAYLOAD_SQL: &str = "SELECT payload FROM dashboard_stats WHERE key = ?1";
const UPSERT_PAYLOAD_SQL: &str = "INSERT INTO dashboard_stats (key, payload, last_updated) VALUES (?1, ?2, ?3) ON CONFLICT(key) DO UPDATE SET payload = excluded.payload, last_updated = excluded.last_updated";

impl super::Database {
    /// Reads the current snapshot, if one was ever written.
    pub fn read_snapshot(&self) -> Result<Option<AggregateSnapshot>> {
        let payload: Option<String> = self
            .connection
            .query_row(SELECT_PAYLOAD_SQL, params![SNAPSHOT_KEY], |row| row.get(0))
            .optional()
            .db_context("Failed to read dashboard snapshot")?;

        payload
            .map(|p| serde_json::from_str(&p).map_err(Into::into))
            .transpose()
    }

    /// Merges `snapshot` into the stored document.
    ///
    /// Every field of the snapshot overwrites the stored one; fields written
    /// by other producers are kept. Concurrent writers are not coordinated:
    /// the last merge wins.
    pub fn merge_snapshot(&mut self, snapshot: &AggregateSnapshot) -> Result<()> {
        let tx = self.write_transaction()?;

        let existing: Option<String> = tx
            .query_row(SELECT_PAYLOAD_SQL, params![SNAPSHOT_KEY], |row| row.get(0))
            .optional()
            .db_context("Failed to read dashboard snapshot")?;

        let mut document = match existing.as_deref().map(serde_json::from_str::<Value>) {
            Some(Ok(Value::Object(map))) => map,
            Some(_) => {
                log::warn!("Replacing unreadable dashboard snapshot '{SNAPSHOT_KEY}'");
                Map::new()
            }
            None => Map::new(),
        };

        if let Value::Object(fields) = serde_json::to_value(snapshot)? {
            document.extend(fields);
        }

        tx.execute(
            UPSERT_PAYLOAD_SQL,
            params![
                SNAPSHOT_KEY,
                Value::Object(document).to_string(),
                sql_timestamp(snapshot.last_updated)
            ],
        )
        .db_context("Failed to write dashboard snapshot")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
