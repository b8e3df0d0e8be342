//! Builder for creating and configuring Engine instances.

use std::path::{Path, PathBuf};

use jiff::Timestamp;

use super::{Engine, EnginePolicy};
use crate::error::{Result, UpkeepError};

/// Builder for creating and configuring Engine instances.
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    database_path: Option<PathBuf>,
    policy: EnginePolicy,
    pinned_now: Option<Timestamp>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/upkeep/upkeep.db` or `~/.local/share/upkeep/upkeep.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Replaces the default policy.
    pub fn with_policy(mut self, policy: EnginePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Pins the engine clock. Every operation then behaves as if it ran at
    /// `now`; `None` keeps the system clock.
    pub fn with_now(mut self, now: Option<Timestamp>) -> Self {
        self.pinned_now = now;
        self
    }

    /// Builds the configured engine, creating the database if needed.
    ///
    /// # Errors
    ///
    /// Returns `UpkeepError::InvalidInput` if the policy is out of range
    /// Returns `UpkeepError::FileSystem` if the database path is invalid
    /// Returns `UpkeepError::Database` if database initialization fails
    pub async fn build(self) -> Result<Engine> {
        self.policy.validate()?;

        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| UpkeepError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let engine = Engine::new(db_path, self.policy, self.pinned_now);
        engine.run_blocking(|_db| Ok(())).await?;

        log::debug!("Engine ready at {}", engine.db_path.display());
        Ok(engine)
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("upkeep")
            .place_data_file("upkeep.db")
            .map_err(|e| UpkeepError::XdgDirectory(e.to_string()))
    }
}
