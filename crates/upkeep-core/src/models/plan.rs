//! Maintenance plan model.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::Frequency;

/// A recurring maintenance plan for one asset.
///
/// Plans are authored elsewhere; the engine only reads them. Start date and
/// frequency are optional because partially authored plans exist in the
/// store; generation treats such plans as inert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenancePlan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Asset the plan maintains (reference, not owned)
    pub asset_id: String,

    /// Recurrence interval
    pub frequency: Option<Frequency>,

    /// First scheduled occurrence
    pub start_date: Option<Date>,

    /// Task descriptions, each recurring independently
    #[serde(default)]
    pub tasks: Vec<String>,

    /// Inactive plans are not expanded into task instances
    pub is_active: bool,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}
