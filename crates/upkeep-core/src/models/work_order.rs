//! Work order model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A corrective work order. Only its status and due date matter here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkOrder {
    /// Unique identifier for the work order
    pub id: u64,

    /// Optional short title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Free-form status, compared case-insensitively
    pub status: String,

    /// Due date as written by the authoring UI; may not parse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    /// Timestamp when the work order was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the work order was last modified (UTC)
    pub updated_at: Timestamp,
}
