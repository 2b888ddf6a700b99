//! Project module definition.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::ModuleStatus;

/// A deliverable owned by a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectModule {
    /// Unique identifier for the module
    pub id: u64,

    /// ID of the owning project
    pub project_id: u64,

    /// Short name of the module
    pub name: String,

    /// What the module delivers
    pub description: Option<String>,

    /// Date the module is due
    pub deadline: Date,

    /// Delivery status
    pub status: ModuleStatus,

    /// Position within the project (0-based)
    pub order: u32,

    /// Timestamp when the module was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the module was last modified (UTC)
    pub updated_at: Timestamp,
}
