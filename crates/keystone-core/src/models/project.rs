//! Managed project definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Budget, PaymentStatus, ProjectModule, ProjectStatus};

/// A managed project with its workflow state and modules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManagedProject {
    /// Unique identifier for the project
    pub id: u64,

    /// Name of the project
    pub name: String,

    /// Free-form description
    pub description: Option<String>,

    /// Budget currently in force
    #[serde(default)]
    pub budget: Budget,

    /// Budget staged by an approval request, applied when finance approves
    #[serde(default)]
    pub proposed_budget: Option<Budget>,

    /// Lifecycle status
    #[serde(default)]
    pub status: ProjectStatus,

    /// An approval request is waiting on finance
    #[serde(default)]
    pub send_for_approval: bool,

    /// Finance approved the current budget
    #[serde(default)]
    pub approved_by_finance: bool,

    /// Payment state
    #[serde(default)]
    pub payment_status: PaymentStatus,

    /// Timestamp when the project was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the project was last modified (UTC)
    pub updated_at: Timestamp,

    /// Modules in order (eagerly loaded)
    #[serde(default)]
    pub modules: Vec<ProjectModule>,
}

impl ManagedProject {
    /// Whether the project sits in the finance approval queue.
    pub fn awaiting_approval(&self) -> bool {
        self.send_for_approval
            && !self.approved_by_finance
            && self.status != ProjectStatus::Cancelled
    }

    /// Whether [`crate::Lifecycle::close_project`] would succeed right now.
    pub fn ready_to_close(&self) -> bool {
        self.status == ProjectStatus::AllStagesCompleted
            && self.payment_status == PaymentStatus::Recieved
    }
}
