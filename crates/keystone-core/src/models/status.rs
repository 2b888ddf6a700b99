//! Status enumerations for projects, payments and modules.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::LifecycleError;

/// Lifecycle status of a managed project.
///
/// The happy path is `PENDING → ACTIVE → COMPLETED → ALL_STAGES_COMPLETED →
/// CLOSED_SUCCESSFULLY`. The last two moves are owned by dedicated
/// operations and never appear in [`ProjectStatus::allowed_targets`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    /// Waiting to be started
    Pending,

    /// Work is underway
    #[default]
    Active,

    /// Paused
    Inactive,

    /// Abandoned before completion
    Cancelled,

    /// Delivery team reports the work done
    Completed,

    /// Completion confirmed by the signing-off role
    AllStagesCompleted,

    /// Completion confirmed and payment received; terminal
    ClosedSuccessfully,
}

impl ProjectStatus {
    /// Every status, in workflow order.
    pub const ALL: [ProjectStatus; 7] = [
        ProjectStatus::Pending,
        ProjectStatus::Active,
        ProjectStatus::Inactive,
        ProjectStatus::Cancelled,
        ProjectStatus::Completed,
        ProjectStatus::AllStagesCompleted,
        ProjectStatus::ClosedSuccessfully,
    ];

    /// Convert to the stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "PENDING",
            ProjectStatus::Active => "ACTIVE",
            ProjectStatus::Inactive => "INACTIVE",
            ProjectStatus::Cancelled => "CANCELLED",
            ProjectStatus::Completed => "COMPLETED",
            ProjectStatus::AllStagesCompleted => "ALL_STAGES_COMPLETED",
            ProjectStatus::ClosedSuccessfully => "CLOSED_SUCCESSFULLY",
        }
    }

    /// Whether normal workflows are finished with the project.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProjectStatus::ClosedSuccessfully)
    }

    /// Whether only a dedicated operation may move a project into this
    /// status.
    pub fn is_guarded_target(&self) -> bool {
        matches!(
            self,
            ProjectStatus::AllStagesCompleted | ProjectStatus::ClosedSuccessfully
        )
    }

    /// Targets reachable through a plain status transition.
    pub fn allowed_targets(&self) -> &'static [ProjectStatus] {
        use ProjectStatus::*;
        match self {
            Pending => &[Active, Inactive, Cancelled],
            Active => &[Pending, Inactive, Cancelled, Completed],
            Inactive => &[Active, Cancelled],
            Cancelled => &[Pending],
            Completed => &[Active],
            AllStagesCompleted => &[Completed],
            ClosedSuccessfully => &[],
        }
    }

    /// Whether `target` is reachable from `self` through a plain transition.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keystone_core::models::ProjectStatus;
    ///
    /// assert!(ProjectStatus::Active.can_transition_to(ProjectStatus::Completed));
    /// assert!(!ProjectStatus::Completed.can_transition_to(ProjectStatus::AllStagesCompleted));
    /// assert!(!ProjectStatus::ClosedSuccessfully.can_transition_to(ProjectStatus::Active));
    /// ```
    pub fn can_transition_to(&self, target: ProjectStatus) -> bool {
        self.allowed_targets().contains(&target)
    }

    /// Parse a status string, reporting failures as
    /// [`LifecycleError::InvalidStatus`].
    pub fn parse(value: &str) -> Result<Self, LifecycleError> {
        value.parse().map_err(|_| LifecycleError::InvalidStatus {
            field: "status",
            value: value.to_string(),
            expected: expected_values(&Self::ALL.map(|s| s.as_str())),
        })
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("Invalid project status: {s}"))
    }
}

/// Payment state of a project.
///
/// The `RECIEVED` spelling is part of the stored and wire representation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// No payment recorded yet
    #[default]
    Pending,

    /// Client payment has arrived
    Recieved,

    /// Client payment is overdue or refused
    NotRecieved,
}

impl PaymentStatus {
    /// Every payment status.
    pub const ALL: [PaymentStatus; 3] = [
        PaymentStatus::Pending,
        PaymentStatus::Recieved,
        PaymentStatus::NotRecieved,
    ];

    /// Convert to the stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Recieved => "RECIEVED",
            PaymentStatus::NotRecieved => "NOT_RECIEVED",
        }
    }

    /// Parse a payment status string, reporting failures as
    /// [`LifecycleError::InvalidStatus`].
    pub fn parse(value: &str) -> Result<Self, LifecycleError> {
        value.parse().map_err(|_| LifecycleError::InvalidStatus {
            field: "payment status",
            value: value.to_string(),
            expected: expected_values(&Self::ALL.map(|s| s.as_str())),
        })
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("Invalid payment status: {s}"))
    }
}

/// Type-safe enumeration of module statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum ModuleStatus {
    /// Not started
    #[default]
    Todo,

    /// Being worked on
    InProgress,

    /// Delivered
    Completed,
}

impl FromStr for ModuleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(ModuleStatus::Todo),
            "inprogress" | "in_progress" => Ok(ModuleStatus::InProgress),
            "completed" => Ok(ModuleStatus::Completed),
            _ => Err(format!("Invalid module status: {s}")),
        }
    }
}

impl ModuleStatus {
    /// Convert to the stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleStatus::Todo => "todo",
            ModuleStatus::InProgress => "inprogress",
            ModuleStatus::Completed => "completed",
        }
    }

    /// Parse a module status string, reporting failures as
    /// [`LifecycleError::InvalidStatus`].
    pub fn parse(value: &str) -> Result<Self, LifecycleError> {
        value.parse().map_err(|_| LifecycleError::InvalidStatus {
            field: "module status",
            value: value.to_string(),
            expected: "todo, inprogress, completed".to_string(),
        })
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keystone_core::models::ModuleStatus;
    ///
    /// assert_eq!(ModuleStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(ModuleStatus::InProgress.with_icon(), "➤ In Progress");
    /// assert_eq!(ModuleStatus::Todo.with_icon(), "○ Todo");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            ModuleStatus::Completed => "✓ Completed",
            ModuleStatus::InProgress => "➤ In Progress",
            ModuleStatus::Todo => "○ Todo",
        }
    }
}

fn expected_values(values: &[&str]) -> String {
    values.join(", ")
}
