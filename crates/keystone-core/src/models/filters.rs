//! Filter types for querying projects.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ManagedProject, ProjectStatus};

/// The work queues a dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum ActionableFilter {
    /// Every project that is not closed
    #[default]
    Open,

    /// Budget requests waiting on finance
    PendingApproval,

    /// Confirmed projects waiting on payment
    PaymentQueue,

    /// Completed projects, confirmed or awaiting confirmation
    CompletionQueue,

    /// Every project including closed ones
    All,
}

impl ActionableFilter {
    /// Convert to the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionableFilter::Open => "open",
            ActionableFilter::PendingApproval => "pending_approval",
            ActionableFilter::PaymentQueue => "payment_queue",
            ActionableFilter::CompletionQueue => "completion_queue",
            ActionableFilter::All => "all",
        }
    }

    /// Heading used when listing this queue.
    pub fn title(&self) -> &'static str {
        match self {
            ActionableFilter::Open => "Open Projects",
            ActionableFilter::PendingApproval => "Awaiting Finance Approval",
            ActionableFilter::PaymentQueue => "Awaiting Payment",
            ActionableFilter::CompletionQueue => "Awaiting Completion Sign-off",
            ActionableFilter::All => "All Projects",
        }
    }
}

impl FromStr for ActionableFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "open" | "default" => Ok(ActionableFilter::Open),
            "pending_approval" => Ok(ActionableFilter::PendingApproval),
            "payment_queue" | "payment" => Ok(ActionableFilter::PaymentQueue),
            "completion_queue" | "completion" => Ok(ActionableFilter::CompletionQueue),
            "all" => Ok(ActionableFilter::All),
            _ => Err(format!("Invalid project queue: {s}")),
        }
    }
}

/// Store-level filter over the project collection.
///
/// Empty status lists mean "any status"; `None` flags mean "either value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    /// Keep only projects whose status is listed
    pub status_in: Vec<ProjectStatus>,

    /// Drop projects whose status is listed
    pub status_not_in: Vec<ProjectStatus>,

    /// Match on the outstanding-approval flag
    pub send_for_approval: Option<bool>,

    /// Match on the finance-approval flag
    pub approved_by_finance: Option<bool>,
}

impl ProjectFilter {
    /// Whether `project` passes every condition of the filter.
    pub fn matches(&self, project: &ManagedProject) -> bool {
        (self.status_in.is_empty() || self.status_in.contains(&project.status))
            && !self.status_not_in.contains(&project.status)
            && self
                .send_for_approval
                .is_none_or(|flag| flag == project.send_for_approval)
            && self
                .approved_by_finance
                .is_none_or(|flag| flag == project.approved_by_finance)
    }
}

impl From<ActionableFilter> for ProjectFilter {
    /// Translate a dashboard queue into store conditions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keystone_core::models::{ActionableFilter, ProjectFilter, ProjectStatus};
    ///
    /// let filter = ProjectFilter::from(ActionableFilter::Open);
    /// assert_eq!(filter.status_not_in, vec![ProjectStatus::ClosedSuccessfully]);
    ///
    /// let filter = ProjectFilter::from(ActionableFilter::PendingApproval);
    /// assert_eq!(filter.send_for_approval, Some(true));
    /// assert_eq!(filter.approved_by_finance, Some(false));
    /// ```
    fn from(queue: ActionableFilter) -> Self {
        match queue {
            ActionableFilter::Open => Self {
                status_not_in: vec![ProjectStatus::ClosedSuccessfully],
                ..Default::default()
            },
            ActionableFilter::PendingApproval => Self {
                status_not_in: vec![ProjectStatus::Cancelled],
                send_for_approval: Some(true),
                approved_by_finance: Some(false),
                ..Default::default()
            },
            ActionableFilter::PaymentQueue => Self {
                status_in: vec![ProjectStatus::AllStagesCompleted],
                ..Default::default()
            },
            ActionableFilter::CompletionQueue => Self {
                status_in: vec![
                    ProjectStatus::Completed,
                    ProjectStatus::AllStagesCompleted,
                ],
                ..Default::default()
            },
            ActionableFilter::All => Self::default(),
        }
    }
}
