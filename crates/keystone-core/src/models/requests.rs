//! Allow-listed write structures accepted by the store.

use jiff::{civil::Date, Timestamp};

use super::{Budget, ManagedProject, ModuleStatus, PaymentStatus, ProjectModule, ProjectStatus};

/// The complete set of workflow fields a lifecycle operation may change.
///
/// Fields left as `None` are untouched. `proposed_budget: Some(None)`
/// clears the staged proposal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectUpdate {
    pub status: Option<ProjectStatus>,
    pub send_for_approval: Option<bool>,
    pub approved_by_finance: Option<bool>,
    pub payment_status: Option<PaymentStatus>,
    pub budget: Option<Budget>,
    pub proposed_budget: Option<Option<Budget>>,
}

impl ProjectUpdate {
    /// An update that only sets the status.
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// An update that only sets the payment status.
    pub fn payment_status(payment_status: PaymentStatus) -> Self {
        Self {
            payment_status: Some(payment_status),
            ..Default::default()
        }
    }

    /// Apply the update to an in-memory copy of a project.
    pub fn apply_to(&self, project: &mut ManagedProject, now: Timestamp) {
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(flag) = self.send_for_approval {
            project.send_for_approval = flag;
        }
        if let Some(flag) = self.approved_by_finance {
            project.approved_by_finance = flag;
        }
        if let Some(payment_status) = self.payment_status {
            project.payment_status = payment_status;
        }
        if let Some(budget) = &self.budget {
            project.budget = budget.clone();
        }
        if let Some(proposed) = &self.proposed_budget {
            project.proposed_budget = proposed.clone();
        }
        project.updated_at = now;
    }
}

/// Conditions the stored project must satisfy for a guarded update to
/// apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateGuard {
    pub status: Option<ProjectStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub send_for_approval: Option<bool>,
    pub approved_by_finance: Option<bool>,
    pub proposed_budget: Option<Option<Budget>>,
}

impl UpdateGuard {
    /// No conditions beyond the project existing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Require the project to currently be in `status`.
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Require the approval request of `project` to be unchanged: both
    /// approval flags and the staged proposal.
    pub fn approval_of(project: &ManagedProject) -> Self {
        Self {
            send_for_approval: Some(project.send_for_approval),
            approved_by_finance: Some(project.approved_by_finance),
            proposed_budget: Some(project.proposed_budget.clone()),
            ..Default::default()
        }
    }

    /// Additionally require the payment status.
    pub fn with_payment(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = Some(payment_status);
        self
    }

    /// Whether `project` satisfies the guard.
    pub fn matches(&self, project: &ManagedProject) -> bool {
        self.status.is_none_or(|s| s == project.status)
            && self
                .payment_status
                .is_none_or(|p| p == project.payment_status)
            && self
                .send_for_approval
                .is_none_or(|flag| flag == project.send_for_approval)
            && self
                .approved_by_finance
                .is_none_or(|flag| flag == project.approved_by_finance)
            && self
                .proposed_budget
                .as_ref()
                .is_none_or(|proposed| *proposed == project.proposed_budget)
    }
}

/// Fields of a module about to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewModule {
    pub project_id: u64,
    pub name: String,
    pub description: Option<String>,
    pub deadline: Date,
    pub status: ModuleStatus,
}

/// Parameters for updating a module; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateModuleRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<Date>,
    pub status: Option<ModuleStatus>,
}

impl UpdateModuleRequest {
    /// Apply the request to an in-memory copy of a module.
    pub fn apply_to(&self, module: &mut ProjectModule, now: Timestamp) {
        if let Some(name) = &self.name {
            module.name = name.clone();
        }
        if let Some(description) = &self.description {
            module.description = Some(description.clone());
        }
        if let Some(deadline) = self.deadline {
            module.deadline = deadline;
        }
        if let Some(status) = self.status {
            module.status = status;
        }
        module.updated_at = now;
    }
}
