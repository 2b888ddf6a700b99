//! Approval, status, payment and closing operations.

use super::Lifecycle;
use crate::{
    auth::Action,
    error::{LifecycleError, Result},
    models::{
        ActionableFilter, Budget, ManagedProject, PaymentStatus, ProjectFilter, ProjectStatus,
        ProjectUpdate, UpdateGuard,
    },
    store::ProjectStore,
};

impl<S: ProjectStore + ?Sized> Lifecycle<'_, S> {
    /// Opens a budget-approval request with finance.
    ///
    /// Sets `send_for_approval` and clears `approved_by_finance` in the same
    /// write. A `proposed` budget is staged and only applied by
    /// [`Lifecycle::approve_budget`]; without one, any earlier proposal stays
    /// staged.
    pub fn request_budget_approval(
        &mut self,
        id: u64,
        proposed: Option<Budget>,
    ) -> Result<ManagedProject> {
        self.authorize(Action::RequestBudgetApproval)?;
        if let Some(budget) = &proposed {
            budget.validate()?;
        }

        let update = ProjectUpdate {
            send_for_approval: Some(true),
            approved_by_finance: Some(false),
            proposed_budget: proposed.map(Some),
            ..Default::default()
        };

        let project = self
            .store
            .update_project(id, &update, &UpdateGuard::none())?
            .ok_or(LifecycleError::ProjectNotFound { id })?;

        log::info!("project {id}: budget approval requested");
        Ok(project)
    }

    /// Records finance approval of the budget.
    ///
    /// The budget in force becomes `final_budget`, else the staged proposal,
    /// else stays as it is. A budget without an amount keeps the current
    /// amount. Approving a project that is already approved, has no
    /// outstanding request and would keep the same budget writes nothing and
    /// returns the stored snapshot.
    ///
    /// The write only lands if the approval request is still the one that
    /// was read, so a proposal staged in between is never approved unseen.
    pub fn approve_budget(
        &mut self,
        id: u64,
        final_budget: Option<Budget>,
    ) -> Result<ManagedProject> {
        self.authorize(Action::ApproveBudget)?;
        if let Some(budget) = &final_budget {
            budget.validate()?;
        }

        let current = self.require_project(id)?;
        let approved = final_budget
            .or_else(|| current.proposed_budget.clone())
            .map(|budget| budget.or_amount(current.budget.amount));

        let already_approved = current.approved_by_finance
            && !current.send_for_approval
            && current.proposed_budget.is_none()
            && approved
                .as_ref()
                .is_none_or(|budget| *budget == current.budget);
        if already_approved {
            log::debug!("project {id}: budget already approved");
            return Ok(current);
        }

        let update = ProjectUpdate {
            send_for_approval: Some(false),
            approved_by_finance: Some(true),
            budget: approved,
            proposed_budget: Some(None),
            ..Default::default()
        };

        let written = self
            .store
            .update_project(id, &update, &UpdateGuard::approval_of(&current))?;

        let Some(project) = written else {
            self.require_project(id)?;
            log::warn!("project {id}: approval request changed before approval was written");
            return Err(LifecycleError::PreconditionFailed {
                id,
                reason: "approval request changed while approving, try again".to_string(),
            });
        };

        log::info!(
            "project {id}: budget approved at {:?} {}",
            project.budget.amount,
            project.budget.currency
        );
        Ok(project)
    }

    /// Writes any status except the two owned by dedicated operations.
    ///
    /// Only the value is checked, not whether the current status can reach
    /// it. Use [`Lifecycle::transition_status`] for the checked variant.
    pub fn set_status(&mut self, id: u64, status: &str) -> Result<ManagedProject> {
        self.authorize(Action::SetStatus)?;
        let target = ProjectStatus::parse(status)?;
        let current = self.require_project(id)?;

        if target.is_guarded_target() {
            log::warn!(
                "project {id}: refused status write {} -> {target}",
                current.status
            );
            return Err(LifecycleError::InvalidTransition {
                id,
                from: current.status,
                to: target,
                reason: dedicated_operation(target).to_string(),
            });
        }

        let project = self
            .store
            .update_project(id, &ProjectUpdate::status(target), &UpdateGuard::none())?
            .ok_or(LifecycleError::ProjectNotFound { id })?;

        log::info!("project {id}: status set {} -> {target}", current.status);
        Ok(project)
    }

    /// Moves a project along an edge of the transition table.
    ///
    /// The write only lands if the status is still the one the check saw.
    pub fn transition_status(&mut self, id: u64, status: &str) -> Result<ManagedProject> {
        self.authorize(Action::TransitionStatus)?;
        let target = ProjectStatus::parse(status)?;
        let current = self.require_project(id)?;
        let from = current.status;

        if !from.can_transition_to(target) {
            log::warn!("project {id}: rejected transition {from} -> {target}");
            return Err(LifecycleError::InvalidTransition {
                id,
                from,
                to: target,
                reason: transition_refusal(from, target),
            });
        }

        self.guarded_status_write(id, from, target)
    }

    /// Confirms that every stage of a `COMPLETED` project is done.
    pub fn confirm_all_stages_completed(&mut self, id: u64) -> Result<ManagedProject> {
        self.authorize(Action::ConfirmAllStagesCompleted)?;
        let current = self.require_project(id)?;

        if current.status != ProjectStatus::Completed {
            log::warn!(
                "project {id}: cannot confirm stages while {}",
                current.status
            );
            return Err(LifecycleError::InvalidTransition {
                id,
                from: current.status,
                to: ProjectStatus::AllStagesCompleted,
                reason: "project must be COMPLETED first".to_string(),
            });
        }

        self.guarded_status_write(id, ProjectStatus::Completed, ProjectStatus::AllStagesCompleted)
    }

    /// Records the client payment state.
    pub fn set_payment_status(&mut self, id: u64, payment_status: &str) -> Result<ManagedProject> {
        self.authorize(Action::SetPaymentStatus)?;
        let target = PaymentStatus::parse(payment_status)?;

        let project = self
            .store
            .update_project(
                id,
                &ProjectUpdate::payment_status(target),
                &UpdateGuard::none(),
            )?
            .ok_or(LifecycleError::ProjectNotFound { id })?;

        log::info!("project {id}: payment status set to {target}");
        Ok(project)
    }

    /// Closes a project whose completion is confirmed and whose payment has
    /// arrived.
    ///
    /// Both conditions are part of a single conditional write, so of two
    /// racing calls exactly one succeeds. On failure nothing is written and
    /// the error names the first unmet condition.
    pub fn close_project(&mut self, id: u64) -> Result<ManagedProject> {
        self.authorize(Action::CloseProject)?;

        let guard = UpdateGuard::status(ProjectStatus::AllStagesCompleted)
            .with_payment(PaymentStatus::Recieved);
        let update = ProjectUpdate::status(ProjectStatus::ClosedSuccessfully);

        if let Some(project) = self.store.update_project(id, &update, &guard)? {
            log::info!("project {id}: closed successfully");
            return Ok(project);
        }

        let current = self.require_project(id)?;
        let reason = if current.status != ProjectStatus::AllStagesCompleted {
            format!("completion not confirmed: status is {}", current.status)
        } else if current.payment_status != PaymentStatus::Recieved {
            format!(
                "payment not received: payment status is {}",
                current.payment_status
            )
        } else {
            "project changed while closing, try again".to_string()
        };

        log::warn!("project {id}: close refused, {reason}");
        Err(LifecycleError::PreconditionFailed { id, reason })
    }

    /// Lists the projects in a dashboard queue, newest first.
    pub fn list_actionable(&self, queue: ActionableFilter) -> Result<Vec<ManagedProject>> {
        self.authorize(Action::ViewProjects)?;
        let projects = self.store.find_projects(&ProjectFilter::from(queue))?;
        log::debug!("queue {}: {} project(s)", queue.as_str(), projects.len());
        Ok(projects)
    }

    fn guarded_status_write(
        &mut self,
        id: u64,
        from: ProjectStatus,
        to: ProjectStatus,
    ) -> Result<ManagedProject> {
        let written = self.store.update_project(
            id,
            &ProjectUpdate::status(to),
            &UpdateGuard::status(from),
        )?;

        match written {
            Some(project) => {
                log::info!("project {id}: {from} -> {to}");
                Ok(project)
            }
            None => {
                let current = self.require_project(id)?;
                log::warn!(
                    "project {id}: status moved to {} before {from} -> {to} was written",
                    current.status
                );
                Err(LifecycleError::InvalidTransition {
                    id,
                    from: current.status,
                    to,
                    reason: format!("status changed from {from} concurrently"),
                })
            }
        }
    }
}

fn dedicated_operation(target: ProjectStatus) -> &'static str {
    match target {
        ProjectStatus::AllStagesCompleted => "use confirm_all_stages_completed",
        _ => "use close_project",
    }
}

fn transition_refusal(from: ProjectStatus, to: ProjectStatus) -> String {
    if to.is_guarded_target() {
        return dedicated_operation(to).to_string();
    }
    if from.is_terminal() {
        return "project is closed".to_string();
    }
    let allowed: Vec<&str> = from.allowed_targets().iter().map(|s| s.as_str()).collect();
    format!("allowed targets are {}", allowed.join(", "))
}
