//! Approval, status, payment and closing operations for the
//! LifecycleManager.

use super::LifecycleManager;
use crate::{
    auth::SharedAuthorizer,
    error::Result,
    models::ManagedProject,
    params::{BudgetDecision, Id, SetPaymentStatus, SetStatus},
};

impl LifecycleManager {
    /// Opens a budget-approval request, staging the given budget if any.
    pub async fn request_budget_approval(
        &self,
        auth: &SharedAuthorizer,
        params: &BudgetDecision,
    ) -> Result<ManagedProject> {
        let id = params.id;
        let proposed = params.budget();
        self.run(auth, move |lifecycle| {
            lifecycle.request_budget_approval(id, proposed)
        })
        .await
    }

    /// Records finance approval; the given budget, if any, becomes final.
    pub async fn approve_budget(
        &self,
        auth: &SharedAuthorizer,
        params: &BudgetDecision,
    ) -> Result<ManagedProject> {
        let id = params.id;
        let final_budget = params.budget();
        self.run(auth, move |lifecycle| lifecycle.approve_budget(id, final_budget))
            .await
    }

    /// Writes a status without checking reachability.
    pub async fn set_status(
        &self,
        auth: &SharedAuthorizer,
        params: &SetStatus,
    ) -> Result<ManagedProject> {
        let id = params.id;
        let status = params.status.clone();
        self.run(auth, move |lifecycle| lifecycle.set_status(id, &status))
            .await
    }

    /// Moves a project along an edge of the transition table.
    pub async fn transition_status(
        &self,
        auth: &SharedAuthorizer,
        params: &SetStatus,
    ) -> Result<ManagedProject> {
        let id = params.id;
        let status = params.status.clone();
        self.run(auth, move |lifecycle| lifecycle.transition_status(id, &status))
            .await
    }

    /// `COMPLETED → ALL_STAGES_COMPLETED`.
    pub async fn confirm_all_stages_completed(
        &self,
        auth: &SharedAuthorizer,
        params: &Id,
    ) -> Result<ManagedProject> {
        let id = params.id;
        self.run(auth, move |lifecycle| lifecycle.confirm_all_stages_completed(id))
            .await
    }

    pub async fn set_payment_status(
        &self,
        auth: &SharedAuthorizer,
        params: &SetPaymentStatus,
    ) -> Result<ManagedProject> {
        let id = params.id;
        let payment_status = params.payment_status.clone();
        self.run(auth, move |lifecycle| {
            lifecycle.set_payment_status(id, &payment_status)
        })
        .await
    }

    /// Closes a confirmed, paid project in one conditional write.
    pub async fn close_project(
        &self,
        auth: &SharedAuthorizer,
        params: &Id,
    ) -> Result<ManagedProject> {
        let id = params.id;
        self.run(auth, move |lifecycle| lifecycle.close_project(id))
            .await
    }
}
