//! Operations that return display wrappers for the CLI and MCP layers.

use super::LifecycleManager;
use crate::{
    auth::SharedAuthorizer,
    display::{CloseResult, CreateResult, DeleteResult, ProjectSummaries, UpdateResult},
    error::Result,
    models::{ManagedProject, ProjectModule, ProjectSummary},
    params::{
        AddModule, BudgetDecision, CreateProject, DeleteProject, Id, ListProjects,
        SetPaymentStatus, SetStatus, UpdateModule,
    },
};

impl LifecycleManager {
    /// Lists a queue as summaries with module counts.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use keystone_core::{auth::AllowAll, models::ActionableFilter, params::ListProjects, LifecycleManagerBuilder};
    /// # async {
    /// let manager = LifecycleManagerBuilder::new().build().await?;
    /// let auth: keystone_core::auth::SharedAuthorizer = Arc::new(AllowAll);
    /// let params = ListProjects { queue: ActionableFilter::PaymentQueue };
    /// let summaries = manager.list_project_summaries(&auth, &params).await?;
    /// # Result::<(), keystone_core::LifecycleError>::Ok(())
    /// # };
    /// ```
    pub async fn list_project_summaries(
        &self,
        auth: &SharedAuthorizer,
        params: &ListProjects,
    ) -> Result<ProjectSummaries> {
        let projects = self.list_projects(auth, params).await?;
        let summaries: Vec<ProjectSummary> = projects.iter().map(Into::into).collect();
        Ok(ProjectSummaries(summaries))
    }

    pub async fn create_project_result(
        &self,
        auth: &SharedAuthorizer,
        params: &CreateProject,
    ) -> Result<CreateResult<ManagedProject>> {
        self.create_project(auth, params)
            .await
            .map(CreateResult::new)
    }

    pub async fn delete_project_result(
        &self,
        auth: &SharedAuthorizer,
        params: &DeleteProject,
    ) -> Result<DeleteResult<ManagedProject>> {
        self.delete_project(auth, params)
            .await
            .map(DeleteResult::new)
    }

    /// Requests approval and reports what the request changed.
    pub async fn request_budget_approval_result(
        &self,
        auth: &SharedAuthorizer,
        params: &BudgetDecision,
    ) -> Result<UpdateResult<ManagedProject>> {
        let project = self.request_budget_approval(auth, params).await?;
        let mut changes = vec!["Sent for finance approval".to_string()];
        if let Some(proposed) = &project.proposed_budget {
            changes.push(format!("Proposed budget: {proposed}"));
        }
        Ok(UpdateResult::with_changes(project, changes))
    }

    pub async fn approve_budget_result(
        &self,
        auth: &SharedAuthorizer,
        params: &BudgetDecision,
    ) -> Result<UpdateResult<ManagedProject>> {
        let project = self.approve_budget(auth, params).await?;
        let changes = vec![format!("Budget approved at {}", project.budget)];
        Ok(UpdateResult::with_changes(project, changes))
    }

    pub async fn set_status_result(
        &self,
        auth: &SharedAuthorizer,
        params: &SetStatus,
    ) -> Result<UpdateResult<ManagedProject>> {
        self.set_status(auth, params).await.map(status_changed)
    }

    pub async fn transition_status_result(
        &self,
        auth: &SharedAuthorizer,
        params: &SetStatus,
    ) -> Result<UpdateResult<ManagedProject>> {
        self.transition_status(auth, params).await.map(status_changed)
    }

    pub async fn confirm_all_stages_completed_result(
        &self,
        auth: &SharedAuthorizer,
        params: &Id,
    ) -> Result<UpdateResult<ManagedProject>> {
        self.confirm_all_stages_completed(auth, params)
            .await
            .map(status_changed)
    }

    pub async fn set_payment_status_result(
        &self,
        auth: &SharedAuthorizer,
        params: &SetPaymentStatus,
    ) -> Result<UpdateResult<ManagedProject>> {
        let project = self.set_payment_status(auth, params).await?;
        let changes = vec![format!("Payment: {}", project.payment_status)];
        Ok(UpdateResult::with_changes(project, changes))
    }

    pub async fn close_project_result(
        &self,
        auth: &SharedAuthorizer,
        params: &Id,
    ) -> Result<CloseResult> {
        self.close_project(auth, params).await.map(CloseResult::new)
    }

    pub async fn add_module_result(
        &self,
        auth: &SharedAuthorizer,
        params: &AddModule,
    ) -> Result<CreateResult<ProjectModule>> {
        self.add_module(auth, params).await.map(CreateResult::new)
    }

    /// Updates a module and lists the fields that were given.
    pub async fn update_module_result(
        &self,
        auth: &SharedAuthorizer,
        params: &UpdateModule,
    ) -> Result<UpdateResult<ProjectModule>> {
        let module = self.update_module(auth, params).await?;

        let mut changes = Vec::new();
        if params.name.is_some() {
            changes.push(format!("Name: {}", module.name));
        }
        if params.description.is_some() {
            changes.push("Description updated".to_string());
        }
        if params.deadline.is_some() {
            changes.push(format!("Deadline: {}", module.deadline));
        }
        if params.status.is_some() {
            changes.push(format!("Status: {}", module.status));
        }

        Ok(UpdateResult::with_changes(module, changes))
    }

    pub async fn remove_module_result(
        &self,
        auth: &SharedAuthorizer,
        params: &Id,
    ) -> Result<DeleteResult<ProjectModule>> {
        self.remove_module(auth, params).await.map(DeleteResult::new)
    }
}

fn status_changed(project: ManagedProject) -> UpdateResult<ManagedProject> {
    let changes = vec![format!("Status: {}", project.status)];
    UpdateResult::with_changes(project, changes)
}
