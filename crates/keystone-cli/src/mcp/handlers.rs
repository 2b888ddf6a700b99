//! MCP tool handlers.

use keystone_core::{
    models::ActionableFilter, params as core, LifecycleManager, SharedAuthorizer,
};
use log::debug;
use rmcp::{
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::errors::to_mcp_error;

/// Transparent wrapper giving core parameter types their MCP schema.
///
/// Core params derive `JsonSchema` behind the `schema` feature; this keeps
/// the tool signatures independent of how the core is built.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreateProject = McpParams<core::CreateProject>;
pub type ListProjects = McpParams<core::ListProjects>;
pub type DeleteProject = McpParams<core::DeleteProject>;
pub type BudgetDecision = McpParams<core::BudgetDecision>;
pub type SetStatus = McpParams<core::SetStatus>;
pub type SetPaymentStatus = McpParams<core::SetPaymentStatus>;
pub type AddModule = McpParams<core::AddModule>;
pub type UpdateModule = McpParams<core::UpdateModule>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(output: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(
        output.to_string(),
    )]))
}

/// Runs tool calls against the manager as the server's session.
pub struct McpHandlers<'a> {
    manager: &'a LifecycleManager,
    auth: &'a SharedAuthorizer,
}

impl<'a> McpHandlers<'a> {
    pub fn new(manager: &'a LifecycleManager, auth: &'a SharedAuthorizer) -> Self {
        Self { manager, auth }
    }

    pub async fn create_project(&self, params: CreateProject) -> McpResult {
        debug!("create_project: {params:?}");
        let result = self
            .manager
            .create_project_result(self.auth, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create project", &e))?;
        text(result)
    }

    pub async fn list_projects(&self, params: ListProjects) -> McpResult {
        debug!("list_projects: {params:?}");
        let queue: ActionableFilter = params.as_ref().queue;
        let summaries = self
            .manager
            .list_project_summaries(self.auth, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list projects", &e))?;
        text(format!("# {}\n\n{summaries}", queue.title()))
    }

    pub async fn show_project(&self, params: Id) -> McpResult {
        debug!("show_project: {params:?}");
        let project = self
            .manager
            .get_project(self.auth, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get project", &e))?;
        text(project)
    }

    pub async fn delete_project(&self, params: DeleteProject) -> McpResult {
        debug!("delete_project: {params:?}");
        let result = self
            .manager
            .delete_project_result(self.auth, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete project", &e))?;
        text(result)
    }

    pub async fn request_budget_approval(&self, params: BudgetDecision) -> McpResult {
        debug!("request_budget_approval: {params:?}");
        let result = self
            .manager
            .request_budget_approval_result(self.auth, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to request budget approval", &e))?;
        text(result)
    }

    pub async fn approve_budget(&self, params: BudgetDecision) -> McpResult {
        debug!("approve_budget: {params:?}");
        let result = self
            .manager
            .approve_budget_result(self.auth, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to approve budget", &e))?;
        text(result)
    }

    pub async fn set_status(&self, params: SetStatus) -> McpResult {
        debug!("set_status: {params:?}");
        let result = self
            .manager
            .set_status_result(self.auth, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to set status", &e))?;
        text(result)
    }

    pub async fn transition_status(&self, params: SetStatus) -> McpResult {
        debug!("transition_status: {params:?}");
        let result = self
            .manager
            .transition_status_result(self.auth, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to change status", &e))?;
        text(result)
    }

    pub async fn confirm_all_stages_completed(&self, params: Id) -> McpResult {
        debug!("confirm_all_stages_completed: {params:?}");
        let result = self
            .manager
            .confirm_all_stages_completed_result(self.auth, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to confirm completion", &e))?;
        text(result)
    }

    pub async fn set_payment_status(&self, params: SetPaymentStatus) -> McpResult {
        debug!("set_payment_status: {params:?}");
        let result = self
            .manager
            .set_payment_status_result(self.auth, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to set payment status", &e))?;
        text(result)
    }

    pub async fn close_project(&self, params: Id) -> McpResult {
        debug!("close_project: {params:?}");
        let result = self
            .manager
            .close_project_result(self.auth, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to close project", &e))?;
        text(result)
    }

    pub async fn add_module(&self, params: AddModule) -> McpResult {
        debug!("add_module: {params:?}");
        let result = self
            .manager
            .add_module_result(self.auth, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add module", &e))?;
        text(result)
    }

    pub async fn update_module(&self, params: UpdateModule) -> McpResult {
        debug!("update_module: {params:?}");
        let result = self
            .manager
            .update_module_result(self.auth, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update module", &e))?;
        text(result)
    }

    pub async fn remove_module(&self, params: Id) -> McpResult {
        debug!("remove_module: {params:?}");
        let result = self
            .manager
            .remove_module_result(self.auth, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to remove module", &e))?;
        text(result)
    }
}
