//! MCP server for Keystone
//!
//! Exposes every lifecycle operation as an MCP tool on stdio. All calls run
//! as the session the server was started with, so the role given on the
//! command line decides which tools succeed.

use std::future::Future;

use anyhow::Result;
use keystone_core::{LifecycleManager, SharedAuthorizer};
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::{
    AddModule, BudgetDecision, CreateProject, DeleteProject, Id, ListProjects, McpResult,
    SetPaymentStatus, SetStatus, UpdateModule,
};

use handlers::McpHandlers;

#[derive(Clone)]
pub struct KeystoneMcpServer {
    manager: LifecycleManager,
    auth: SharedAuthorizer,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl KeystoneMcpServer {
    pub fn new(manager: LifecycleManager, auth: SharedAuthorizer) -> Self {
        Self {
            manager,
            auth,
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> McpHandlers<'_> {
        McpHandlers::new(&self.manager, &self.auth)
    }

    #[tool(
        name = "create_project",
        description = "Create a new project. Provide a name (required), optional description, and optional initial budget amount and currency (USD when omitted). New projects start ACTIVE with payment PENDING and no approval requested."
    )]
    async fn create_project(&self, Parameters(params): Parameters<CreateProject>) -> McpResult {
        self.handlers().create_project(params).await
    }

    #[tool(
        name = "list_projects",
        description = "List projects in a dashboard queue, newest first. Queues: 'open' (default, everything not closed), 'pending_approval' (budget requests waiting on finance), 'payment_queue' (confirmed projects waiting on payment), 'completion_queue' (completed projects awaiting sign-off), 'all'."
    )]
    async fn list_projects(&self, Parameters(params): Parameters<ListProjects>) -> McpResult {
        self.handlers().list_projects(params).await
    }

    #[tool(
        name = "show_project",
        description = "Show a project with its budget, approval state, payment status and modules. Closed projects can be shown too."
    )]
    async fn show_project(&self, Parameters(params): Parameters<Id>) -> McpResult {
        self.handlers().show_project(params).await
    }

    #[tool(
        name = "delete_project",
        description = "Permanently delete a project and all of its modules. Requires confirmed=true. This cannot be undone."
    )]
    async fn delete_project(&self, Parameters(params): Parameters<DeleteProject>) -> McpResult {
        self.handlers().delete_project(params).await
    }

    #[tool(
        name = "request_budget_approval",
        description = "Send a project's budget to finance for approval. An amount, if given, is staged as the proposed budget. Withdraws any earlier approval."
    )]
    async fn request_budget_approval(
        &self,
        Parameters(params): Parameters<BudgetDecision>,
    ) -> McpResult {
        self.handlers().request_budget_approval(params).await
    }

    #[tool(
        name = "approve_budget",
        description = "Record finance approval of a project's budget and clear the pending request. An amount, if given, becomes the final budget; otherwise a staged proposal is adopted. A currency without an amount keeps the current amount. Fails without writing if a new request arrives while approving. Approving an already approved project changes nothing."
    )]
    async fn approve_budget(&self, Parameters(params): Parameters<BudgetDecision>) -> McpResult {
        self.handlers().approve_budget(params).await
    }

    #[tool(
        name = "set_status",
        description = "Write a project status directly: PENDING, ACTIVE, INACTIVE, CANCELLED or COMPLETED. Ignores the transition table, so it can also reopen a closed project. ALL_STAGES_COMPLETED and CLOSED_SUCCESSFULLY are refused; use confirm_all_stages_completed and close_project."
    )]
    async fn set_status(&self, Parameters(params): Parameters<SetStatus>) -> McpResult {
        self.handlers().set_status(params).await
    }

    #[tool(
        name = "transition_status",
        description = "Move a project along an allowed edge of the status workflow, e.g. ACTIVE to COMPLETED. Refuses moves the workflow does not allow and reports the allowed targets."
    )]
    async fn transition_status(&self, Parameters(params): Parameters<SetStatus>) -> McpResult {
        self.handlers().transition_status(params).await
    }

    #[tool(
        name = "confirm_all_stages_completed",
        description = "Confirm that every stage of a COMPLETED project is done, moving it to ALL_STAGES_COMPLETED. Required before the project can be closed."
    )]
    async fn confirm_all_stages_completed(&self, Parameters(params): Parameters<Id>) -> McpResult {
        self.handlers().confirm_all_stages_completed(params).await
    }

    #[tool(
        name = "set_payment_status",
        description = "Record a project's payment status: PENDING, RECIEVED or NOT_RECIEVED (spelled as stored)."
    )]
    async fn set_payment_status(
        &self,
        Parameters(params): Parameters<SetPaymentStatus>,
    ) -> McpResult {
        self.handlers().set_payment_status(params).await
    }

    #[tool(
        name = "close_project",
        description = "Close a project successfully. Succeeds only when status is ALL_STAGES_COMPLETED and payment is RECIEVED; otherwise reports which condition is unmet. Closing is atomic: concurrent attempts close the project exactly once."
    )]
    async fn close_project(&self, Parameters(params): Parameters<Id>) -> McpResult {
        self.handlers().close_project(params).await
    }

    #[tool(
        name = "add_module",
        description = "Append a module (deliverable) to a project. Provide project_id, name, deadline as YYYY-MM-DD, and optionally a description and status ('todo' by default)."
    )]
    async fn add_module(&self, Parameters(params): Parameters<AddModule>) -> McpResult {
        self.handlers().add_module(params).await
    }

    #[tool(
        name = "update_module",
        description = "Update a module's name, description, deadline or status ('todo', 'inprogress', 'completed'). Omitted fields stay unchanged."
    )]
    async fn update_module(&self, Parameters(params): Parameters<UpdateModule>) -> McpResult {
        self.handlers().update_module(params).await
    }

    #[tool(
        name = "remove_module",
        description = "Remove a module from its project. Later modules move up to keep the order contiguous."
    )]
    async fn remove_module(&self, Parameters(params): Parameters<Id>) -> McpResult {
        self.handlers().remove_module(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for KeystoneMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "keystone".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Keystone manages projects from budget approval through delivery and payment to closure.

## Lifecycle
- Status: PENDING, ACTIVE, INACTIVE, CANCELLED, COMPLETED, ALL_STAGES_COMPLETED, CLOSED_SUCCESSFULLY
- Payment: PENDING, RECIEVED, NOT_RECIEVED
- Budget approval: a request (`request_budget_approval`) waits on finance until `approve_budget`

## Closing a Project
1. Move the project to COMPLETED with `transition_status`
2. Confirm delivery with `confirm_all_stages_completed`
3. Record payment with `set_payment_status` (RECIEVED)
4. Close with `close_project`; it fails with the unmet condition otherwise

## Queues
Use `list_projects` with queue 'pending_approval', 'completion_queue' or 'payment_queue' to find work waiting on each role.

## Errors
Error data carries an HTTP-style `status`: 404 missing, 400 refused by the workflow, 403 not permitted for your role, 500 storage failure."#.to_string()),
        }
    }
}

/// Run the MCP server on stdio until the client disconnects or a signal
/// arrives.
pub async fn run_stdio_server(server: KeystoneMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Keystone MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use keystone_core::{AllowAll, LifecycleManagerBuilder};
    use tempfile::TempDir;

    use super::*;

    async fn create_server() -> (TempDir, KeystoneMcpServer) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager = LifecycleManagerBuilder::new()
            .with_database_path(Some(temp_dir.path().join("mcp.db")))
            .build()
            .await
            .expect("Failed to create manager");
        (temp_dir, KeystoneMcpServer::new(manager, Arc::new(AllowAll)))
    }

    #[tokio::test]
    async fn test_every_operation_is_a_tool() {
        let (_temp_dir, server) = create_server().await;
        let names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();

        for expected in [
            "create_project",
            "list_projects",
            "show_project",
            "delete_project",
            "request_budget_approval",
            "approve_budget",
            "set_status",
            "transition_status",
            "confirm_all_stages_completed",
            "set_payment_status",
            "close_project",
            "add_module",
            "update_module",
            "remove_module",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing tool {expected}");
        }
    }

    #[tokio::test]
    async fn test_server_info() {
        let (_temp_dir, server) = create_server().await;
        let info = server.get_info();
        assert_eq!(info.server_info.name, "keystone");
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.prompts.is_none());
    }

    #[tokio::test]
    async fn test_close_refusal_is_invalid_params() {
        let (_temp_dir, server) = create_server().await;
        let params: CreateProject =
            serde_json::from_value(serde_json::json!({"name": "Kiosk"})).unwrap();
        server.handlers().create_project(params).await.unwrap();

        let id: Id = serde_json::from_value(serde_json::json!({"id": 1})).unwrap();
        let err = server.handlers().close_project(id).await.unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("completion not confirmed"));

        let missing: Id = serde_json::from_value(serde_json::json!({"id": 42})).unwrap();
        let err = server.handlers().show_project(missing).await.unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::RESOURCE_NOT_FOUND);
    }
}
