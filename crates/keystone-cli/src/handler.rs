//! Dispatches parsed commands to the lifecycle manager and renders results.

use anyhow::{Context, Result};
use keystone_core::{
    models::ActionableFilter,
    params::{Id, ListProjects},
    LifecycleManager, SharedAuthorizer,
};
use log::debug;

use crate::{
    cli::{ModuleCommands, ProjectCommands},
    renderer::TerminalRenderer,
};

pub struct CommandHandler {
    manager: LifecycleManager,
    auth: SharedAuthorizer,
    renderer: TerminalRenderer,
}

impl CommandHandler {
    pub fn new(
        manager: LifecycleManager,
        auth: SharedAuthorizer,
        renderer: TerminalRenderer,
    ) -> Self {
        Self {
            manager,
            auth,
            renderer,
        }
    }

    /// Shows a queue of projects under its heading.
    pub async fn list_queue(&self, queue: ActionableFilter) -> Result<()> {
        debug!("listing queue {queue}");
        let summaries = self
            .manager
            .list_project_summaries(&self.auth, &ListProjects { queue })
            .await
            .context("Failed to list projects")?;
        self.renderer
            .render_section(queue.title(), &summaries.to_string());
        Ok(())
    }

    pub async fn handle_project_command(&self, command: ProjectCommands) -> Result<()> {
        let (manager, auth) = (&self.manager, &self.auth);

        let output = match command {
            ProjectCommands::Create(args) => manager
                .create_project_result(auth, &args.into())
                .await
                .context("Failed to create project")?
                .to_string(),
            ProjectCommands::List(args) => {
                let params: ListProjects = args.into();
                return self.list_queue(params.queue).await;
            }
            ProjectCommands::Show(args) => manager
                .get_project(auth, &Id::from(args))
                .await
                .context("Failed to show project")?
                .to_string(),
            ProjectCommands::Delete(args) => manager
                .delete_project_result(auth, &args.into())
                .await
                .context("Failed to delete project")?
                .to_string(),
            ProjectCommands::RequestApproval(args) => manager
                .request_budget_approval_result(auth, &args.into())
                .await
                .context("Failed to request budget approval")?
                .to_string(),
            ProjectCommands::Approve(args) => manager
                .approve_budget_result(auth, &args.into())
                .await
                .context("Failed to approve budget")?
                .to_string(),
            ProjectCommands::SetStatus(args) => manager
                .set_status_result(auth, &args.into())
                .await
                .context("Failed to set status")?
                .to_string(),
            ProjectCommands::Transition(args) => manager
                .transition_status_result(auth, &args.into())
                .await
                .context("Failed to change status")?
                .to_string(),
            ProjectCommands::ConfirmStages(args) => manager
                .confirm_all_stages_completed_result(auth, &args.into())
                .await
                .context("Failed to confirm completion")?
                .to_string(),
            ProjectCommands::SetPayment(args) => manager
                .set_payment_status_result(auth, &args.into())
                .await
                .context("Failed to set payment status")?
                .to_string(),
            ProjectCommands::Close(args) => manager
                .close_project_result(auth, &args.into())
                .await
                .context("Failed to close project")?
                .to_string(),
        };

        self.renderer.render(&output);
        Ok(())
    }

    pub async fn handle_module_command(&self, command: ModuleCommands) -> Result<()> {
        let (manager, auth) = (&self.manager, &self.auth);

        let output = match command {
            ModuleCommands::Add(args) => manager
                .add_module_result(auth, &args.into())
                .await
                .context("Failed to add module")?
                .to_string(),
            ModuleCommands::Update(args) => manager
                .update_module_result(auth, &args.into())
                .await
                .context("Failed to update module")?
                .to_string(),
            ModuleCommands::Remove(args) => manager
                .remove_module_result(auth, &args.into())
                .await
                .context("Failed to remove module")?
                .to_string(),
        };

        self.renderer.render(&output);
        Ok(())
    }
}
