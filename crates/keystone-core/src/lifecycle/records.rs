//! Project and module records around the workflow.

use super::Lifecycle;
use crate::{
    auth::Action,
    error::{LifecycleError, Result},
    models::{Budget, ManagedProject, NewModule, ProjectModule, UpdateModuleRequest},
    store::ProjectStore,
};

impl<S: ProjectStore + ?Sized> Lifecycle<'_, S> {
    /// Creates a project in its initial state: `ACTIVE`, nothing requested
    /// or approved, payment `PENDING`.
    pub fn create_project(
        &mut self,
        name: &str,
        description: Option<&str>,
        budget: Option<Budget>,
    ) -> Result<ManagedProject> {
        self.authorize(Action::CreateProject)?;

        let name = require_name(name)?;
        let budget = budget.unwrap_or_default();
        budget.validate()?;

        let project = self.store.insert_project(name, description, &budget)?;
        log::info!("project {}: created '{}'", project.id, project.name);
        Ok(project)
    }

    /// Retrieves a project with its modules, closed ones included.
    pub fn get_project(&self, id: u64) -> Result<ManagedProject> {
        self.authorize(Action::ViewProjects)?;
        log::debug!("loading project {id}");
        self.require_project(id)
    }

    /// Permanently deletes a project and its modules.
    ///
    /// Administrative and unguarded by lifecycle state; `confirmed` must be
    /// set.
    pub fn delete_project(&mut self, id: u64, confirmed: bool) -> Result<ManagedProject> {
        self.authorize(Action::DeleteProject)?;
        if !confirmed {
            return Err(LifecycleError::invalid_input("confirmed")
                .with_reason(format!("deleting project {id} cannot be undone and must be confirmed")));
        }

        let project = self
            .store
            .delete_project(id)?
            .ok_or(LifecycleError::ProjectNotFound { id })?;

        log::info!(
            "project {id}: deleted with {} module(s)",
            project.modules.len()
        );
        Ok(project)
    }

    /// Appends a module to a project.
    pub fn add_module(&mut self, module: NewModule) -> Result<ProjectModule> {
        self.authorize(Action::ManageModules)?;
        let name = require_name(&module.name)?.to_string();

        let module = self.store.insert_module(&NewModule { name, ..module })?;
        log::info!(
            "project {}: added module {} at position {}",
            module.project_id,
            module.id,
            module.order
        );
        Ok(module)
    }

    /// Updates the given fields of a module.
    pub fn update_module(
        &mut self,
        id: u64,
        request: &UpdateModuleRequest,
    ) -> Result<ProjectModule> {
        self.authorize(Action::ManageModules)?;
        if let Some(name) = &request.name {
            require_name(name)?;
        }

        let module = self
            .store
            .update_module(id, request)?
            .ok_or(LifecycleError::ModuleNotFound { id })?;

        log::info!("module {id}: updated");
        Ok(module)
    }

    /// Removes a module; later modules move up one position.
    pub fn remove_module(&mut self, id: u64) -> Result<ProjectModule> {
        self.authorize(Action::ManageModules)?;

        let module = self
            .store
            .delete_module(id)?
            .ok_or(LifecycleError::ModuleNotFound { id })?;

        log::info!("project {}: removed module {id}", module.project_id);
        Ok(module)
    }
}

fn require_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LifecycleError::invalid_input("name").with_reason("must not be empty"));
    }
    Ok(trimmed)
}
