//! Project record operations for the LifecycleManager.

use super::LifecycleManager;
use crate::{
    auth::SharedAuthorizer,
    error::Result,
    models::ManagedProject,
    params::{CreateProject, DeleteProject, Id, ListProjects},
};

impl LifecycleManager {
    /// Creates a project in its initial lifecycle state.
    pub async fn create_project(
        &self,
        auth: &SharedAuthorizer,
        params: &CreateProject,
    ) -> Result<ManagedProject> {
        let name = params.name.clone();
        let description = params.description.clone();
        let budget = params.budget();

        self.run(auth, move |lifecycle| {
            lifecycle.create_project(&name, description.as_deref(), budget)
        })
        .await
    }

    /// Retrieves a project with its modules. Closed projects included.
    pub async fn get_project(&self, auth: &SharedAuthorizer, params: &Id) -> Result<ManagedProject> {
        let id = params.id;
        self.run(auth, move |lifecycle| lifecycle.get_project(id))
            .await
    }

    /// Lists the projects in a dashboard queue, newest first.
    pub async fn list_projects(
        &self,
        auth: &SharedAuthorizer,
        params: &ListProjects,
    ) -> Result<Vec<ManagedProject>> {
        let queue = params.queue;
        self.run(auth, move |lifecycle| lifecycle.list_actionable(queue))
            .await
    }

    /// Permanently deletes a project and its modules.
    pub async fn delete_project(
        &self,
        auth: &SharedAuthorizer,
        params: &DeleteProject,
    ) -> Result<ManagedProject> {
        let id = params.id;
        let confirmed = params.confirmed;
        self.run(auth, move |lifecycle| lifecycle.delete_project(id, confirmed))
            .await
    }
}
