//! Module operations for the LifecycleManager.

use super::LifecycleManager;
use crate::{
    auth::SharedAuthorizer,
    error::Result,
    models::ProjectModule,
    params::{AddModule, Id, UpdateModule},
};

impl LifecycleManager {
    /// Appends a module to a project.
    ///
    /// The deadline and status are parsed before the store is opened.
    pub async fn add_module(
        &self,
        auth: &SharedAuthorizer,
        params: &AddModule,
    ) -> Result<ProjectModule> {
        let module = params.validate()?;
        self.run(auth, move |lifecycle| lifecycle.add_module(module))
            .await
    }

    /// Updates the given fields of a module.
    pub async fn update_module(
        &self,
        auth: &SharedAuthorizer,
        params: &UpdateModule,
    ) -> Result<ProjectModule> {
        let id = params.id;
        let request = params.validate()?;
        self.run(auth, move |lifecycle| lifecycle.update_module(id, &request))
            .await
    }

    /// Removes a module; later modules move up one position.
    pub async fn remove_module(&self, auth: &SharedAuthorizer, params: &Id) -> Result<ProjectModule> {
        let id = params.id;
        self.run(auth, move |lifecycle| lifecycle.remove_module(id))
            .await
    }
}
