//! In-process [`ProjectStore`] backed by ordered maps.

use std::collections::BTreeMap;

use jiff::Timestamp;

use super::ProjectStore;
use crate::{
    error::{LifecycleError, Result},
    models::{
        Budget, ManagedProject, NewModule, PaymentStatus, ProjectFilter, ProjectModule,
        ProjectStatus, ProjectUpdate, UpdateGuard, UpdateModuleRequest,
    },
};

/// A store that keeps everything in memory.
///
/// Each method runs to completion under `&mut self`, which gives guarded
/// updates the same atomicity the SQLite store gets from transactions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: BTreeMap<u64, ManagedProject>,
    next_project_id: u64,
    next_module_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn project_with_module_mut(&mut self, module_id: u64) -> Option<&mut ManagedProject> {
        self.projects
            .values_mut()
            .find(|p| p.modules.iter().any(|m| m.id == module_id))
    }
}

impl ProjectStore for MemoryStore {
    fn insert_project(
        &mut self,
        name: &str,
        description: Option<&str>,
        budget: &Budget,
    ) -> Result<ManagedProject> {
        self.next_project_id += 1;
        let now = Timestamp::now();
        let project = ManagedProject {
            id: self.next_project_id,
            name: name.to_string(),
            description: description.map(String::from),
            budget: budget.clone(),
            proposed_budget: None,
            status: ProjectStatus::Active,
            send_for_approval: false,
            approved_by_finance: false,
            payment_status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
            modules: Vec::new(),
        };
        self.projects.insert(project.id, project.clone());
        Ok(project)
    }

    fn find_project(&self, id: u64) -> Result<Option<ManagedProject>> {
        Ok(self.projects.get(&id).cloned())
    }

    fn find_projects(&self, filter: &ProjectFilter) -> Result<Vec<ManagedProject>> {
        // Ids grow with creation time, so reverse id order is newest first.
        Ok(self
            .projects
            .values()
            .rev()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    fn update_project(
        &mut self,
        id: u64,
        update: &ProjectUpdate,
        guard: &UpdateGuard,
    ) -> Result<Option<ManagedProject>> {
        match self.projects.get_mut(&id) {
            Some(project) if guard.matches(project) => {
                update.apply_to(project, Timestamp::now());
                Ok(Some(project.clone()))
            }
            _ => Ok(None),
        }
    }

    fn delete_project(&mut self, id: u64) -> Result<Option<ManagedProject>> {
        Ok(self.projects.remove(&id))
    }

    fn insert_module(&mut self, module: &NewModule) -> Result<ProjectModule> {
        let Some(project) = self.projects.get_mut(&module.project_id) else {
            return Err(LifecycleError::ProjectNotFound {
                id: module.project_id,
            });
        };
        self.next_module_id += 1;
        let id = self.next_module_id;
        let now = Timestamp::now();
        let created = ProjectModule {
            id,
            project_id: module.project_id,
            name: module.name.clone(),
            description: module.description.clone(),
            deadline: module.deadline,
            status: module.status,
            order: project.modules.len() as u32,
            created_at: now,
            updated_at: now,
        };
        project.modules.push(created.clone());
        project.updated_at = now;
        Ok(created)
    }

    fn update_module(
        &mut self,
        id: u64,
        request: &UpdateModuleRequest,
    ) -> Result<Option<ProjectModule>> {
        let Some(project) = self.project_with_module_mut(id) else {
            return Ok(None);
        };
        let now = Timestamp::now();
        project.updated_at = now;
        Ok(project
            .modules
            .iter_mut()
            .find(|m| m.id == id)
            .map(|module| {
                request.apply_to(module, now);
                module.clone()
            }))
    }

    fn delete_module(&mut self, id: u64) -> Result<Option<ProjectModule>> {
        let Some(project) = self.project_with_module_mut(id) else {
            return Ok(None);
        };
        let Some(index) = project.modules.iter().position(|m| m.id == id) else {
            return Ok(None);
        };
        let removed = project.modules.remove(index);
        for (order, module) in project.modules.iter_mut().enumerate() {
            module.order = order as u32;
        }
        project.updated_at = Timestamp::now();
        Ok(Some(removed))
    }
}
