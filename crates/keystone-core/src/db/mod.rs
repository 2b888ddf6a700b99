//! SQLite implementation of the project store.
//!
//! This module owns the on-disk representation of managed projects and
//! their modules. The schema is embedded from `assets/schema.sql`; every
//! mutation runs inside a transaction so a guarded update is checked and
//! written in one step.

use std::path::Path;

use rusqlite::Connection;

use crate::{
    error::{Result, StoreResultExt},
    models::{
        Budget, ManagedProject, NewModule, ProjectFilter, ProjectModule, ProjectUpdate,
        UpdateGuard, UpdateModuleRequest,
    },
    store::ProjectStore,
};

pub mod migrations;
pub mod module_queries;
pub mod project_queries;
mod rows;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database file and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).store_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

impl ProjectStore for Database {
    fn insert_project(
        &mut self,
        name: &str,
        description: Option<&str>,
        budget: &Budget,
    ) -> Result<ManagedProject> {
        self.create_project(name, description, budget)
    }

    fn find_project(&self, id: u64) -> Result<Option<ManagedProject>> {
        self.get_project(id)
    }

    fn find_projects(&self, filter: &ProjectFilter) -> Result<Vec<ManagedProject>> {
        self.list_projects(filter)
    }

    fn update_project(
        &mut self,
        id: u64,
        update: &ProjectUpdate,
        guard: &UpdateGuard,
    ) -> Result<Option<ManagedProject>> {
        self.apply_project_update(id, update, guard)
    }

    fn delete_project(&mut self, id: u64) -> Result<Option<ManagedProject>> {
        self.remove_project(id)
    }

    fn insert_module(&mut self, module: &NewModule) -> Result<ProjectModule> {
        self.add_module(module)
    }

    fn update_module(
        &mut self,
        id: u64,
        request: &UpdateModuleRequest,
    ) -> Result<Option<ProjectModule>> {
        self.modify_module(id, request)
    }

    fn delete_module(&mut self, id: u64) -> Result<Option<ProjectModule>> {
        self.remove_module(id)
    }
}
