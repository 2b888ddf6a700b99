//! The persistence contract the lifecycle state machine runs against.
//!
//! A [`ProjectStore`] answers find-by-id with `Ok(None)` instead of an error
//! and applies workflow changes only through the allow-listed
//! [`ProjectUpdate`], optionally guarded by an [`UpdateGuard`] that the
//! store evaluates in the same atomic step as the write.
//!
//! Two implementations ship with the crate:
//!
//! - [`crate::db::Database`]: SQLite on disk
//! - [`MemoryStore`]: in-process, for embedding and tests

use crate::{
    error::Result,
    models::{
        Budget, ManagedProject, NewModule, ProjectFilter, ProjectModule, ProjectUpdate,
        UpdateGuard, UpdateModuleRequest,
    },
};

pub mod memory;

pub use memory::MemoryStore;

/// Storage operations over the managed-project collection.
pub trait ProjectStore {
    /// Inserts a project in its initial lifecycle state.
    fn insert_project(
        &mut self,
        name: &str,
        description: Option<&str>,
        budget: &Budget,
    ) -> Result<ManagedProject>;

    /// Loads a project with its modules, `None` when absent.
    fn find_project(&self, id: u64) -> Result<Option<ManagedProject>>;

    /// Loads every project matching `filter`, newest first.
    fn find_projects(&self, filter: &ProjectFilter) -> Result<Vec<ManagedProject>>;

    /// Applies `update` if the project exists and satisfies `guard`, bumping
    /// `updated_at`. Returns the post-write snapshot, or `None` when nothing
    /// was written.
    fn update_project(
        &mut self,
        id: u64,
        update: &ProjectUpdate,
        guard: &UpdateGuard,
    ) -> Result<Option<ManagedProject>>;

    /// Removes a project and its modules, returning the removed snapshot.
    fn delete_project(&mut self, id: u64) -> Result<Option<ManagedProject>>;

    /// Appends a module to its project.
    fn insert_module(&mut self, module: &NewModule) -> Result<ProjectModule>;

    /// Updates a module, returning `None` when it does not exist.
    fn update_module(
        &mut self,
        id: u64,
        request: &UpdateModuleRequest,
    ) -> Result<Option<ProjectModule>>;

    /// Removes a module and closes the gap in its project's ordering.
    fn delete_module(&mut self, id: u64) -> Result<Option<ProjectModule>>;
}
