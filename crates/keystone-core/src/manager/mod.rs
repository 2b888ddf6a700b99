//! Async facade over the lifecycle state machine.
//!
//! [`LifecycleManager`] owns nothing but a database path. Every call opens
//! a connection on a blocking worker, runs one [`Lifecycle`] operation and
//! returns the post-mutation snapshot. Each call takes the caller's
//! [`SharedAuthorizer`]:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use keystone_core::{
//!     auth::{Actor, RolePolicy, Session, SharedAuthorizer},
//!     params::{CreateProject, Id},
//!     LifecycleManagerBuilder,
//! };
//!
//! # async fn example() -> keystone_core::Result<()> {
//! let manager = LifecycleManagerBuilder::new()
//!     .with_database_path(Some("/tmp/keystone.db"))
//!     .build()
//!     .await?;
//!
//! let pm: SharedAuthorizer = Arc::new(Session::new(
//!     Actor::new("priya", "PROJECT_MANAGER"),
//!     RolePolicy::default(),
//! ));
//!
//! let project = manager
//!     .create_project(&pm, &CreateProject {
//!         name: "Website relaunch".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! // Project managers cannot close projects.
//! assert!(manager.close_project(&pm, &Id { id: project.id }).await.is_err());
//! # Ok(())
//! # }
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: configuration and schema initialization
//! - [`project_ops`]: project records and listings
//! - [`workflow_ops`]: approval, status, payment and closing
//! - [`module_ops`]: module CRUD
//! - [`handlers`]: operations returning display wrappers

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::task;

use crate::{
    auth::SharedAuthorizer,
    db::Database,
    error::{Result, ResultExt},
    lifecycle::Lifecycle,
};

pub mod builder;
pub mod handlers;
pub mod module_ops;
pub mod project_ops;
pub mod workflow_ops;

#[cfg(test)]
mod tests;

pub use builder::LifecycleManagerBuilder;

/// Async entry point to the lifecycle operations.
#[derive(Debug, Clone)]
pub struct LifecycleManager {
    db_path: PathBuf,
}

impl LifecycleManager {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// The SQLite file this manager works on.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `op` against a fresh connection on the blocking pool.
    async fn run<T, F>(&self, auth: &SharedAuthorizer, op: F) -> Result<T>
    where
        F: FnOnce(&mut Lifecycle<'_, Database>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        let auth = Arc::clone(auth);

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let mut lifecycle = Lifecycle::new(&mut db, &*auth);
            op(&mut lifecycle)
        })
        .await
        .with_context("Task join error")?
    }
}
