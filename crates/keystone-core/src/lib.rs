//! Core library for the Keystone project lifecycle manager.
//!
//! Keystone tracks managed projects through budget approval, delivery and
//! payment, and refuses any change that would break the workflow's rules:
//! a project only closes once completion is confirmed and payment has
//! arrived, and finance approval always clears the pending request.
//!
//! # Layers
//!
//! - [`models`]: projects, modules, statuses, filters and allow-listed writes
//! - [`store`]: the [`ProjectStore`] contract and an in-memory store
//! - [`db`]: the SQLite store
//! - [`lifecycle`]: the synchronous state machine, [`Lifecycle`]
//! - [`manager`]: the async facade, [`LifecycleManager`]
//! - [`auth`]: the [`Authorize`] policy passed into every operation
//! - [`display`]: Markdown rendering of models and operation results
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use keystone_core::{
//!     auth::{AllowAll, SharedAuthorizer},
//!     params::{CreateProject, ListProjects},
//!     LifecycleManagerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = LifecycleManagerBuilder::new()
//!     .with_database_path(Some("keystone.db"))
//!     .build()
//!     .await?;
//! let auth: SharedAuthorizer = Arc::new(AllowAll);
//!
//! let project = manager
//!     .create_project(&auth, &CreateProject {
//!         name: "Website relaunch".to_string(),
//!         budget_amount: Some(5000.0),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{project}");
//!
//! let open = manager.list_project_summaries(&auth, &ListProjects::default()).await?;
//! print!("{open}");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod db;
pub mod display;
pub mod error;
pub mod lifecycle;
pub mod manager;
pub mod models;
pub mod params;
pub mod store;

pub use auth::{Action, Actor, AllowAll, Authorize, RolePolicy, Session, SharedAuthorizer};
pub use db::Database;
pub use display::{
    CloseResult, CreateResult, DeleteResult, ProjectSummaries, UpdateResult,
};
pub use error::{ErrorKind, LifecycleError, Result};
pub use lifecycle::Lifecycle;
pub use manager::{LifecycleManager, LifecycleManagerBuilder};
pub use models::{
    ActionableFilter, Budget, ManagedProject, ModuleStatus, PaymentStatus, ProjectModule,
    ProjectStatus, ProjectSummary,
};
pub use store::{MemoryStore, ProjectStore};
