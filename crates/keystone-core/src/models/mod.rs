//! Data models for managed projects and their modules.
//!
//! This module contains the domain types of the lifecycle manager:
//!
//! - [`ManagedProject`] with its [`Budget`], [`ProjectStatus`] and
//!   [`PaymentStatus`]
//! - [`ProjectModule`] deliverables and their [`ModuleStatus`]
//! - [`ProjectSummary`] for list views
//! - Query types ([`ActionableFilter`], [`ProjectFilter`])
//! - Allow-listed writes ([`ProjectUpdate`], [`UpdateGuard`],
//!   [`UpdateModuleRequest`], [`NewModule`])
//!
//! Display implementations live in [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use keystone_core::models::{Budget, ManagedProject, PaymentStatus, ProjectStatus};
//! use jiff::Timestamp;
//!
//! let project = ManagedProject {
//!     id: 1,
//!     name: "Website relaunch".to_string(),
//!     description: None,
//!     budget: Budget::new(Some(5000.0), None),
//!     proposed_budget: None,
//!     status: ProjectStatus::AllStagesCompleted,
//!     send_for_approval: false,
//!     approved_by_finance: true,
//!     payment_status: PaymentStatus::Recieved,
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//!     modules: vec![],
//! };
//! assert!(project.ready_to_close());
//! ```

pub mod budget;
pub mod filters;
pub mod module;
pub mod project;
pub mod requests;
pub mod status;
pub mod summary;

#[cfg(test)]
mod tests;

pub use budget::{Budget, DEFAULT_CURRENCY};
pub use filters::{ActionableFilter, ProjectFilter};
pub use module::ProjectModule;
pub use project::ManagedProject;
pub use requests::{NewModule, ProjectUpdate, UpdateGuard, UpdateModuleRequest};
pub use status::{ModuleStatus, PaymentStatus, ProjectStatus};
pub use summary::ProjectSummary;
