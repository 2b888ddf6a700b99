//! Markdown display for projects, modules and operation outcomes.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]).
//! The wrappers here add context: a heading for a list, a confirmation line
//! for a create or delete, the changes an update made.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Markdown      │
//! │ (Project, Module│───▶│ Result Types    │───▶│ (Terminal/MCP)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust
//! use keystone_core::display::{CloseResult, UpdateResult};
//! use keystone_core::models::{Budget, ManagedProject, PaymentStatus, ProjectStatus};
//! use jiff::Timestamp;
//!
//! let project = ManagedProject {
//!     id: 4,
//!     name: "Data migration".to_string(),
//!     description: None,
//!     budget: Budget::new(Some(800.0), None),
//!     proposed_budget: None,
//!     status: ProjectStatus::ClosedSuccessfully,
//!     send_for_approval: false,
//!     approved_by_finance: true,
//!     payment_status: PaymentStatus::Recieved,
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//!     modules: vec![],
//! };
//!
//! let result = UpdateResult::with_changes(project.clone(), vec!["Payment: RECIEVED".to_string()]);
//! assert!(result.to_string().contains("- Payment: RECIEVED"));
//!
//! let closed = CloseResult::new(project);
//! assert_eq!(
//!     closed.to_string(),
//!     "Success: Project 'Data migration' (ID: 4) closed successfully\n"
//! );
//! ```

pub mod collections;
pub mod models;
pub mod results;

pub use collections::ProjectSummaries;
pub use results::{CloseResult, CreateResult, DeleteResult, UpdateResult};
