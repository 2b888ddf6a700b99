//! The project lifecycle state machine.
//!
//! [`Lifecycle`] mediates every change to a project's status, approval
//! flags and payment state. It runs synchronously against any
//! [`ProjectStore`] and checks each request with the [`Authorize`]
//! implementation it was built with before touching the store.
//!
//! ```text
//! PENDING ⇄ ACTIVE ⇄ COMPLETED ──confirm──▶ ALL_STAGES_COMPLETED ──close──▶ CLOSED_SUCCESSFULLY
//!              │
//!              ├──▶ INACTIVE
//!              └──▶ CANCELLED ──▶ PENDING
//! ```
//!
//! `confirm` and `close` are only taken by their dedicated operations. The
//! other edges are reachable through [`Lifecycle::transition_status`],
//! checked against
//! [`ProjectStatus::allowed_targets`](crate::models::ProjectStatus::allowed_targets),
//! or through [`Lifecycle::set_status`], which only checks the value.
//!
//! # Examples
//!
//! ```rust
//! use keystone_core::{auth::AllowAll, store::MemoryStore, Lifecycle};
//! use keystone_core::models::{PaymentStatus, ProjectStatus};
//!
//! let mut store = MemoryStore::new();
//! let mut lifecycle = Lifecycle::new(&mut store, &AllowAll);
//!
//! let project = lifecycle.create_project("Website relaunch", None, None)?;
//! lifecycle.set_status(project.id, "COMPLETED")?;
//! lifecycle.confirm_all_stages_completed(project.id)?;
//! lifecycle.set_payment_status(project.id, "RECIEVED")?;
//!
//! let closed = lifecycle.close_project(project.id)?;
//! assert_eq!(closed.status, ProjectStatus::ClosedSuccessfully);
//! assert_eq!(closed.payment_status, PaymentStatus::Recieved);
//! # Ok::<(), keystone_core::LifecycleError>(())
//! ```

use crate::{
    auth::{Action, Authorize},
    error::{LifecycleError, Result},
    models::ManagedProject,
    store::ProjectStore,
};

mod records;
mod workflow;


/// Lifecycle operations over a borrowed store.
pub struct Lifecycle<'a, S: ProjectStore + ?Sized> {
    store: &'a mut S,
    auth: &'a dyn Authorize,
}

impl<'a, S: ProjectStore + ?Sized> Lifecycle<'a, S> {
    /// Binds the state machine to a store and an authorizer.
    pub fn new(store: &'a mut S, auth: &'a dyn Authorize) -> Self {
        Self { store, auth }
    }

    fn authorize(&self, action: Action) -> Result<()> {
        self.auth.authorize(action)
    }

    /// Loads a project or fails with [`LifecycleError::ProjectNotFound`].
    fn require_project(&self, id: u64) -> Result<ManagedProject> {
        self.store
            .find_project(id)?
            .ok_or(LifecycleError::ProjectNotFound { id })
    }
}
