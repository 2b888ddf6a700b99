//! Authorization policy passed into every lifecycle operation.
//!
//! Operations never consult ambient role state. Each call receives an
//! [`Authorize`] implementation that decides whether the requested
//! [`Action`] may proceed:
//!
//! - [`Session`] pairs an [`Actor`] with a [`RolePolicy`]
//! - [`AllowAll`] is for trusted in-process callers and tests
//!
//! # Examples
//!
//! ```rust
//! use keystone_core::auth::{Action, Actor, Authorize, RolePolicy, Session};
//!
//! let finance = Session::new(Actor::new("dana", "FINANCE"), RolePolicy::default());
//! assert!(finance.authorize(Action::ApproveBudget).is_ok());
//! assert!(finance.authorize(Action::ConfirmAllStagesCompleted).is_err());
//!
//! let ceo = Session::new(Actor::new("sam", "CEO"), RolePolicy::default());
//! assert!(ceo.authorize(Action::DeleteProject).is_ok());
//! ```

use std::{
    collections::{HashMap, HashSet},
    fmt,
    str::FromStr,
    sync::Arc,
};

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{LifecycleError, Result};

/// Every operation that can be authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ViewProjects,
    CreateProject,
    DeleteProject,
    RequestBudgetApproval,
    ApproveBudget,
    SetStatus,
    TransitionStatus,
    ConfirmAllStagesCompleted,
    SetPaymentStatus,
    CloseProject,
    ManageModules,
}

impl Action {
    pub const ALL: [Action; 11] = [
        Action::ViewProjects,
        Action::CreateProject,
        Action::DeleteProject,
        Action::RequestBudgetApproval,
        Action::ApproveBudget,
        Action::SetStatus,
        Action::TransitionStatus,
        Action::ConfirmAllStagesCompleted,
        Action::SetPaymentStatus,
        Action::CloseProject,
        Action::ManageModules,
    ];

    /// Permission string granting this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ViewProjects => "project:view",
            Action::CreateProject => "project:create",
            Action::DeleteProject => "project:delete",
            Action::RequestBudgetApproval => "budget:request",
            Action::ApproveBudget => "budget:approve",
            Action::SetStatus => "status:set",
            Action::TransitionStatus => "status:transition",
            Action::ConfirmAllStagesCompleted => "status:confirm_stages",
            Action::SetPaymentStatus => "payment:set",
            Action::CloseProject => "project:close",
            Action::ManageModules => "module:manage",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown permission: {s}"))
    }
}

/// Decides whether an action may proceed.
pub trait Authorize: Send + Sync {
    /// Returns `Err(LifecycleError::Unauthorized)` when the action is denied.
    fn authorize(&self, action: Action) -> Result<()>;
}

/// An authorizer that can be moved onto blocking worker threads.
pub type SharedAuthorizer = Arc<dyn Authorize>;

/// Grants everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Authorize for AllowAll {
    fn authorize(&self, _action: Action) -> Result<()> {
        Ok(())
    }
}

/// The person or service issuing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub name: String,
    /// Role name; matched case-insensitively against the policy
    pub role: String,
    /// Grants held by this actor on top of the role's
    pub permissions: HashSet<Action>,
}

impl Actor {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into().trim().to_uppercase(),
            permissions: HashSet::new(),
        }
    }

    /// Add an individual grant.
    pub fn with_permission(mut self, action: Action) -> Self {
        self.permissions.insert(action);
        self
    }
}

/// Maps role names to the actions they grant.
#[derive(Debug, Clone)]
pub struct RolePolicy {
    roles: HashMap<String, HashSet<Action>>,
    bypass_role: Option<String>,
}

impl RolePolicy {
    /// A policy with no roles and no bypass.
    pub fn empty() -> Self {
        Self {
            roles: HashMap::new(),
            bypass_role: None,
        }
    }

    /// Grant `actions` to `role`, extending any earlier grants.
    pub fn grant(mut self, role: &str, actions: &[Action]) -> Self {
        self.roles
            .entry(role.trim().to_uppercase())
            .or_default()
            .extend(actions.iter().copied());
        self
    }

    /// Let `role` perform every action.
    pub fn with_bypass_role(mut self, role: &str) -> Self {
        self.bypass_role = Some(role.trim().to_uppercase());
        self
    }

    /// Role names known to the policy, sorted.
    pub fn role_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .roles
            .keys()
            .map(String::as_str)
            .chain(self.bypass_role.as_deref())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Whether `actor` may perform `action`.
    pub fn permits(&self, actor: &Actor, action: Action) -> bool {
        let role = actor.role.to_uppercase();
        if self.bypass_role.as_deref() == Some(role.as_str()) {
            return true;
        }
        actor.permissions.contains(&action)
            || self
                .roles
                .get(&role)
                .is_some_and(|granted| granted.contains(&action))
    }
}

impl Default for RolePolicy {
    /// The dashboard's standard role table; `CEO` bypasses every check.
    fn default() -> Self {
        use Action::*;
        Self::empty()
            .with_bypass_role("CEO")
            .grant(
                "CTO",
                &[
                    ViewProjects,
                    SetStatus,
                    TransitionStatus,
                    ConfirmAllStagesCompleted,
                    ManageModules,
                ],
            )
            .grant(
                "FINANCE",
                &[ViewProjects, ApproveBudget, SetPaymentStatus, CloseProject],
            )
            .grant(
                "PROJECT_MANAGER",
                &[
                    ViewProjects,
                    CreateProject,
                    RequestBudgetApproval,
                    SetStatus,
                    TransitionStatus,
                    ManageModules,
                ],
            )
            .grant("EMPLOYEE", &[ViewProjects])
    }
}

/// An actor acting under a policy.
#[derive(Debug, Clone)]
pub struct Session {
    pub actor: Actor,
    policy: RolePolicy,
}

impl Session {
    pub fn new(actor: Actor, policy: RolePolicy) -> Self {
        Self { actor, policy }
    }
}

impl Authorize for Session {
    fn authorize(&self, action: Action) -> Result<()> {
        if self.policy.permits(&self.actor, action) {
            Ok(())
        } else {
            log::warn!(
                "denied {action} for actor '{}' with role {}",
                self.actor.name,
                self.actor.role
            );
            Err(LifecycleError::Unauthorized {
                actor: self.actor.name.clone(),
                action,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_default_roles() {
        let policy = RolePolicy::default();
        let cto = Actor::new("ada", "cto");
        let finance = Actor::new("dana", "FINANCE");
        let employee = Actor::new("eli", "EMPLOYEE");

        assert!(policy.permits(&cto, Action::ConfirmAllStagesCompleted));
        assert!(!policy.permits(&cto, Action::CloseProject));
        assert!(policy.permits(&finance, Action::CloseProject));
        assert!(!policy.permits(&finance, Action::SetStatus));
        assert!(policy.permits(&employee, Action::ViewProjects));
        assert!(!policy.permits(&employee, Action::CreateProject));
    }

    #[test]
    fn test_bypass_role_allows_everything() {
        let policy = RolePolicy::default();
        let ceo = Actor::new("sam", "ceo");
        for action in Action::ALL {
            assert!(policy.permits(&ceo, action), "CEO denied {action}");
        }
    }

    #[test]
    fn test_unknown_role_is_denied() {
        let session = Session::new(Actor::new("x", "INTERN"), RolePolicy::default());
        let err = session.authorize(Action::ViewProjects).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(err.to_string().contains("project:view"));
    }

    #[test]
    fn test_actor_permissions_extend_role() {
        let actor = Actor::new("eli", "EMPLOYEE").with_permission(Action::SetPaymentStatus);
        let session = Session::new(actor, RolePolicy::default());
        assert!(session.authorize(Action::SetPaymentStatus).is_ok());
        assert!(session.authorize(Action::CloseProject).is_err());
    }

    #[test]
    fn test_action_permission_strings_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>(), Ok(action));
        }
        assert!("project:explode".parse::<Action>().is_err());
    }

    #[test]
    fn test_role_names() {
        let policy = RolePolicy::default();
        let names = policy.role_names();
        assert_eq!(
            names,
            vec!["CEO", "CTO", "EMPLOYEE", "FINANCE", "PROJECT_MANAGER"]
        );
    }
}
