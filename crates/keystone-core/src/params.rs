//! Parameter structures shared by every interface.
//!
//! These carry plain data (identifiers, status strings, dates as text) from
//! the CLI and MCP layers into [`crate::LifecycleManager`]. Interface
//! layers wrap them with their own derives and convert with `.into()`:
//!
//! ```ignore
//! // keystone-cli/src/cli.rs
//! #[derive(Args)]
//! pub struct SetStatusArgs {
//!     pub id: u64,
//!     pub status: StatusArg,
//! }
//!
//! impl From<SetStatusArgs> for SetStatus { /* ... */ }
//! ```
//!
//! Parsing into domain types happens here, so every interface reports the
//! same [`LifecycleError`] for the same bad input.

use jiff::civil::Date;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{LifecycleError, Result},
    models::{ActionableFilter, Budget, ModuleStatus, NewModule, UpdateModuleRequest},
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateProject {
    /// Name of the project (required)
    pub name: String,
    /// Optional description of the project
    pub description: Option<String>,
    /// Optional initial budget amount
    pub budget_amount: Option<f64>,
    /// Budget currency code, USD when omitted
    pub currency: Option<String>,
}

impl CreateProject {
    /// The initial budget, if an amount or currency was given.
    pub fn budget(&self) -> Option<Budget> {
        budget_from(self.budget_amount, self.currency.clone())
    }
}

/// Parameters for listing projects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListProjects {
    /// Which dashboard queue to list; open projects when omitted
    #[serde(default)]
    pub queue: ActionableFilter,
}

/// Parameters for requesting or approving a budget.
///
/// On a request the budget is staged as a proposal; on approval it becomes
/// the final budget.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct BudgetDecision {
    /// Project ID
    pub id: u64,
    /// Budget amount
    pub amount: Option<f64>,
    /// Budget currency code, USD when omitted
    pub currency: Option<String>,
}

impl BudgetDecision {
    /// The budget carried by the decision, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keystone_core::params::BudgetDecision;
    ///
    /// let decision = BudgetDecision { id: 1, amount: None, currency: None };
    /// assert!(decision.budget().is_none());
    ///
    /// let decision = BudgetDecision { id: 1, amount: Some(250.0), currency: None };
    /// assert_eq!(decision.budget().unwrap().currency, "USD");
    /// ```
    pub fn budget(&self) -> Option<Budget> {
        budget_from(self.amount, self.currency.clone())
    }
}

/// Parameters for writing a project status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetStatus {
    /// Project ID
    pub id: u64,
    /// Target status, e.g. 'ACTIVE' or 'COMPLETED'
    pub status: String,
}

/// Parameters for recording the payment state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetPaymentStatus {
    /// Project ID
    pub id: u64,
    /// 'PENDING', 'RECIEVED' or 'NOT_RECIEVED'
    pub payment_status: String,
}

/// Parameters for permanently deleting a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteProject {
    /// Project ID
    pub id: u64,
    /// Must be true; deletion removes the project and its modules for good
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for appending a module to a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddModule {
    /// ID of the project to add the module to
    pub project_id: u64,
    /// Name of the module (required)
    pub name: String,
    /// Optional description of the module
    pub description: Option<String>,
    /// Due date as YYYY-MM-DD
    pub deadline: String,
    /// 'todo', 'inprogress' or 'completed'; 'todo' when omitted
    pub status: Option<String>,
}

impl AddModule {
    /// Parse the deadline and status into a [`NewModule`].
    pub fn validate(&self) -> Result<NewModule> {
        Ok(NewModule {
            project_id: self.project_id,
            name: self.name.clone(),
            description: self.description.clone(),
            deadline: parse_deadline(&self.deadline)?,
            status: self
                .status
                .as_deref()
                .map(ModuleStatus::parse)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

/// Parameters for updating a module. Omitted fields stay as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateModule {
    /// Module ID
    pub id: u64,
    /// Updated name
    pub name: Option<String>,
    /// Updated description
    pub description: Option<String>,
    /// Updated due date as YYYY-MM-DD
    pub deadline: Option<String>,
    /// Updated status: 'todo', 'inprogress' or 'completed'
    pub status: Option<String>,
}

impl UpdateModule {
    /// Parse the update into an [`UpdateModuleRequest`].
    ///
    /// # Errors
    ///
    /// * `LifecycleError::InvalidStatus` - When the status is not a module
    ///   status
    /// * `LifecycleError::InvalidInput` - When the deadline is not a date
    pub fn validate(&self) -> Result<UpdateModuleRequest> {
        Ok(UpdateModuleRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            deadline: self.deadline.as_deref().map(parse_deadline).transpose()?,
            status: self
                .status
                .as_deref()
                .map(ModuleStatus::parse)
                .transpose()?,
        })
    }
}

fn budget_from(amount: Option<f64>, currency: Option<String>) -> Option<Budget> {
    if amount.is_none() && currency.is_none() {
        return None;
    }
    Some(Budget::new(amount, currency))
}

fn parse_deadline(value: &str) -> Result<Date> {
    value.trim().parse::<Date>().map_err(|e| {
        LifecycleError::invalid_input("deadline")
            .with_reason(format!("expected a YYYY-MM-DD date, got '{value}': {e}"))
    })
}
