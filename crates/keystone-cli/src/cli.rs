//! Command-line argument definitions.
//!
//! Each clap struct converts into the matching `keystone_core::params` type
//! with `From`, so parsing and validation of domain values (statuses,
//! deadlines, budgets) happens once in the core:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → LifecycleManager
//! ```

use std::fmt;

use clap::{Args, Subcommand, ValueEnum};
use keystone_core::{models::ActionableFilter, params::*};

#[derive(Args)]
pub struct CreateProjectArgs {
    #[arg(help = "Name of the project")]
    pub name: String,
    #[arg(short, long, help = "Detailed description of the project")]
    pub description: Option<String>,
    #[arg(short, long, help = "Initial budget amount")]
    pub budget: Option<f64>,
    #[arg(short, long, help = "Budget currency code (default: USD)")]
    pub currency: Option<String>,
}

impl From<CreateProjectArgs> for CreateProject {
    fn from(args: CreateProjectArgs) -> Self {
        CreateProject {
            name: args.name,
            description: args.description,
            budget_amount: args.budget,
            currency: args.currency,
        }
    }
}

#[derive(Args)]
pub struct ListProjectsArgs {
    #[arg(short, long, value_enum, default_value_t = QueueArg::Open, help = "Queue to list")]
    pub queue: QueueArg,
}

impl From<ListProjectsArgs> for ListProjects {
    fn from(args: ListProjectsArgs) -> Self {
        ListProjects {
            queue: args.queue.into(),
        }
    }
}

#[derive(Args)]
pub struct IdArgs {
    #[arg(help = "ID of the resource")]
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(args: IdArgs) -> Self {
        Id { id: args.id }
    }
}

#[derive(Args)]
pub struct DeleteProjectArgs {
    #[arg(help = "ID of the project to delete")]
    pub id: u64,
    #[arg(long, help = "Confirm permanent deletion of the project and its modules")]
    pub confirm: bool,
}

impl From<DeleteProjectArgs> for DeleteProject {
    fn from(args: DeleteProjectArgs) -> Self {
        DeleteProject {
            id: args.id,
            confirmed: args.confirm,
        }
    }
}

#[derive(Args)]
pub struct BudgetArgs {
    #[arg(help = "ID of the project")]
    pub id: u64,
    #[arg(short, long, help = "Budget amount")]
    pub amount: Option<f64>,
    #[arg(short, long, help = "Budget currency code (default: USD)")]
    pub currency: Option<String>,
}

impl From<BudgetArgs> for BudgetDecision {
    fn from(args: BudgetArgs) -> Self {
        BudgetDecision {
            id: args.id,
            amount: args.amount,
            currency: args.currency,
        }
    }
}

#[derive(Args)]
pub struct StatusArgs {
    #[arg(help = "ID of the project")]
    pub id: u64,
    #[arg(help = "Target status, e.g. ACTIVE, INACTIVE, CANCELLED or COMPLETED")]
    pub status: String,
}

impl From<StatusArgs> for SetStatus {
    fn from(args: StatusArgs) -> Self {
        SetStatus {
            id: args.id,
            status: args.status,
        }
    }
}

#[derive(Args)]
pub struct PaymentArgs {
    #[arg(help = "ID of the project")]
    pub id: u64,
    #[arg(help = "Payment status: PENDING, RECIEVED or NOT_RECIEVED")]
    pub payment_status: String,
}

impl From<PaymentArgs> for SetPaymentStatus {
    fn from(args: PaymentArgs) -> Self {
        SetPaymentStatus {
            id: args.id,
            payment_status: args.payment_status,
        }
    }
}

#[derive(Args)]
pub struct AddModuleArgs {
    #[arg(help = "ID of the project to add the module to")]
    pub project_id: u64,
    #[arg(help = "Name of the module")]
    pub name: String,
    #[arg(long, help = "Due date as YYYY-MM-DD")]
    pub deadline: String,
    #[arg(short, long, help = "Detailed description of the module")]
    pub description: Option<String>,
    #[arg(short, long, value_enum, help = "Initial status (default: todo)")]
    pub status: Option<ModuleStatusArg>,
}

impl From<AddModuleArgs> for AddModule {
    fn from(args: AddModuleArgs) -> Self {
        AddModule {
            project_id: args.project_id,
            name: args.name,
            description: args.description,
            deadline: args.deadline,
            status: args.status.map(|s| s.to_string()),
        }
    }
}

#[derive(Args)]
pub struct UpdateModuleArgs {
    #[arg(help = "ID of the module to update")]
    pub id: u64,
    #[arg(short, long, help = "New name")]
    pub name: Option<String>,
    #[arg(short, long, help = "New description")]
    pub description: Option<String>,
    #[arg(long, help = "New due date as YYYY-MM-DD")]
    pub deadline: Option<String>,
    #[arg(short, long, value_enum, help = "New status")]
    pub status: Option<ModuleStatusArg>,
}

impl From<UpdateModuleArgs> for UpdateModule {
    fn from(args: UpdateModuleArgs) -> Self {
        UpdateModule {
            id: args.id,
            name: args.name,
            description: args.description,
            deadline: args.deadline,
            status: args.status.map(|s| s.to_string()),
        }
    }
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    #[command(alias = "c")]
    Create(CreateProjectArgs),
    /// List the projects in a queue
    #[command(alias = "ls")]
    List(ListProjectsArgs),
    /// Show a project with its modules
    Show(IdArgs),
    /// Permanently delete a project and its modules
    #[command(alias = "rm")]
    Delete(DeleteProjectArgs),
    /// Send a project's budget to finance for approval
    RequestApproval(BudgetArgs),
    /// Approve a project's budget, optionally setting the final amount
    Approve(BudgetArgs),
    /// Write a project status without checking the transition table
    SetStatus(StatusArgs),
    /// Move a project along an allowed status transition
    Transition(StatusArgs),
    /// Confirm that every stage of a completed project is done
    ConfirmStages(IdArgs),
    /// Record the payment status of a project
    SetPayment(PaymentArgs),
    /// Close a confirmed project whose payment has arrived
    Close(IdArgs),
}

#[derive(Subcommand)]
pub enum ModuleCommands {
    /// Append a module to a project
    Add(AddModuleArgs),
    /// Update a module's name, description, deadline or status
    Update(UpdateModuleArgs),
    /// Remove a module from its project
    #[command(alias = "rm")]
    Remove(IdArgs),
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum QueueArg {
    /// Every project that is not closed
    Open,
    /// Budget requests waiting on finance
    PendingApproval,
    /// Confirmed projects waiting on payment
    PaymentQueue,
    /// Completed projects awaiting sign-off
    CompletionQueue,
    /// Every project including closed ones
    All,
}

impl From<QueueArg> for ActionableFilter {
    fn from(queue: QueueArg) -> Self {
        match queue {
            QueueArg::Open => ActionableFilter::Open,
            QueueArg::PendingApproval => ActionableFilter::PendingApproval,
            QueueArg::PaymentQueue => ActionableFilter::PaymentQueue,
            QueueArg::CompletionQueue => ActionableFilter::CompletionQueue,
            QueueArg::All => ActionableFilter::All,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ModuleStatusArg {
    Todo,
    InProgress,
    Completed,
}

impl fmt::Display for ModuleStatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleStatusArg::Todo => write!(f, "todo"),
            ModuleStatusArg::InProgress => write!(f, "inprogress"),
            ModuleStatusArg::Completed => write!(f, "completed"),
        }
    }
}
