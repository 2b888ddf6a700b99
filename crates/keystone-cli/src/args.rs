use std::path::PathBuf;

use clap::{Parser, Subcommand};
use keystone_core::Action;

use crate::cli::{ModuleCommands, ProjectCommands};

/// Command-line interface for the Keystone project lifecycle manager
///
/// Keystone tracks projects from budget approval through delivery and
/// payment to closure. Every command runs as an actor holding a role; the
/// role decides which operations are permitted.
#[derive(Parser)]
#[command(version, about, name = "keystone")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/keystone/keystone.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Name recorded for the acting user
    #[arg(long, global = true, env = "KEYSTONE_ACTOR", default_value = "operator")]
    pub actor: String,

    /// Role of the acting user: CEO, CTO, FINANCE, PROJECT_MANAGER or EMPLOYEE
    #[arg(long, global = true, env = "KEYSTONE_ROLE", default_value = "CEO")]
    pub role: String,

    /// Extra permission for the acting user on top of the role's, e.g.
    /// payment:set (repeatable)
    #[arg(long = "grant", global = true, value_name = "PERMISSION")]
    pub grants: Vec<Action>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Keystone CLI
///
/// - `project`: project records and the approval, status and payment workflow
/// - `module`: deliverables inside a project
/// - `serve`: start the MCP server on stdio
#[derive(Subcommand)]
pub enum Commands {
    /// Manage projects and their lifecycle
    #[command(alias = "p")]
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Manage modules within projects
    #[command(alias = "m")]
    Module {
        #[command(subcommand)]
        command: ModuleCommands,
    },
    /// Start the MCP server
    Serve,
}
