mod args;
mod cli;
mod handler;
mod mcp;
mod renderer;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use keystone_core::{
    models::ActionableFilter, Actor, LifecycleManagerBuilder, RolePolicy, Session,
    SharedAuthorizer,
};
use log::info;

use crate::{
    args::{Args, Commands},
    handler::CommandHandler,
    mcp::KeystoneMcpServer,
    renderer::TerminalRenderer,
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let policy = RolePolicy::default();
    let role = args.role.trim().to_uppercase();
    if !policy.role_names().contains(&role.as_str()) {
        bail!(
            "Unknown role '{}': expected one of {}",
            args.role,
            policy.role_names().join(", ")
        );
    }

    let manager = LifecycleManagerBuilder::new()
        .with_database_path(args.database_file)
        .build()
        .await
        .context("Failed to open the project database")?;

    let actor = args
        .grants
        .into_iter()
        .fold(Actor::new(args.actor, role), Actor::with_permission);
    let session = Session::new(actor, policy);
    info!(
        "acting as '{}' with role {}",
        session.actor.name, session.actor.role
    );
    let auth: SharedAuthorizer = Arc::new(session);

    let renderer = TerminalRenderer::new(!args.no_color);

    match args.command {
        Some(Commands::Serve) => mcp::run_stdio_server(KeystoneMcpServer::new(manager, auth)).await,
        Some(Commands::Project { command }) => {
            CommandHandler::new(manager, auth, renderer)
                .handle_project_command(command)
                .await
        }
        Some(Commands::Module { command }) => {
            CommandHandler::new(manager, auth, renderer)
                .handle_module_command(command)
                .await
        }
        None => {
            CommandHandler::new(manager, auth, renderer)
                .list_queue(ActionableFilter::Open)
                .await
        }
    }
}
