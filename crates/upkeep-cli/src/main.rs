//! Upkeep CLI
//!
//! Scheduling and administration front end for the upkeep maintenance
//! engine. The `generate` and `sweep` commands are the periodic ticks a
//! scheduler drives; everything else is interactive administration.

mod args;
mod cli;
mod handler;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use handler::Cli;
use log::info;
use renderer::TerminalRenderer;
use upkeep_core::{params::ListPlans, EngineBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        as_of,
        command,
    } = Args::parse();

    let engine = EngineBuilder::new()
        .with_database_path(database_file)
        .with_now(as_of)
        .build()
        .await
        .context("Failed to initialize engine")?;

    info!("Upkeep started with database {}", engine.database_path().display());

    let cli = Cli::new(engine, TerminalRenderer::new(!no_color));

    match command {
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Generate(args)) => cli.handle_generate(args).await,
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Checklist(args)) => cli.handle_checklist(args).await,
        Some(Sweep) => cli.handle_sweep().await,
        Some(Cascade(args)) => cli.handle_cascade(args).await,
        Some(WorkOrder { command }) => cli.handle_work_order_command(command).await,
        Some(Stats { command }) => cli.handle_stats_command(command).await,
        Some(User { command }) => cli.handle_user_command(command).await,
        None => {
            cli.list_plans(&ListPlans {
                include_inactive: false,
            })
            .await
        }
    }
}
