use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::Timestamp;
use upkeep_core::schedule::tally::parse_due;

use crate::cli::{
    CascadeArgs, ChecklistArgs, GenerateArgs, PlanCommands, StatsCommands, TaskCommands,
    UserCommands, WorkOrderCommands,
};

/// Maintenance plan scheduler and lifecycle tool
///
/// Upkeep expands recurring maintenance plans into dated task instances,
/// archives closed tasks and purges them after a retention window, and keeps
/// dashboard statistics over work orders. The `generate` and `sweep`
/// commands are meant to be run by a scheduler (weekly and daily).
#[derive(Parser)]
#[command(version, about, name = "upk")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/upkeep/upkeep.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Run as if the current time were this instant (RFC 3339 timestamp or
    /// YYYY-MM-DD, taken as UTC)
    #[arg(long, global = true, value_parser = parse_as_of)]
    pub as_of: Option<Timestamp>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Upkeep CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage maintenance plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Expand plans into task instances (weekly tick)
    #[command(alias = "g")]
    Generate(GenerateArgs),
    /// Inspect and close task instances
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Show a plan's checklist grid
    #[command(alias = "c")]
    Checklist(ChecklistArgs),
    /// Purge aged-out archived task instances (daily tick)
    Sweep,
    /// Remove task instances left behind by a deleted plan
    Cascade(CascadeArgs),
    /// Record work orders
    #[command(alias = "wo")]
    WorkOrder {
        #[command(subcommand)]
        command: WorkOrderCommands,
    },
    /// Dashboard statistics
    Stats {
        #[command(subcommand)]
        command: StatsCommands,
    },
    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

fn parse_as_of(value: &str) -> Result<Timestamp, String> {
    parse_due(value).ok_or_else(|| format!("expected an RFC 3339 timestamp or YYYY-MM-DD, got '{value}'"))
}
