//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// vidmod - install and upgrade the video activity schema
#[derive(Parser, Debug)]
#[command(name = "vidmod")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the site directory containing vidmod.yml
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Named target from vidmod.yml (falls back to VIDMOD_TARGET)
    #[arg(short, long, global = true)]
    pub target: Option<String>,

    /// Override the database path
    #[arg(long, global = true, env = "VIDMOD_DATABASE")]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install or upgrade component schemas to their latest version
    Migrate(MigrateArgs),

    /// Show installed and latest versions
    Status(StatusArgs),

    /// Show the steps a migration would apply
    Plan(PlanArgs),

    /// Show recorded version checkpoints
    History(HistoryArgs),

    /// List the built-in components
    Components,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Components to migrate (repeatable, default: from config)
    #[arg(long = "component")]
    pub components: Vec<String>,

    /// Print the pending steps instead of applying them
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Components to plan (repeatable, default: from config)
    #[arg(long = "component")]
    pub components: Vec<String>,

    /// Plan from this version instead of the recorded one
    #[arg(long)]
    pub from: Option<i64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Only show this component
    #[arg(long)]
    pub component: Option<String>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
