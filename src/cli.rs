use clap::{Parser, Subcommand};

/// Kairos millisecond-resolution event scheduler.
#[derive(Parser)]
#[command(
    name = "kairos",
    version,
    about = "Millisecond-resolution event schedule search (2000-2100)"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// List scheduled events nearest to a start instant.
    Next(NextArgs),
    /// Validate a schedule expression and print its canonical form.
    Check(CheckArgs),
}

/// Arguments for the `next` subcommand.
#[derive(clap::Args)]
pub struct NextArgs {
    /// Schedule expression, e.g. "*.9.*/2 1-5 10:00:00.000".
    pub schedule: String,

    /// Start instant as "YYYY-MM-DD HH:MM:SS[.mmm]" (default: now, UTC).
    #[arg(short, long)]
    pub from: Option<String>,

    /// Number of events to produce.
    #[arg(short = 'n', long, default_value_t = 5)]
    pub count: usize,

    /// Search toward the past instead of the future.
    #[arg(short, long)]
    pub backward: bool,

    /// Include the start instant itself if it is scheduled.
    #[arg(short, long)]
    pub inclusive: bool,

    /// Emit JSON instead of plain text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args)]
pub struct CheckArgs {
    /// Schedule expression to validate.
    pub schedule: String,

    /// Emit JSON instead of plain text.
    #[arg(long)]
    pub json: bool,
}
