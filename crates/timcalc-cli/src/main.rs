mod args;
mod commands;
mod notifier;
mod settings;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use args::{OutputFormat, SearchArgs};

#[derive(Parser)]
#[command(name = "timcalc")]
#[command(about = "Timer prescaler/auto-reload calculator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the PSC/ARR pair closest to the target frequency
    Search {
        #[command(flatten)]
        args: SearchArgs,

        /// Also print the compare value for this duty cycle (percent)
        #[arg(long)]
        duty: Option<f64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Compare prefiltered and exhaustive results for a clock/target pair
    Check {
        #[command(flatten)]
        args: SearchArgs,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only results
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("timcalc=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Search { args, duty, format } => commands::search::run(&args, duty, format),
        Command::Check { args } => commands::check::run(&args),
    }
}
