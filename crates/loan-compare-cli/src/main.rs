mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::affordability::AffordabilityArgs;
use commands::compare::CompareArgs;
use commands::schedule::ScheduleArgs;
use commands::session::SessionArgs;

/// Loan scenario comparison and affordability checks
#[derive(Parser)]
#[command(
    name = "loanc",
    version,
    about = "Compare loan amortization schedules and check payment affordability",
    long_about = "A CLI for comparing fixed-payment loan scenarios with decimal precision. \
                  Builds month-by-month amortization schedules, compares payments and total \
                  interest across scenarios, and rates the heaviest payment against monthly \
                  income (healthy / caution / critical)."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the amortization schedule for a single loan
    Schedule(ScheduleArgs),
    /// Compare several loan scenarios and rate affordability
    Compare(CompareArgs),
    /// Rate a monthly payment against monthly income
    Affordability(AffordabilityArgs),
    /// Interactive session: add, remove and clear scenarios
    Session(SessionArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Compare(args) => commands::compare::run_compare(args),
        Commands::Affordability(args) => commands::affordability::run_affordability(args),
        Commands::Session(args) => match commands::session::run_session(args, cli.output) {
            Ok(()) => process::exit(0),
            Err(e) => Err(e),
        },
        Commands::Version => {
            println!("loanc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
