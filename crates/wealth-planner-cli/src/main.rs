mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::wealth::{FutureWealthArgs, RetirementArgs, SipSwpArgs};

/// Savings and retirement projections
#[derive(Parser)]
#[command(
    name = "wplan",
    version,
    about = "Savings, retirement-corpus and SIP/SWP projections",
    long_about = "A CLI for time-value-of-money projections with decimal precision. \
                  Projects future wealth from a portfolio plus yearly and monthly \
                  contributions, sizes the corpus and monthly SIP needed for \
                  retirement, and bridges a SIP accumulation into a sustainable SWP."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Project future wealth from a portfolio, yearly lumpsums and a monthly SIP
    FutureWealth(FutureWealthArgs),
    /// Size the retirement corpus and the monthly SIP needed to reach it
    Retirement(RetirementArgs),
    /// Accumulate with a monthly SIP, then withdraw with a level monthly SWP
    SipSwp(SipSwpArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::FutureWealth(args) => commands::wealth::run_future_wealth(args),
        Commands::Retirement(args) => commands::wealth::run_retirement(args),
        Commands::SipSwp(args) => commands::wealth::run_sip_swp(args),
        Commands::Version => {
            println!("wplan {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
