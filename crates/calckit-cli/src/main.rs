mod commands;
mod input;
mod output;

use calckit_core::Calculator;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::investments::{FutureValueArgs, SipArgs};
use commands::loans::EmiArgs;
use commands::personal::{AgeArgs, BmiArgs, ConvertUnitsArgs};
use commands::stocks::{StockAverageArgs, StockSplitArgs};
use commands::travel::TripArgs;

/// Everyday finance and personal calculators
#[derive(Parser)]
#[command(
    name = "calckit",
    version,
    about = "Everyday finance and personal calculators",
    long_about = "A CLI for everyday calculations with decimal precision. Supports stock \
                  averaging and splits, loan EMIs, SIP and future value projections, \
                  trip cost sharing, age and BMI."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", env = "CALCKIT_OUTPUT", global = true)]
    output: OutputFormat,

    /// Log verbosity when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", env = "CALCKIT_LOG", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Average purchase price across several lots
    StockAverage(StockAverageArgs),
    /// Price and holdings after a stock split
    StockSplit(StockSplitArgs),
    /// Monthly instalment for a loan
    Emi(EmiArgs),
    /// Systematic investment plan (regular, step-up or lumpsum)
    Sip(SipArgs),
    /// Compound growth of a single amount
    FutureValue(FutureValueArgs),
    /// Fuel and shared expenses for a road trip
    Trip(TripArgs),
    /// Age in years, months and days
    Age(AgeArgs),
    /// Body mass index and category
    Bmi(BmiArgs),
    /// Convert weight and height between metric and imperial
    ConvertUnits(ConvertUnitsArgs),
    /// List the available calculators
    List,
    /// Print version information
    Version,
}

impl Commands {
    /// Calculator the command runs, used to pick currency display digits.
    fn calculator(&self) -> Option<Calculator> {
        match self {
            Commands::StockAverage(_) => Some(Calculator::StockAverage),
            Commands::StockSplit(_) => Some(Calculator::StockSplit),
            Commands::Emi(_) => Some(Calculator::Emi),
            Commands::Sip(_) => Some(Calculator::Sip),
            Commands::FutureValue(_) => Some(Calculator::FutureValue),
            Commands::Trip(_) => Some(Calculator::Trip),
            Commands::Age(_) => Some(Calculator::Age),
            Commands::Bmi(_) | Commands::ConvertUnits(_) => Some(Calculator::Bmi),
            Commands::List | Commands::Version => None,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let calculator = cli.command.calculator();
    tracing::debug!(?calculator, "dispatching command");

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::StockAverage(args) => commands::stocks::run_stock_average(args),
        Commands::StockSplit(args) => commands::stocks::run_stock_split(args),
        Commands::Emi(args) => commands::loans::run_emi(args),
        Commands::Sip(args) => commands::investments::run_sip(args),
        Commands::FutureValue(args) => commands::investments::run_future_value(args),
        Commands::Trip(args) => commands::travel::run_trip(args),
        Commands::Age(args) => commands::personal::run_age(args),
        Commands::Bmi(args) => commands::personal::run_bmi(args),
        Commands::ConvertUnits(args) => commands::personal::run_convert_units(args),
        Commands::List => commands::catalogue::run_list(),
        Commands::Version => {
            println!("calckit {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value, calculator);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
