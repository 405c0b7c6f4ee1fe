mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::analysis::AnalyzeArgs;
use commands::locale::ParseNumberArgs;
use commands::purchase::{AmortizationArgs, ClosingCostsArgs};
use commands::rental::{IrrArgs, TaxRateArgs};

/// Buy-to-let real-estate investment calculator
#[derive(Parser)]
#[command(
    name = "rentcalc",
    version,
    about = "Buy-to-let real-estate investment calculator",
    long_about = "Estimates purchase costs and transfer taxes, builds the mortgage \
                  amortization schedule, projects rental cash flow after income tax \
                  and reports net yield, IRR and a grade for the investment."
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
    /// Full analysis: purchase costs, amortization, projection and metrics
    Analyze(AnalyzeArgs),
    /// Estimate notary, registry, appraisal and transfer taxes for a price
    ClosingCosts(ClosingCostsArgs),
    /// Yearly amortization schedule of an annuity mortgage
    Amortization(AmortizationArgs),
    /// Income tax bracket for a yearly rental income
    TaxRate(TaxRateArgs),
    /// Internal rate of return of yearly cash flows
    Irr(IrrArgs),
    /// Parse decimal-comma text ("1.234,5") into a number
    ParseNumber(ParseNumberArgs),
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

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analysis::run_analyze(args),
        Commands::ClosingCosts(args) => commands::purchase::run_closing_costs(args),
        Commands::Amortization(args) => commands::purchase::run_amortization(args),
        Commands::TaxRate(args) => commands::rental::run_tax_rate(args),
        Commands::Irr(args) => commands::rental::run_irr(args),
        Commands::ParseNumber(args) => commands::locale::run_parse_number(args),
        Commands::Version => {
            println!("rentcalc {}", env!("CARGO_PKG_VERSION"));
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
