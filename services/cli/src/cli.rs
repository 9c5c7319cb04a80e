use crate::commands::{run_calculate, run_segment};
use aeroplan_earnings::config::{AppConfig, OutputFormat};
use aeroplan_earnings::earnings::{CalculatorRegistry, EarningsEngine};
use aeroplan_earnings::error::AppError;
use aeroplan_earnings::{telemetry, ReferenceData};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "aeroplan-calc",
    about = "Calculate Aeroplan points and status-qualifying credit for flights",
    version
)]
struct Cli {
    /// Directory with airports.csv, countries.csv, and distances.csv
    #[arg(long, global = true)]
    reference_dir: Option<PathBuf>,
    /// Output format: table or json
    #[arg(long, global = true, value_parser = parse_format)]
    format: Option<OutputFormat>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Earn points and SQC for a whole itinerary
    Calculate(CalculateArgs),
    /// Evaluate a single segment without allocating a fare
    Segment(SegmentArgs),
}

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// Ticket number; 014 marks Air Canada ticket stock
    #[arg(long)]
    pub(crate) ticket: Option<String>,
    /// Elite status: 0, 25, 35, 50, 75, or 100
    #[arg(long, default_value = "0")]
    pub(crate) status: String,
    /// Whitespace-separated segments: airline,origin,destination,class[,brand]
    #[arg(long)]
    pub(crate) segments: String,
    /// Base fare in dollars
    #[arg(long)]
    pub(crate) base_fare: Option<f64>,
    /// Carrier surcharges in dollars
    #[arg(long, default_value_t = 0.0)]
    pub(crate) surcharges: f64,
}

#[derive(Args, Debug)]
pub(crate) struct SegmentArgs {
    /// Operating airline code
    #[arg(long)]
    pub(crate) operating: String,
    /// Marketing airline code, for codeshare overrides
    #[arg(long)]
    pub(crate) marketing: Option<String>,
    #[arg(long)]
    pub(crate) origin: String,
    #[arg(long)]
    pub(crate) destination: String,
    #[arg(long)]
    pub(crate) fare_class: Option<char>,
    #[arg(long)]
    pub(crate) fare_basis: Option<String>,
    #[arg(long)]
    pub(crate) ticket: Option<String>,
    /// Elite bonus multiplier, 0 (none) to 5 (Super Elite)
    #[arg(long, default_value_t = 0)]
    pub(crate) bonus_multiplier: u32,
    /// Dollars to credit to the segment, filling in spend-based figures
    #[arg(long)]
    pub(crate) eligible_dollars: Option<u64>,
}

fn parse_format(value: &str) -> Result<OutputFormat, String> {
    OutputFormat::parse(value).map_err(|err| err.to_string())
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(dir) = cli.reference_dir {
        config.reference.data_dir = Some(dir);
    }
    if let Some(format) = cli.format {
        config.output = format;
    }

    telemetry::init(&config.telemetry)?;

    let reference = ReferenceData::from_config(&config.reference)?;
    let engine = EarningsEngine::new(reference, CalculatorRegistry::standard());
    info!(environment = ?config.environment, output = ?config.output, "earning engine ready");

    match cli.command {
        Command::Calculate(args) => run_calculate(&engine, args, config.output),
        Command::Segment(args) => run_segment(&engine, args, config.output),
    }
}
