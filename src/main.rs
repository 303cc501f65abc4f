//! Teilzeitrechner server.
//!
//! Serves the duration calculator API over HTTP, or runs a single
//! calculation from the command line and prints the text report.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::info;

use teilzeit_engine::api::{AppState, create_router};
use teilzeit_engine::calculation::DurationCalculator;
use teilzeit_engine::config::ConfigLoader;
use teilzeit_engine::models::{CalculationInput, ShorteningReasons};

/// Teilzeitrechner - duration calculator for part-time vocational training
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory with regulation.yaml and rules.yaml. Uses the statutory rules if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default)
    Serve(ServeArgs),
    /// Run one calculation and print the report
    Calculate(CalculateArgs),
}

#[derive(ClapArgs, Debug)]
struct ServeArgs {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 5000)]
    port: u16,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(ClapArgs, Debug)]
struct CalculateArgs {
    /// Full-time training duration in months
    #[arg(long, default_value_t = 36)]
    base: i64,

    /// Full-time weekly hours
    #[arg(long, default_value = "40")]
    full_time_hours: Decimal,

    /// Part-time share in percent
    #[arg(long, conflicts_with = "hours", required_unless_present = "hours")]
    percent: Option<Decimal>,

    /// Part-time weekly hours
    #[arg(long)]
    hours: Option<Decimal>,

    /// Trainee age in years
    #[arg(long)]
    age: Option<u32>,

    /// Higher education entrance qualification
    #[arg(long)]
    abitur: bool,

    /// Intermediate school certificate
    #[arg(long)]
    realschule: bool,

    /// Declared to be 21 or older
    #[arg(long)]
    age_over_21: bool,

    /// Family or nursing care responsibilities
    #[arg(long)]
    family_care: bool,

    /// Childcare responsibilities
    #[arg(long)]
    childcare: bool,

    /// Months of relevant prior experience
    #[arg(long, default_value = "0")]
    prior_experience: Decimal,

    /// Relevant professional experience (counted once with --prior-experience)
    #[arg(long)]
    professional_experience: bool,

    /// Completed months of an unfinished prior training
    #[arg(long)]
    unfinished_training: Option<Decimal>,
}

impl CalculateArgs {
    fn to_input(&self) -> CalculationInput {
        let input = match (self.percent, self.hours) {
            (_, Some(hours)) => CalculationInput::hours(self.base, self.full_time_hours, hours),
            (percent, None) => CalculationInput::percent(
                self.base,
                self.full_time_hours,
                percent.unwrap_or(Decimal::ONE_HUNDRED),
            ),
        };
        let reasons = ShorteningReasons {
            abitur: self.abitur,
            realschule: self.realschule,
            age_over_21: self.age_over_21,
            family_care: self.family_care,
            childcare: self.childcare,
            prior_experience_months: self.prior_experience,
            professional_experience: self.professional_experience,
            unfinished_training: self.unfinished_training.is_some(),
            unfinished_training_months: self.unfinished_training,
        };
        CalculationInput {
            age: self.age,
            ..input.with_reasons(reasons)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match &args.config {
        Some(dir) => {
            info!("Loading rules from {}", dir.display());
            ConfigLoader::load(dir)?
        }
        None => {
            info!("Using statutory rules");
            ConfigLoader::statutory()
        }
    };

    match args.command {
        Some(Command::Calculate(calc)) => {
            let calculator = DurationCalculator::new(config.rules().clone());
            let result = calculator.calculate(&calc.to_input())?;
            println!("{}", result);
            Ok(())
        }
        Some(Command::Serve(serve)) => run_server(config, serve).await,
        None => run_server(config, ServeArgs::default()).await,
    }
}

async fn run_server(
    config: ConfigLoader,
    serve: ServeArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        code = %config.metadata().code,
        version = %config.metadata().version,
        "Initializing Teilzeitrechner"
    );

    let app = create_router(AppState::new(config));

    let addr: std::net::SocketAddr = format!("{}:{}", serve.host, serve.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
