use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tickerview::core::ChartPeriod;
use tickerview::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show price chart, key metrics and recent news for a stock
    Lookup {
        /// Ticker symbol (e.g. AAPL), or a company name with --search
        query: String,

        /// Time range of the price chart: 1y or 5y
        #[arg(short, long)]
        period: Option<ChartPeriod>,

        /// Treat the query as a company name and use the best matching ticker
        #[arg(short, long)]
        search: bool,

        /// Summarize the headlines with the configured LLM
        #[arg(long)]
        summarize: bool,

        /// Show the full company description instead of a preview
        #[arg(long)]
        full_about: bool,

        /// Show the dividend yield with a percent sign
        #[arg(long)]
        percent_yield: bool,
    },
    /// Find ticker symbols matching a company name
    Search {
        /// Free text such as a company name
        query: String,
    },
}

impl From<Commands> for tickerview::AppCommand {
    fn from(cmd: Commands) -> tickerview::AppCommand {
        match cmd {
            Commands::Lookup {
                query,
                period,
                search,
                summarize,
                full_about,
                percent_yield,
            } => tickerview::AppCommand::Lookup(tickerview::LookupArgs {
                query,
                period,
                search,
                summarize,
                full_about,
                percent_yield,
            }),
            Commands::Search { query } => tickerview::AppCommand::Search { query },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => tickerview::cli::setup::setup(),
        Some(cmd) => tickerview::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
