pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::{ApiKeys, AppConfig};
use crate::core::{
    ChartPeriod, MarketDataProvider, NewsProvider, SummarizationProvider, TickerSearchProvider,
};
use anyhow::Result;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info};

/// Arguments of a single stock lookup.
#[derive(Debug, Clone)]
pub struct LookupArgs {
    /// Ticker symbol, or a company name when `search` is set
    pub query: String,
    /// Overrides the configured chart period
    pub period: Option<ChartPeriod>,
    pub search: bool,
    pub summarize: bool,
    pub full_about: bool,
    /// Overrides the configured dividend yield style with percent
    pub percent_yield: bool,
}

#[derive(Debug, Clone)]
pub enum AppCommand {
    Lookup(LookupArgs),
    Search { query: String },
}

/// External services used by the commands, built once from the config.
#[derive(Clone)]
pub struct Providers {
    pub market: Arc<dyn MarketDataProvider>,
    pub search: Arc<dyn TickerSearchProvider>,
    pub news: Arc<dyn NewsProvider>,
    pub summarizer: Arc<dyn SummarizationProvider>,
}

impl Providers {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let yahoo = Arc::new(providers::yahoo_finance::YahooFinanceProvider::new(
            config.providers.yahoo_base_url(),
            config.providers.yahoo_cookie_url(),
        )?);
        let news = providers::news_api::NewsApiProvider::new(
            config.providers.news_base_url(),
            config.api_keys.news.clone(),
            config.effective_news_page_size(),
        )?;
        let summarizer = providers::openai::OpenAiSummarizer::new(
            config.providers.llm_base_url(),
            config.api_keys.llm.clone(),
            &config.providers.llm_model(),
        )?;

        Ok(Providers {
            market: yahoo.clone(),
            search: yahoo,
            news: Arc::new(news),
            summarizer: Arc::new(summarizer),
        })
    }
}

/// Loads the config file and environment keys, then runs `command`.
pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    }
    .with_api_keys(ApiKeys::from_env());

    run_with_config(command, &config).await
}

pub async fn run_with_config(command: AppCommand, config: &AppConfig) -> Result<()> {
    run_with_output(command, config, &mut std::io::stdout()).await
}

/// Runs `command` with the given config, writing the command output to `out`.
pub async fn run_with_output<W: Write>(
    command: AppCommand,
    config: &AppConfig,
    out: &mut W,
) -> Result<()> {
    info!("Ticker View starting...");
    debug!("Loaded config: {config:#?}");

    let providers = Providers::from_config(config)?;

    match command {
        AppCommand::Lookup(args) => cli::lookup::run(&providers, &args, config, out).await,
        AppCommand::Search { query } => {
            cli::search::run(providers.search.clone(), &query, out).await
        }
    }
}
