use super::{chart, ui};
use crate::core::config::AppConfig;
use crate::core::format::truncate;
use crate::core::metrics::{self, DividendYieldStyle, KeyMetrics};
use crate::core::{ChartPeriod, FetchTask, NewsArticle, StockData};
use crate::{LookupArgs, Providers};
use anyhow::{Result, bail};
use comfy_table::Cell;
use std::io::Write;
use tracing::{debug, info};

/// Settings for one lookup, CLI flags applied over the config file.
#[derive(Debug, Clone)]
struct LookupOptions {
    period: ChartPeriod,
    dividend_yield_style: DividendYieldStyle,
    about_preview_chars: usize,
    full_about: bool,
    summarize: bool,
}

impl LookupOptions {
    fn resolve(args: &LookupArgs, config: &AppConfig) -> Self {
        LookupOptions {
            period: args.period.unwrap_or(config.period),
            dividend_yield_style: if args.percent_yield {
                DividendYieldStyle::Percent
            } else {
                config.dividend_yield_style
            },
            about_preview_chars: config.about_preview_chars,
            full_about: args.full_about,
            summarize: args.summarize,
        }
    }
}

impl KeyMetrics {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Metric"),
            ui::header_cell("Value"),
            ui::header_cell("Metric"),
            ui::header_cell("Value"),
        ]);
        table.add_row(vec![
            Cell::new("Current Price"),
            ui::metric_cell(&self.price),
            Cell::new("Market Cap"),
            ui::metric_cell(&self.market_cap),
        ]);
        table.add_row(vec![
            Cell::new("P/E Ratio"),
            ui::metric_cell(&self.pe_ratio),
            Cell::new("Dividend Yield"),
            ui::metric_cell(&self.dividend_yield),
        ]);

        format!(
            "{}\n\n{}",
            ui::style_text("Key Metrics", ui::StyleType::Heading),
            table
        )
    }
}

/// Company description, shortened unless `full` is set.
pub fn render_about(summary: &str, limit: usize, full: bool) -> String {
    let mut output = format!(
        "{}\n\n{}",
        ui::style_text("About", ui::StyleType::Heading),
        truncate(summary, limit, full)
    );
    if !full && summary.chars().count() > limit {
        output.push_str(&format!(
            "\n{}",
            ui::style_text("(use --full-about to show the full description)", ui::StyleType::Subtle)
        ));
    }
    output
}

/// Headline list, or a placeholder when there are no articles.
pub fn render_news(articles: &[NewsArticle]) -> String {
    if articles.is_empty() {
        return "No news articles found.".to_string();
    }

    let mut output = ui::style_text("Recent News Headlines", ui::StyleType::Heading);
    output.push('\n');
    for article in articles {
        output.push_str(&format!(
            "\n{}\n  {}",
            ui::style_text(&article.title, ui::StyleType::Title),
            ui::style_text(&article.url, ui::StyleType::Link)
        ));
        if let Some(description) = article.description.as_deref() {
            output.push_str(&format!(
                "\n  {}",
                ui::style_text(description, ui::StyleType::Subtle)
            ));
        }
        output.push('\n');
    }
    output
}

pub fn render_summary(summary: &str) -> String {
    format!(
        "{}\n\n{}",
        ui::style_text("News Summary", ui::StyleType::Heading),
        summary
    )
}

/// Resolves the query to a ticker symbol, through the search provider when requested.
async fn resolve_symbol<W: Write>(
    providers: &Providers,
    args: &LookupArgs,
    out: &mut W,
) -> Result<Option<String>> {
    let query = args.query.trim();
    if query.is_empty() {
        bail!("Ticker or company name must not be empty");
    }
    if !args.search {
        return Ok(Some(query.to_uppercase()));
    }

    let search = providers.search.clone();
    let owned_query = query.to_string();
    let task = FetchTask::spawn("search", async move { search.search(&owned_query).await });

    match ui::await_with_spinner(task, "Searching tickers...").await {
        Ok(candidates) => match candidates.into_iter().next() {
            Some(candidate) => {
                writeln!(
                    out,
                    "Using {} ({})",
                    ui::style_text(&candidate.symbol, ui::StyleType::Title),
                    candidate.display_name
                )?;
                Ok(Some(candidate.symbol))
            }
            None => {
                writeln!(
                    out,
                    "{}",
                    ui::style_text(
                        &format!("No tickers found for '{query}'."),
                        ui::StyleType::Warning
                    )
                )?;
                Ok(None)
            }
        },
        Err(e) => {
            writeln!(
                out,
                "{}",
                ui::style_text(&format!("Error searching tickers: {e}"), ui::StyleType::Error)
            )?;
            Ok(None)
        }
    }
}

async fn fetch_stock_data<W: Write>(
    providers: &Providers,
    symbol: &str,
    period: ChartPeriod,
    out: &mut W,
) -> Result<Option<StockData>> {
    let market = providers.market.clone();
    let owned_symbol = symbol.to_string();
    let task = FetchTask::spawn("market", async move {
        market.fetch_stock_data(&owned_symbol, period).await
    });

    match ui::await_with_spinner(task, "Fetching stock data...").await {
        Ok(data) => Ok(Some(data)),
        Err(e) => {
            writeln!(
                out,
                "{}",
                ui::style_text(&format!("Error fetching data: {e}"), ui::StyleType::Error)
            )?;
            Ok(None)
        }
    }
}

async fn fetch_news<W: Write>(
    providers: &Providers,
    company_name: &str,
    out: &mut W,
) -> Result<Vec<NewsArticle>> {
    let news = providers.news.clone();
    let owned_name = company_name.to_string();
    let task = FetchTask::spawn("news", async move { news.fetch_headlines(&owned_name).await });

    match ui::await_with_spinner(task, "Fetching recent news...").await {
        Ok(articles) => Ok(articles),
        Err(e) => {
            writeln!(
                out,
                "{}",
                ui::style_text(&format!("Error fetching news: {e}"), ui::StyleType::Warning)
            )?;
            Ok(Vec::new())
        }
    }
}

async fn summarize(providers: &Providers, articles: &[NewsArticle], company_name: &str) -> String {
    let summarizer = providers.summarizer.clone();
    let owned_articles = articles.to_vec();
    let owned_name = company_name.to_string();
    let task = FetchTask::spawn("summary", async move {
        Ok::<_, anyhow::Error>(summarizer.summarize(&owned_articles, &owned_name).await)
    });

    ui::await_with_spinner(task, "Summarizing headlines...")
        .await
        .unwrap_or_else(|e| format!("Error generating summary: {e}"))
}

/// Runs one lookup, writing the dashboard to `out`.
pub async fn run<W: Write>(
    providers: &Providers,
    args: &LookupArgs,
    config: &AppConfig,
    out: &mut W,
) -> Result<()> {
    let options = LookupOptions::resolve(args, config);
    debug!(?options, "Resolved lookup options");

    let Some(symbol) = resolve_symbol(providers, args, out).await? else {
        return Ok(());
    };
    info!(%symbol, period = %options.period, "Looking up stock");

    let Some(data) = fetch_stock_data(providers, &symbol, options.period, out).await? else {
        writeln!(
            out,
            "{}",
            ui::style_text(
                "Failed to retrieve stock data. Please check the ticker symbol.",
                ui::StyleType::Error
            )
        )?;
        return Ok(());
    };

    let company_name = data.fundamentals.company_name(&symbol);
    writeln!(
        out,
        "{}\n",
        ui::style_text(&format!("{company_name} ({symbol})"), ui::StyleType::Title)
    )?;

    // Chart
    writeln!(
        out,
        "{}\n",
        ui::style_text(
            &format!("{} Stock Price Chart", options.period),
            ui::StyleType::Heading
        )
    )?;
    let width = (ui::term_width() as u16).min(chart::MAX_CHART_WIDTH);
    writeln!(
        out,
        "{}",
        chart::render_price_chart(
            &data.history,
            &format!("{symbol} Closing Price ({})", options.period),
            width,
            chart::CHART_HEIGHT,
        )
    )?;

    // Metrics
    let key_metrics = metrics::present(&data.fundamentals, options.dividend_yield_style);
    writeln!(out, "\n{}", key_metrics.display_as_table())?;

    if let Some(about) = data.fundamentals.long_business_summary.as_deref() {
        writeln!(
            out,
            "\n{}",
            render_about(about, options.about_preview_chars, options.full_about)
        )?;
    }

    // News
    writeln!(out, "\n{}", ui::separator())?;
    let articles = fetch_news(providers, &company_name, out).await?;
    writeln!(out, "{}", render_news(&articles))?;

    if options.summarize {
        if articles.is_empty() {
            debug!("No articles, skipping summary");
        } else {
            let summary = summarize(providers, &articles, &company_name).await;
            writeln!(out, "{}", render_summary(&summary))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> LookupArgs {
        LookupArgs {
            query: "aapl".to_string(),
            period: None,
            search: false,
            summarize: false,
            full_about: false,
            percent_yield: false,
        }
    }

    #[test]
    fn test_options_fall_back_to_config() {
        let mut config = AppConfig::default();
        config.period = ChartPeriod::FiveYears;
        config.dividend_yield_style = DividendYieldStyle::Percent;

        let options = LookupOptions::resolve(&args(), &config);
        assert_eq!(options.period, ChartPeriod::FiveYears);
        assert_eq!(options.dividend_yield_style, DividendYieldStyle::Percent);
        assert_eq!(options.about_preview_chars, 300);
    }

    #[test]
    fn test_cli_flags_override_config() {
        let mut lookup = args();
        lookup.period = Some(ChartPeriod::FiveYears);
        lookup.percent_yield = true;

        let options = LookupOptions::resolve(&lookup, &AppConfig::default());
        assert_eq!(options.period, ChartPeriod::FiveYears);
        assert_eq!(options.dividend_yield_style, DividendYieldStyle::Percent);
    }

    #[test]
    fn test_render_news_placeholder() {
        assert_eq!(render_news(&[]), "No news articles found.");
    }

    #[test]
    fn test_render_news_lists_articles() {
        console::set_colors_enabled(false);
        let articles = vec![
            NewsArticle {
                title: "Apple beats estimates".to_string(),
                url: "https://news.example.com/1".to_string(),
                description: Some("Revenue grew".to_string()),
            },
            NewsArticle {
                title: "Apple event".to_string(),
                url: "https://news.example.com/2".to_string(),
                description: None,
            },
        ];

        let output = render_news(&articles);
        assert!(output.contains("Apple beats estimates\n  https://news.example.com/1\n  Revenue grew"));
        assert!(output.contains("Apple event\n  https://news.example.com/2\n"));
    }

    #[test]
    fn test_render_about_preview() {
        console::set_colors_enabled(false);
        let output = render_about("Apple designs phones and computers.", 12, false);
        assert!(output.contains("Apple design..."));
        assert!(output.contains("--full-about"));

        let full = render_about("Apple designs phones and computers.", 12, true);
        assert!(full.contains("Apple designs phones and computers."));
        assert!(!full.contains("--full-about"));
    }

    #[test]
    fn test_metrics_table_contains_values() {
        let table = KeyMetrics {
            price: "USD 150.25".to_string(),
            pe_ratio: "N/A".to_string(),
            market_cap: "USD 2.50T".to_string(),
            dividend_yield: "0.5".to_string(),
        }
        .display_as_table();

        for text in ["Current Price", "USD 150.25", "P/E Ratio", "USD 2.50T", "Dividend Yield"] {
            assert!(table.contains(text), "missing {text}");
        }
    }
}
