use super::ui;
use crate::core::{FetchTask, TickerCandidate, TickerSearchProvider};
use anyhow::{Result, bail};
use comfy_table::Cell;
use std::io::Write;
use std::sync::Arc;

pub fn display_candidates(candidates: &[TickerCandidate]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Symbol"),
        ui::header_cell("Name"),
        ui::header_cell("Exchange"),
        ui::header_cell("Type"),
    ]);

    for candidate in candidates {
        table.add_row(vec![
            Cell::new(&candidate.symbol),
            Cell::new(&candidate.display_name),
            Cell::new(candidate.exchange.as_deref().unwrap_or("")),
            Cell::new(candidate.quote_type.as_deref().unwrap_or("")),
        ]);
    }

    table.to_string()
}

pub async fn run<W: Write>(
    provider: Arc<dyn TickerSearchProvider>,
    query: &str,
    out: &mut W,
) -> Result<()> {
    let query = query.trim().to_string();
    if query.is_empty() {
        bail!("Search query must not be empty");
    }

    let owned_query = query.clone();
    let task = FetchTask::spawn("search", async move { provider.search(&owned_query).await });

    match ui::await_with_spinner(task, "Searching tickers...").await {
        Ok(candidates) if candidates.is_empty() => {
            writeln!(out, "No tickers found for '{query}'.")?;
        }
        Ok(candidates) => {
            writeln!(
                out,
                "Results for: {}\n",
                ui::style_text(&query, ui::StyleType::Title)
            )?;
            writeln!(out, "{}", display_candidates(&candidates))?;
        }
        Err(e) => {
            writeln!(
                out,
                "{}",
                ui::style_text(&format!("Error searching tickers: {e}"), ui::StyleType::Error)
            )?;
        }
    }

    Ok(())
}
