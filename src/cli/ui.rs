use crate::core::FetchTask;
use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Heading,
    Link,
    Error,
    Warning,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Heading => style(text).bold().cyan(),
        StyleType::Link => style(text).blue().underlined(),
        StyleType::Error => style(text).red(),
        StyleType::Warning => style(text).yellow(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Creates a right aligned metric cell. "N/A" values are dimmed.
pub fn metric_cell(text: &str) -> Cell {
    let cell = Cell::new(text).set_alignment(CellAlignment::Right);
    if text.trim_start().ends_with("N/A") {
        cell.fg(Color::DarkGrey)
    } else {
        cell.add_attribute(Attribute::Bold)
    }
}

/// Creates a new `indicatif::ProgressBar` spinner with standard styling.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Shows a spinner until `task` leaves the pending state.
pub async fn await_with_spinner<T>(task: FetchTask<T>, message: &str) -> Result<T>
where
    T: Clone + Send + Sync + 'static,
{
    let pb = new_spinner(message);
    let result = task.wait().await;
    pb.finish_and_clear();
    result
}

/// Terminal width, 80 columns when it cannot be determined.
pub fn term_width() -> usize {
    console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80)
}

/// A separator line matching the terminal width.
pub fn separator() -> String {
    "─".repeat(term_width())
}
