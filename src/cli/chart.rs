//! Closing price chart rendered as plain text.

use crate::core::PriceHistory;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

pub const CHART_HEIGHT: u16 = 18;
pub const MAX_CHART_WIDTH: u16 = 110;

/// Y bounds with 5% padding, or a small band around flat series.
fn y_bounds(prices: &[f64]) -> (f64, f64) {
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range <= f64::EPSILON {
        let half = (min.abs() * 0.01).max(1.0);
        return (min - half, max + half);
    }
    let padding = range * 0.05;
    (min - padding, max + padding)
}

/// Renders `history` as a line chart of `width` x `height` cells.
pub fn render_price_chart(history: &PriceHistory, title: &str, width: u16, height: u16) -> String {
    let (Some(first), Some(last)) = (history.keys().next(), history.keys().next_back()) else {
        return "No price data available.".to_string();
    };

    let prices: Vec<f64> = history.values().copied().collect();
    let data: Vec<(f64, f64)> = prices
        .iter()
        .enumerate()
        .map(|(i, &p)| (i as f64, p))
        .collect();
    let x_max = (prices.len().saturating_sub(1)).max(1) as f64;
    let (y_min, y_max) = y_bounds(&prices);

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let x_labels = vec![
        Line::from(first.format("%Y-%m-%d").to_string()),
        Line::from(last.format("%Y-%m-%d").to_string()),
    ];
    let y_labels = vec![
        Line::from(format!("{y_min:.2}")),
        Line::from(format!("{:.2}", (y_min + y_max) / 2.0)),
        Line::from(format!("{y_max:.2}")),
    ];

    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("Date")
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Closing Price")
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    chart.render(area, &mut buf);
    buffer_to_text(&buf)
}

fn buffer_to_text(buf: &Buffer) -> String {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let row: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
