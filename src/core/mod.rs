//! Core business logic abstractions

pub mod config;
pub mod format;
pub mod fundamentals;
pub mod log;
pub mod market;
pub mod metrics;
pub mod news;
pub mod search;
pub mod summary;
pub mod task;

// Re-export main types for cleaner imports
pub use fundamentals::{MetricValue, RawFundamentals};
pub use market::{ChartPeriod, MarketDataProvider, PriceHistory, StockData};
pub use metrics::{DividendYieldStyle, KeyMetrics};
pub use news::{NewsArticle, NewsProvider};
pub use search::{TickerCandidate, TickerSearchProvider};
pub use summary::SummarizationProvider;
pub use task::{FetchTask, TaskState};
