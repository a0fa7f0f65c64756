use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::{StatusCode, Url, header};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::util::{http_client, read_json};
use crate::core::{
    ChartPeriod, MarketDataProvider, PriceHistory, RawFundamentals, StockData, TickerCandidate,
    TickerSearchProvider,
};

/// quoteSummary modules merged into the fundamentals map, highest priority first.
const SUMMARY_MODULES: [&str; 4] = ["financialData", "summaryDetail", "price", "assetProfile"];

const SEARCH_RESULTS: usize = 10;

/// The cookie and crumb endpoints turn away non-browser agents.
const BROWSER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

fn extract_history(item: &ChartItem) -> PriceHistory {
    let mut history = PriceHistory::new();

    let (Some(timestamps), Some(closes)) = (
        item.timestamp.as_ref(),
        item.indicators
            .as_ref()
            .and_then(|inds| inds.quote.first())
            .and_then(|q| q.close.as_ref()),
    ) else {
        return history;
    };

    for (ts, close) in timestamps.iter().zip(closes) {
        let (Some(close), Some(dt)) = (close, Utc.timestamp_opt(*ts, 0).single()) else {
            continue;
        };
        history.insert(dt.date_naive(), *close);
    }

    history
}

/// Flattens the quoteSummary modules and the chart meta into one field map.
///
/// Fields already present are never overwritten, so the module order decides
/// which source wins when several report the same field.
fn merge_fields(
    summary: Option<&HashMap<String, Value>>,
    meta: &HashMap<String, Value>,
) -> HashMap<String, Value> {
    let mut fields = HashMap::new();

    if let Some(summary) = summary {
        for module in SUMMARY_MODULES {
            if let Some(Value::Object(module_fields)) = summary.get(module) {
                for (key, value) in module_fields {
                    fields.entry(key.clone()).or_insert_with(|| value.clone());
                }
            }
        }
    }

    for (key, value) in meta {
        fields.entry(key.clone()).or_insert_with(|| value.clone());
    }
    if let Some(price) = meta.get("regularMarketPrice") {
        fields
            .entry("currentPrice".to_string())
            .or_insert_with(|| price.clone());
    }

    fields
}

/// Cookie and crumb pair that authorizes quoteSummary requests.
#[derive(Debug, Clone)]
struct YahooSession {
    cookie: String,
    crumb: String,
}

pub struct YahooFinanceProvider {
    base_url: String,
    cookie_url: String,
    client: reqwest::Client,
    session: Mutex<Option<YahooSession>>,
}

impl YahooFinanceProvider {
    pub fn new(base_url: &str, cookie_url: &str) -> Result<Self> {
        Ok(YahooFinanceProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            cookie_url: cookie_url.to_string(),
            client: http_client()?,
            session: Mutex::new(None),
        })
    }

    /// Builds `{base_url}/{segments...}?{params}`. Every segment is encoded as a single path segment.
    fn endpoint(&self, segments: &[&str], params: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid Yahoo Finance base URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Invalid Yahoo Finance base URL: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    /// Returns the cached session, fetching a new one on first use.
    async fn session(&self) -> Result<YahooSession> {
        let mut session = self.session.lock().await;
        if let Some(existing) = session.as_ref() {
            return Ok(existing.clone());
        }

        let fresh = self.fetch_session().await?;
        *session = Some(fresh.clone());
        Ok(fresh)
    }

    async fn fetch_session(&self) -> Result<YahooSession> {
        debug!("Requesting session cookie from {}", self.cookie_url);

        // The cookie page answers with an error status but still sets the cookie
        let response = self
            .client
            .get(&self.cookie_url)
            .header(header::USER_AGENT, BROWSER_AGENT)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for Yahoo session cookie", e))?;

        let cookie = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .collect::<Vec<_>>()
            .join("; ");
        if cookie.is_empty() {
            bail!("No session cookie received from {}", self.cookie_url);
        }

        let url = self.endpoint(&["v1", "test", "getcrumb"], &[])?;
        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, BROWSER_AGENT)
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for Yahoo crumb", e))?;

        let status = response.status();
        if !status.is_success() {
            bail!("HTTP error: {} for Yahoo crumb", status);
        }
        let crumb = response.text().await?.trim().to_string();
        if crumb.is_empty() {
            bail!("Empty crumb received from Yahoo Finance");
        }
        debug!("Obtained Yahoo session");

        Ok(YahooSession { cookie, crumb })
    }

    async fn fetch_chart(&self, symbol: &str, period: ChartPeriod) -> Result<ChartItem> {
        let url = self.endpoint(
            &["v8", "finance", "chart", symbol],
            &[("interval", "1d"), ("range", period.as_range())],
        )?;
        debug!("Requesting price history from {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for symbol: {} URL: {}", e, symbol, url))?;

        let data: YahooChartResponse = read_json(response, &format!("symbol: {symbol}")).await?;
        data.chart
            .result
            .and_then(|items| items.into_iter().next())
            .ok_or_else(|| anyhow!("No price data found for symbol: {}", symbol))
    }

    async fn fetch_summary(&self, symbol: &str) -> Result<Option<HashMap<String, Value>>> {
        let session = self.session().await?;
        let modules = SUMMARY_MODULES.join(",");
        let url = self.endpoint(
            &["v10", "finance", "quoteSummary", symbol],
            &[("modules", modules.as_str()), ("crumb", session.crumb.as_str())],
        )?;
        debug!("Requesting fundamentals for {}", symbol);

        let response = self
            .client
            .get(url)
            .header(header::COOKIE, &session.cookie)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for fundamentals of {}", e, symbol))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            debug!("Yahoo session rejected, it is refreshed on the next request");
            self.session.lock().await.take();
        }

        let data: YahooQuoteSummaryResponse =
            read_json(response, &format!("fundamentals of {symbol}")).await?;
        Ok(data
            .quote_summary
            .result
            .and_then(|items| items.into_iter().next()))
    }
}

#[derive(Deserialize, Debug)]
struct YahooChartResponse {
    chart: ChartResult,
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    result: Option<Vec<ChartItem>>,
}

#[derive(Deserialize, Debug)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Deserialize, Debug)]
struct Quote {
    close: Option<Vec<Option<f64>>>,
}

#[derive(Deserialize, Debug)]
struct ChartItem {
    #[serde(default)]
    meta: HashMap<String, Value>,
    timestamp: Option<Vec<i64>>,
    indicators: Option<Indicators>,
}

#[derive(Deserialize, Debug)]
struct YahooQuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummary,
}

#[derive(Deserialize, Debug)]
struct QuoteSummary {
    result: Option<Vec<HashMap<String, Value>>>,
}

#[async_trait]
impl MarketDataProvider for YahooFinanceProvider {
    #[instrument(
        name = "YahooStockFetch",
        skip(self),
        fields(symbol = %symbol, period = %period)
    )]
    async fn fetch_stock_data(&self, symbol: &str, period: ChartPeriod) -> Result<StockData> {
        let (chart, summary) = tokio::join!(
            self.fetch_chart(symbol, period),
            self.fetch_summary(symbol)
        );
        let chart = chart?;

        // Fundamentals degrade to what the chart meta carries
        let summary = summary.unwrap_or_else(|e| {
            warn!(error = %e, "Fundamentals unavailable for {}", symbol);
            None
        });

        let fields = merge_fields(summary.as_ref(), &chart.meta);
        let result = StockData {
            history: extract_history(&chart),
            fundamentals: RawFundamentals::from_fields(&fields),
        };
        debug!(points = result.history.len(), "Parsed price history");

        Ok(result)
    }
}

#[derive(Deserialize, Debug)]
struct YahooSearchResponse {
    #[serde(default)]
    quotes: Vec<SearchQuote>,
}

#[derive(Deserialize, Debug)]
struct SearchQuote {
    symbol: Option<String>,
    shortname: Option<String>,
    longname: Option<String>,
    #[serde(rename = "exchDisp")]
    exchange: Option<String>,
    #[serde(rename = "quoteType")]
    quote_type: Option<String>,
}

#[async_trait]
impl TickerSearchProvider for YahooFinanceProvider {
    #[instrument(name = "YahooSearch", skip(self), fields(query = %query))]
    async fn search(&self, query: &str) -> Result<Vec<TickerCandidate>> {
        let quotes_count = SEARCH_RESULTS.to_string();
        let url = self.endpoint(
            &["v1", "finance", "search"],
            &[
                ("q", query),
                ("quotesCount", quotes_count.as_str()),
                ("newsCount", "0"),
            ],
        )?;
        debug!("Searching tickers at {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for query: {}", e, query))?;

        let data: YahooSearchResponse = read_json(response, &format!("query: {query}")).await?;
        let candidates = data
            .quotes
            .into_iter()
            .filter_map(|q| {
                let symbol = q.symbol?;
                let display_name = q
                    .longname
                    .or(q.shortname)
                    .unwrap_or_else(|| symbol.clone());
                Some(TickerCandidate {
                    display_name,
                    symbol,
                    exchange: q.exchange,
                    quote_type: q.quote_type,
                })
            })
            .collect();

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MetricValue;
    use chrono::NaiveDate;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SESSION_COOKIE: &str = "A3=d=AQABBGtest";
    const CRUMB: &str = "Xy7.crumb/1";

    const CHART_RESPONSE: &str = r#"{
        "chart": {
            "result": [{
                "meta": {
                    "currency": "USD",
                    "symbol": "AAPL",
                    "regularMarketPrice": 150.25,
                    "longName": "Apple Inc.",
                    "shortName": "Apple"
                },
                "timestamp": [1704205800, 1704292200, 1704378600],
                "indicators": {
                    "quote": [{
                        "close": [185.64, null, 181.91]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    const SUMMARY_RESPONSE: &str = r#"{
        "quoteSummary": {
            "result": [{
                "financialData": {
                    "currentPrice": {"raw": 151.5, "fmt": "151.50"}
                },
                "summaryDetail": {
                    "marketCap": {"raw": 2500000000000, "fmt": "2.5T"},
                    "trailingPE": {"raw": 28.5, "fmt": "28.50"},
                    "dividendYield": {"raw": 0.5, "fmt": "0.50%"},
                    "currency": "USD"
                },
                "price": {
                    "longName": "Apple Inc.",
                    "shortName": "Apple Inc.",
                    "marketCap": {"raw": 1, "fmt": "1"}
                },
                "assetProfile": {
                    "longBusinessSummary": "Apple Inc. designs smartphones."
                }
            }],
            "error": null
        }
    }"#;

    async fn mount_session(mock_server: &MockServer, expected_crumb_calls: Option<u64>) {
        Mock::given(method("GET"))
            .and(path("/cookie"))
            .respond_with(ResponseTemplate::new(404).insert_header(
                "set-cookie",
                format!("{SESSION_COOKIE}; Path=/; Domain=.yahoo.com; HttpOnly").as_str(),
            ))
            .mount(mock_server)
            .await;

        let crumb = Mock::given(method("GET"))
            .and(path("/v1/test/getcrumb"))
            .and(header("cookie", SESSION_COOKIE))
            .respond_with(ResponseTemplate::new(200).set_body_string(CRUMB));
        match expected_crumb_calls {
            Some(calls) => crumb.expect(calls).mount(mock_server).await,
            None => crumb.mount(mock_server).await,
        }
    }

    fn provider_for(mock_server: &MockServer) -> YahooFinanceProvider {
        let uri = mock_server.uri();
        YahooFinanceProvider::new(&uri, &format!("{uri}/cookie")).unwrap()
    }

    pub async fn create_mock_server(
        symbol: &str,
        chart_status: u16,
        chart_body: &str,
        summary_status: u16,
        summary_body: &str,
    ) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/v8/finance/chart/{symbol}")))
            .and(query_param("interval", "1d"))
            .respond_with(ResponseTemplate::new(chart_status).set_body_string(chart_body))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("/v10/finance/quoteSummary/{symbol}")))
            .and(query_param("crumb", CRUMB))
            .and(header("cookie", SESSION_COOKIE))
            .respond_with(ResponseTemplate::new(summary_status).set_body_string(summary_body))
            .mount(&mock_server)
            .await;

        mount_session(&mock_server, None).await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_stock_fetch() {
        let mock_server =
            create_mock_server("AAPL", 200, CHART_RESPONSE, 200, SUMMARY_RESPONSE).await;

        let provider = provider_for(&mock_server);
        let data = provider
            .fetch_stock_data("AAPL", ChartPeriod::OneYear)
            .await
            .unwrap();

        assert_eq!(data.history.len(), 2);
        assert_eq!(
            data.history.get(&NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
            Some(&185.64)
        );
        assert_eq!(
            data.history.get(&NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()),
            Some(&181.91)
        );

        let f = data.fundamentals;
        assert_eq!(f.current_price, Some(MetricValue::Float(151.5)));
        assert_eq!(f.market_cap, Some(MetricValue::Integer(2_500_000_000_000)));
        assert_eq!(f.trailing_pe, Some(MetricValue::Float(28.5)));
        assert_eq!(f.dividend_yield, Some(MetricValue::Float(0.5)));
        assert_eq!(f.currency.as_deref(), Some("USD"));
        assert_eq!(f.long_name.as_deref(), Some("Apple Inc."));
        assert_eq!(
            f.long_business_summary.as_deref(),
            Some("Apple Inc. designs smartphones.")
        );
    }

    #[tokio::test]
    async fn test_period_is_sent_as_range() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/MSFT"))
            .and(query_param("range", "5y"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CHART_RESPONSE))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let result = provider
            .fetch_stock_data("MSFT", ChartPeriod::FiveYears)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_fundamentals_fall_back_to_chart_meta() {
        let mock_server = create_mock_server("AAPL", 200, CHART_RESPONSE, 401, "{}").await;

        let provider = provider_for(&mock_server);
        let data = provider
            .fetch_stock_data("AAPL", ChartPeriod::OneYear)
            .await
            .unwrap();

        let f = data.fundamentals;
        assert_eq!(f.current_price, Some(MetricValue::Float(150.25)));
        assert_eq!(f.currency.as_deref(), Some("USD"));
        assert_eq!(f.short_name.as_deref(), Some("Apple"));
        assert_eq!(f.market_cap, None);
        assert_eq!(f.trailing_pe, None);
    }

    #[tokio::test]
    async fn test_no_price_result_data() {
        let mock_response = r#"{"chart": {"result": []}}"#;
        let mock_server =
            create_mock_server("INVALID", 200, mock_response, 200, SUMMARY_RESPONSE).await;

        let provider = provider_for(&mock_server);
        let result = provider
            .fetch_stock_data("INVALID", ChartPeriod::OneYear)
            .await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "No price data found for symbol: INVALID"
        );
    }

    #[tokio::test]
    async fn test_chart_http_error() {
        let body = r#"{"chart": {"result": null, "error": {"code": "Not Found"}}}"#;
        let mock_server = create_mock_server("NOPE", 404, body, 404, body).await;

        let provider = provider_for(&mock_server);
        let result = provider.fetch_stock_data("NOPE", ChartPeriod::OneYear).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 404 Not Found for symbol: NOPE"
        );
    }

    #[tokio::test]
    async fn test_malformed_chart_response() {
        let mock_server =
            create_mock_server("AAPL", 200, r#"{"charts": []}"#, 200, SUMMARY_RESPONSE).await;

        let provider = provider_for(&mock_server);
        let result = provider.fetch_stock_data("AAPL", ChartPeriod::OneYear).await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse JSON response for symbol: AAPL")
        );
    }

    #[tokio::test]
    async fn test_search_candidates() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{
            "quotes": [
                {"symbol": "AAPL", "shortname": "Apple Inc.", "longname": "Apple Inc.", "exchDisp": "NASDAQ", "quoteType": "EQUITY"},
                {"symbol": "APLE", "shortname": "Apple Hospitality REIT"},
                {"index": "news-only"},
                {"symbol": "AAPL.MX"}
            ],
            "news": []
        }"#;

        Mock::given(method("GET"))
            .and(path("/v1/finance/search"))
            .and(query_param("q", "apple"))
            .and(query_param("newsCount", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let candidates = provider.search("apple").await.unwrap();

        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].symbol, "AAPL");
        assert_eq!(candidates[0].display_name, "Apple Inc.");
        assert_eq!(candidates[0].exchange.as_deref(), Some("NASDAQ"));
        assert_eq!(candidates[1].display_name, "Apple Hospitality REIT");
        assert_eq!(candidates[2].display_name, "AAPL.MX");
    }

    #[tokio::test]
    async fn test_search_without_quotes() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/finance/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"news": []}"#))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        assert!(provider.search("zzzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fundamentals_request_carries_session() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CHART_RESPONSE))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v10/finance/quoteSummary/AAPL"))
            .and(query_param("crumb", CRUMB))
            .and(query_param(
                "modules",
                "financialData,summaryDetail,price,assetProfile",
            ))
            .and(header("cookie", SESSION_COOKIE))
            .respond_with(ResponseTemplate::new(200).set_body_string(SUMMARY_RESPONSE))
            .expect(2)
            .mount(&mock_server)
            .await;
        mount_session(&mock_server, Some(1)).await;

        let provider = provider_for(&mock_server);
        for _ in 0..2 {
            let data = provider
                .fetch_stock_data("AAPL", ChartPeriod::OneYear)
                .await
                .unwrap();
            assert_eq!(
                data.fundamentals.market_cap,
                Some(MetricValue::Integer(2_500_000_000_000))
            );
        }
    }

    #[tokio::test]
    async fn test_rejected_session_is_refreshed() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CHART_RESPONSE))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v10/finance/quoteSummary/AAPL"))
            .respond_with(ResponseTemplate::new(401).set_body_string("{}"))
            .expect(2)
            .mount(&mock_server)
            .await;
        mount_session(&mock_server, Some(2)).await;

        let provider = provider_for(&mock_server);
        for _ in 0..2 {
            let data = provider
                .fetch_stock_data("AAPL", ChartPeriod::OneYear)
                .await
                .unwrap();
            assert_eq!(data.fundamentals.market_cap, None);
        }
    }

    #[tokio::test]
    async fn test_missing_session_cookie_falls_back_to_chart_meta() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CHART_RESPONSE))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cookie"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v10/finance/quoteSummary/AAPL"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SUMMARY_RESPONSE))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let data = provider
            .fetch_stock_data("AAPL", ChartPeriod::OneYear)
            .await
            .unwrap();
        assert_eq!(data.fundamentals.current_price, Some(MetricValue::Float(150.25)));
        assert_eq!(data.fundamentals.market_cap, None);
    }

    #[test]
    fn test_symbol_stays_one_path_segment() {
        let provider =
            YahooFinanceProvider::new("http://localhost:1234/", "http://localhost:1234/cookie")
                .unwrap();

        let url = provider
            .endpoint(&["v8", "finance", "chart", "BRK/B"], &[("range", "1y")])
            .unwrap();
        assert_eq!(url.path(), "/v8/finance/chart/BRK%2FB");
        assert_eq!(url.query(), Some("range=1y"));

        let url = provider
            .endpoint(&["v8", "finance", "chart", "A?B#C"], &[])
            .unwrap();
        assert_eq!(url.path(), "/v8/finance/chart/A%3FB%23C");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let provider =
            YahooFinanceProvider::new("http://example.com/yahoo", "http://example.com/cookie")
                .unwrap();
        let url = provider
            .endpoint(&["v1", "finance", "search"], &[("q", "apple")])
            .unwrap();
        assert_eq!(url.as_str(), "http://example.com/yahoo/v1/finance/search?q=apple");
    }

    #[test]
    fn test_merge_prefers_summary_over_meta() {
        let summary: HashMap<String, Value> = serde_json::from_str(
            r#"{"price": {"currency": "EUR", "longName": "SAP SE"}}"#,
        )
        .unwrap();
        let meta: HashMap<String, Value> =
            serde_json::from_str(r#"{"currency": "USD", "regularMarketPrice": 10.5}"#).unwrap();

        let fields = merge_fields(Some(&summary), &meta);
        assert_eq!(fields["currency"], Value::from("EUR"));
        assert_eq!(fields["longName"], Value::from("SAP SE"));
        assert_eq!(fields["currentPrice"], Value::from(10.5));
    }
}
