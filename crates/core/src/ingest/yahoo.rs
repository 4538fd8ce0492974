use crate::config::Settings;
use crate::domain::financials::{BalanceSheetPeriod, CompanyInfo, RevenuePoint};
use crate::domain::news::RawNewsItem;
use crate::ingest::provider::MarketDataProvider;
use crate::ingest::types::{
    NewsEnvelope, QuoteSummaryEnvelope, TimeseriesEnvelope, TimeseriesEntry,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const COOKIE_URL: &str = "https://fc.yahoo.com";
const TIMESERIES_PATH: &str = "/ws/fundamentals-timeseries/v1/finance/timeseries";
const QUOTE_SUMMARY_PATH: &str = "/v10/finance/quoteSummary";
const CRUMB_PATH: &str = "/v1/test/getcrumb";
const NEWS_PATH: &str = "/xhr/ncp";
const QUOTE_SUMMARY_MODULES: &str = "price,summaryDetail,defaultKeyStatistics";

// Earliest start Yahoo accepts for fundamentals; it only returns the last few years anyway.
const TIMESERIES_PERIOD_START: i64 = 493_590_046;

const CURRENT_ASSETS: &str = "annualCurrentAssets";
const CURRENT_LIABILITIES: &str = "annualCurrentLiabilities";
const INVENTORY: &str = "annualInventory";
const TOTAL_DEBT: &str = "annualTotalDebt";
const STOCKHOLDERS_EQUITY: &str = "annualStockholdersEquity";
const QUARTERLY_TOTAL_REVENUE: &str = "quarterlyTotalRevenue";

const BALANCE_SHEET_TYPES: [&str; 5] = [
    CURRENT_ASSETS,
    CURRENT_LIABILITIES,
    INVENTORY,
    TOTAL_DEBT,
    STOCKHOLDERS_EQUITY,
];

#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    http: reqwest::Client,
    query_base_url: String,
    web_base_url: String,
    user_agent: String,
    timeout: Duration,
}

impl YahooFinanceClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.data_provider_timeout_secs()?);
        let user_agent = settings
            .data_provider_user_agent
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let http = build_http(&user_agent, timeout, false)?;

        Ok(Self {
            http,
            query_base_url: settings.data_provider_base_url().to_string(),
            web_base_url: settings.data_provider_web_url().to_string(),
            user_agent,
            timeout,
        })
    }

    fn url(base_url: &str, path: &str) -> String {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        format!("{}{}", base_url.trim_end_matches('/'), path)
    }

    /// `{base}{path}/{ticker}` with the ticker percent-encoded as a single
    /// path segment.
    fn symbol_url(base_url: &str, path: &str, ticker: &str) -> Result<String> {
        anyhow::ensure!(
            ticker.chars().any(|c| c != '.'),
            "invalid ticker symbol: {ticker:?}"
        );
        Ok(Self::url(
            base_url,
            &format!("{path}/{}", urlencoding::encode(ticker)),
        ))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        what: &'static str,
    ) -> Result<T> {
        let res = req
            .send()
            .await
            .with_context(|| format!("{what} request failed"))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .with_context(|| format!("failed to read {what} response"))?;
        let raw_json = serde_json::from_str::<Value>(&text)
            .with_context(|| format!("{what} response is not valid JSON: {text}"))?;

        if !status.is_success() {
            anyhow::bail!("{what} HTTP {status}: {raw_json}");
        }

        serde_json::from_value::<T>(raw_json)
            .with_context(|| format!("failed to parse {what} response"))
    }

    async fn fetch_timeseries(
        &self,
        ticker: &str,
        types: &[&str],
    ) -> Result<BTreeMap<String, Vec<(NaiveDate, Option<f64>)>>> {
        let url = Self::symbol_url(&self.query_base_url, TIMESERIES_PATH, ticker)?;
        let period2 = chrono::Utc::now().timestamp();

        let req = self.http.get(url).query(&[
            ("symbol", ticker.to_string()),
            ("type", types.join(",")),
            ("period1", TIMESERIES_PERIOD_START.to_string()),
            ("period2", period2.to_string()),
        ]);
        let envelope: TimeseriesEnvelope = self.send_json(req, "fundamentals timeseries").await?;
        collect_timeseries(envelope)
    }

    /// Yahoo's quoteSummary wants a session cookie plus a matching crumb. The
    /// cookie jar lives only for this call.
    async fn fetch_crumb(&self, http: &reqwest::Client) -> Result<String> {
        // fc.yahoo.com answers 404 but still sets the session cookie.
        http.get(COOKIE_URL)
            .header(REFERER, "https://finance.yahoo.com/")
            .send()
            .await
            .context("provider session cookie request failed")?;

        let res = http
            .get(Self::url(&self.query_base_url, CRUMB_PATH))
            .header(REFERER, "https://finance.yahoo.com/")
            .send()
            .await
            .context("provider crumb request failed")?;
        let status = res.status();
        let body = res.text().await.context("failed to read crumb response")?;
        let crumb = body.trim();

        anyhow::ensure!(status.is_success(), "provider crumb HTTP {status}: {crumb}");
        anyhow::ensure!(
            !crumb.is_empty() && crumb.len() < 100 && !crumb.contains(' ') && !crumb.contains('<'),
            "provider returned an unusable crumb: {crumb}"
        );
        Ok(crumb.to_string())
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for YahooFinanceClient {
    fn provider_name(&self) -> &'static str {
        "yahoo_finance"
    }

    async fn fetch_balance_sheet(&self, ticker: &str) -> Result<Vec<BalanceSheetPeriod>> {
        let series = self.fetch_timeseries(ticker, &BALANCE_SHEET_TYPES).await?;
        let periods = balance_sheet_periods(&series);
        tracing::debug!(%ticker, periods = periods.len(), "fetched balance sheet");
        Ok(periods)
    }

    async fn fetch_quarterly_revenue(&self, ticker: &str) -> Result<Option<Vec<RevenuePoint>>> {
        let series = self
            .fetch_timeseries(ticker, &[QUARTERLY_TOTAL_REVENUE])
            .await?;
        Ok(revenue_points(&series))
    }

    async fn fetch_company_info(&self, ticker: &str) -> Result<CompanyInfo> {
        let session = build_http(&self.user_agent, self.timeout, true)?;
        let crumb = self.fetch_crumb(&session).await?;

        let url = Self::symbol_url(&self.query_base_url, QUOTE_SUMMARY_PATH, ticker)?;
        let req = session
            .get(url)
            .query(&[("modules", QUOTE_SUMMARY_MODULES), ("crumb", crumb.as_str())]);
        let envelope: QuoteSummaryEnvelope = self.send_json(req, "quote summary").await?;
        company_info(envelope)
    }

    async fn fetch_news(&self, ticker: &str, count: usize) -> Result<Vec<RawNewsItem>> {
        let url = Self::url(&self.web_base_url, NEWS_PATH);
        // Some stream entries are ads without a title; ask for headroom.
        let body = serde_json::json!({
            "serviceConfig": {
                "snippetCount": count.saturating_mul(2),
                "s": [ticker],
            }
        });

        let req = self
            .http
            .post(url)
            .query(&[("queryRef", "latestNews"), ("serviceKey", "ncp_fin")])
            .json(&body);
        let envelope: NewsEnvelope = self.send_json(req, "news").await?;

        Ok(envelope
            .data
            .and_then(|d| d.ticker_stream)
            .and_then(|s| s.stream)
            .unwrap_or_default())
    }
}

fn build_http(user_agent: &str, timeout: Duration, cookie_store: bool) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));

    reqwest::Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .cookie_store(cookie_store)
        .build()
        .context("failed to build data provider http client")
}

/// Flattens a timeseries response into `type -> [(asOfDate, value)]`. Series
/// with no data points are left out.
fn collect_timeseries(
    envelope: TimeseriesEnvelope,
) -> Result<BTreeMap<String, Vec<(NaiveDate, Option<f64>)>>> {
    if let Some(err) = envelope.timeseries.error.filter(|e| !e.is_null()) {
        anyhow::bail!("fundamentals timeseries error: {err}");
    }

    let mut out = BTreeMap::new();
    for result in envelope.timeseries.result.unwrap_or_default() {
        let Some(kind) = result.meta.kind.first() else {
            continue;
        };
        let Some(raw) = result.fields.get(kind) else {
            continue;
        };

        let entries = serde_json::from_value::<Vec<Option<TimeseriesEntry>>>(raw.clone())
            .with_context(|| format!("failed to parse timeseries entries for {kind}"))?;
        let points: Vec<_> = entries
            .into_iter()
            .flatten()
            .map(|e| (e.as_of_date, e.reported_value.and_then(|v| v.raw)))
            .collect();

        if !points.is_empty() {
            out.insert(kind.clone(), points);
        }
    }
    Ok(out)
}

fn balance_sheet_periods(
    series: &BTreeMap<String, Vec<(NaiveDate, Option<f64>)>>,
) -> Vec<BalanceSheetPeriod> {
    let mut by_date: BTreeMap<NaiveDate, BalanceSheetPeriod> = BTreeMap::new();
    for (kind, points) in series {
        if !BALANCE_SHEET_TYPES.contains(&kind.as_str()) {
            continue;
        }
        for &(date, value) in points {
            let period = by_date.entry(date).or_insert_with(|| BalanceSheetPeriod {
                as_of_date: Some(date),
                ..Default::default()
            });
            let field = match kind.as_str() {
                CURRENT_ASSETS => &mut period.current_assets,
                CURRENT_LIABILITIES => &mut period.current_liabilities,
                INVENTORY => &mut period.inventory,
                TOTAL_DEBT => &mut period.total_debt,
                STOCKHOLDERS_EQUITY => &mut period.stockholders_equity,
                _ => continue,
            };
            *field = value;
        }
    }

    by_date.into_values().rev().collect()
}

fn revenue_points(
    series: &BTreeMap<String, Vec<(NaiveDate, Option<f64>)>>,
) -> Option<Vec<RevenuePoint>> {
    let points = series.get(QUARTERLY_TOTAL_REVENUE)?;
    Some(
        points
            .iter()
            .map(|&(date, revenue)| RevenuePoint { date, revenue })
            .collect(),
    )
}

fn company_info(envelope: QuoteSummaryEnvelope) -> Result<CompanyInfo> {
    if let Some(err) = envelope.quote_summary.error.filter(|e| !e.is_null()) {
        anyhow::bail!("quote summary error: {err}");
    }

    let result = envelope
        .quote_summary
        .result
        .and_then(|r| r.into_iter().next())
        .unwrap_or_default();

    let market_cap = result
        .price
        .and_then(|m| m.market_cap)
        .and_then(|v| v.raw)
        .or_else(|| {
            result
                .summary_detail
                .and_then(|m| m.market_cap)
                .and_then(|v| v.raw)
        });
    let enterprise_value = result
        .default_key_statistics
        .and_then(|m| m.enterprise_value)
        .and_then(|v| v.raw);

    Ok(CompanyInfo {
        market_cap,
        enterprise_value,
    })
}
