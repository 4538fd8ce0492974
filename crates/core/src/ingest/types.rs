use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::news::RawNewsItem;

/// `{"raw": 1.0, "fmt": "1.00"}` wrapper used throughout Yahoo payloads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawValue {
    pub raw: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeseriesEnvelope {
    pub timeseries: TimeseriesBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeseriesBody {
    #[serde(default)]
    pub result: Option<Vec<TimeseriesResult>>,
    pub error: Option<Value>,
}

/// One requested series. The data lives under a key named after the series
/// type, so everything besides `meta` is kept as raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeseriesResult {
    pub meta: TimeseriesMeta,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeseriesMeta {
    #[serde(default, rename = "type")]
    pub kind: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeseriesEntry {
    pub as_of_date: NaiveDate,
    pub reported_value: Option<RawValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    pub quote_summary: QuoteSummaryBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummaryBody {
    #[serde(default)]
    pub result: Option<Vec<QuoteSummaryResult>>,
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResult {
    pub price: Option<MarketCapModule>,
    pub summary_detail: Option<MarketCapModule>,
    pub default_key_statistics: Option<KeyStatisticsModule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCapModule {
    pub market_cap: Option<RawValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStatisticsModule {
    pub enterprise_value: Option<RawValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsEnvelope {
    pub data: Option<NewsData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsData {
    pub ticker_stream: Option<NewsStream>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsStream {
    pub stream: Option<Vec<RawNewsItem>>,
}
