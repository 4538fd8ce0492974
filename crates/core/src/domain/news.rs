use serde::{Deserialize, Serialize};

/// News item as returned by the provider. Every field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawNewsItem {
    pub id: Option<String>,
    pub content: Option<RawNewsContent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNewsContent {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub pub_date: Option<String>,
    pub canonical_url: Option<RawUrl>,
    pub provider: Option<RawNewsProvider>,
    pub thumbnail: Option<RawThumbnail>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawUrl {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNewsProvider {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawThumbnail {
    pub resolutions: Option<Vec<RawUrl>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineItem {
    pub title: String,
    pub summary: String,
    pub link: String,
    pub publisher: String,
    pub publish_date: String,
    pub thumbnail_url: Option<String>,
}

/// Response body of `GET /news/{ticker}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockNewsResponse {
    pub ticker: String,
    pub count: usize,
    pub latest_headlines: Vec<HeadlineItem>,
}

impl StockNewsResponse {
    pub fn new(ticker: String, latest_headlines: Vec<HeadlineItem>) -> Self {
        Self {
            ticker,
            count: latest_headlines.len(),
            latest_headlines,
        }
    }
}
