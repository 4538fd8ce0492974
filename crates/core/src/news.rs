use crate::analysis::error::UpstreamUnavailable;
use crate::domain::news::{HeadlineItem, RawNewsItem};
use crate::ingest::provider::MarketDataProvider;

pub const DEFAULT_LIMIT: usize = 5;
pub const MAX_LIMIT: usize = 10;

const DEFAULT_SUMMARY: &str = "No summary provided by the source.";
const DEFAULT_LINK: &str = "#";
const DEFAULT_PUBLISHER: &str = "Unknown";
const DEFAULT_PUBLISH_DATE: &str = "1970-01-01T00:00:00Z";

/// Checks a caller-supplied headline limit against `1..=MAX_LIMIT`.
pub fn validate_limit(limit: Option<usize>) -> anyhow::Result<usize> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    anyhow::ensure!(
        (1..=MAX_LIMIT).contains(&limit),
        "limit must be between 1 and {MAX_LIMIT} (got {limit})"
    );
    Ok(limit)
}

/// Normalizes raw provider items, skipping anything without a title, and
/// keeps at most `limit` headlines.
pub fn format_headlines(raw: Vec<RawNewsItem>, limit: usize) -> Vec<HeadlineItem> {
    raw.into_iter()
        .filter_map(format_item)
        .take(limit)
        .collect()
}

fn format_item(item: RawNewsItem) -> Option<HeadlineItem> {
    let content = item.content?;
    let title = content.title.filter(|t| !t.trim().is_empty())?;

    let thumbnail_url = content
        .thumbnail
        .and_then(|t| t.resolutions)
        .and_then(|r| r.into_iter().next())
        .and_then(|r| r.url);

    Some(HeadlineItem {
        title,
        summary: content
            .summary
            .unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
        link: content
            .canonical_url
            .and_then(|u| u.url)
            .unwrap_or_else(|| DEFAULT_LINK.to_string()),
        publisher: content
            .provider
            .and_then(|p| p.display_name)
            .unwrap_or_else(|| DEFAULT_PUBLISHER.to_string()),
        publish_date: content
            .pub_date
            .unwrap_or_else(|| DEFAULT_PUBLISH_DATE.to_string()),
        thumbnail_url,
    })
}

pub async fn fetch_headlines(
    provider: &dyn MarketDataProvider,
    ticker: &str,
    limit: usize,
) -> Result<Vec<HeadlineItem>, UpstreamUnavailable> {
    match provider.fetch_news(ticker, limit).await {
        Ok(raw) => Ok(format_headlines(raw, limit)),
        Err(err) => {
            tracing::error!(%ticker, provider = provider.provider_name(), error = %err, "news retrieval failed");
            Err(UpstreamUnavailable {
                ticker: ticker.to_string(),
                detail: format!("{err:#}"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(v: serde_json::Value) -> Vec<RawNewsItem> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn formats_complete_item() {
        let items = raw(json!([
            {
                "id": "a1",
                "content": {
                    "title": "Apple beats estimates",
                    "summary": "Strong iPhone quarter.",
                    "pubDate": "2026-01-29T21:30:00Z",
                    "canonicalUrl": {"url": "https://example.com/a1"},
                    "provider": {"displayName": "Reuters"},
                    "thumbnail": {"resolutions": [{"url": "https://img/1.jpg"}, {"url": "https://img/2.jpg"}]}
                }
            }
        ]));

        let out = format_headlines(items, 5);
        assert_eq!(
            out,
            vec![HeadlineItem {
                title: "Apple beats estimates".to_string(),
                summary: "Strong iPhone quarter.".to_string(),
                link: "https://example.com/a1".to_string(),
                publisher: "Reuters".to_string(),
                publish_date: "2026-01-29T21:30:00Z".to_string(),
                thumbnail_url: Some("https://img/1.jpg".to_string()),
            }]
        );
    }

    #[test]
    fn fills_defaults_for_missing_fields() {
        let items = raw(json!([
            {"content": {"title": "Bare", "thumbnail": null, "provider": {}}}
        ]));

        let out = format_headlines(items, 5);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].summary, DEFAULT_SUMMARY);
        assert_eq!(out[0].link, "#");
        assert_eq!(out[0].publisher, "Unknown");
        assert_eq!(out[0].publish_date, "1970-01-01T00:00:00Z");
        assert_eq!(out[0].thumbnail_url, None);
    }

    #[test]
    fn skips_items_without_title_or_content() {
        let items = raw(json!([
            {"id": "no-content"},
            {"content": null},
            {"content": {"summary": "untitled"}},
            {"content": {"title": "   "}},
            {"content": {"title": "Kept"}}
        ]));

        let out = format_headlines(items, 5);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Kept");
    }

    #[test]
    fn truncates_to_limit_after_filtering() {
        let items = raw(json!([
            {"content": {}},
            {"content": {"title": "one"}},
            {"content": {"title": "two"}},
            {"content": {"title": "three"}}
        ]));

        let out = format_headlines(items, 2);
        let titles: Vec<_> = out.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "two"]);
    }

    #[test]
    fn limit_defaults_and_bounds() {
        assert_eq!(validate_limit(None).unwrap(), 5);
        assert_eq!(validate_limit(Some(1)).unwrap(), 1);
        assert_eq!(validate_limit(Some(10)).unwrap(), 10);
        assert!(validate_limit(Some(0)).is_err());
        assert!(validate_limit(Some(11)).is_err());
    }

    #[tokio::test]
    async fn provider_failure_is_upstream_unavailable() {
        let provider = crate::report::test_support::StubProvider::default();
        let err = fetch_headlines(&provider, "AAPL", 5).await.unwrap_err();
        assert_eq!(err.ticker, "AAPL");
        assert!(err.detail.contains("news unavailable"));
    }

    #[tokio::test]
    async fn fetch_formats_provider_items() {
        let provider = crate::report::test_support::StubProvider {
            news: Some(raw(json!([
                {"content": {"title": "a"}},
                {"content": {"title": "b"}}
            ]))),
            ..Default::default()
        };
        let out = fetch_headlines(&provider, "AAPL", 1).await.unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "a");
    }
}
