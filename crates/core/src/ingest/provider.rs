use crate::domain::financials::{BalanceSheetPeriod, CompanyInfo, RevenuePoint};
use crate::domain::news::RawNewsItem;
use anyhow::Result;

/// Upstream market data source. Implementations do no retrying; a failed
/// call surfaces immediately.
#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Annual balance-sheet periods, most recent first. May be empty.
    async fn fetch_balance_sheet(&self, ticker: &str) -> Result<Vec<BalanceSheetPeriod>>;

    /// Quarterly total revenue in any order, or `None` when the provider has
    /// no revenue row for the ticker.
    async fn fetch_quarterly_revenue(&self, ticker: &str) -> Result<Option<Vec<RevenuePoint>>>;

    async fn fetch_company_info(&self, ticker: &str) -> Result<CompanyInfo>;

    async fn fetch_news(&self, ticker: &str, count: usize) -> Result<Vec<RawNewsItem>>;
}
