use crate::analysis::error::NoDataError;
use crate::analysis::growth::growth_history_or_sentinel;
use crate::analysis::ratios::calculate_ratios;
use crate::domain::financials::FinancialData;
use crate::ingest::provider::MarketDataProvider;

pub fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

/// Exchange symbols: letters, digits and `.^=-`, at most 20 characters, not
/// made only of dots.
pub fn is_valid_ticker(ticker: &str) -> bool {
    !ticker.is_empty()
        && ticker.len() <= 20
        && ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '^' | '=' | '-'))
        && ticker.chars().any(|c| c != '.')
}

/// Builds the `/finance/{ticker}` payload.
///
/// Errors are `anyhow` errors; a missing balance sheet is a
/// [`NoDataError`] and can be told apart
/// with `downcast_ref`. Revenue growth never fails the report.
pub async fn build_financial_report(
    provider: &dyn MarketDataProvider,
    ticker: &str,
) -> anyhow::Result<FinancialData> {
    let ticker = normalize_ticker(ticker);
    if !is_valid_ticker(&ticker) {
        return Err(NoDataError::new(format!("'{ticker}' is not a valid ticker symbol.")).into());
    }

    let periods = provider.fetch_balance_sheet(&ticker).await?;
    // Unknown symbols come back with an empty balance sheet and a failing
    // quote summary; report them as missing data before touching the latter.
    if periods.is_empty() {
        return Err(NoDataError::new("No financial balance sheet data found.").into());
    }
    let info = provider.fetch_company_info(&ticker).await?;
    let ratios = calculate_ratios(&periods, &info)?;

    let growth = growth_history_or_sentinel(
        &ticker,
        provider.fetch_quarterly_revenue(&ticker).await,
    );

    tracing::info!(
        %ticker,
        provider = provider.provider_name(),
        periods = periods.len(),
        growth_points = growth.quarterly_revenue_growth.as_ref().map(Vec::len),
        "built financial report"
    );

    Ok(FinancialData::assemble(ticker, ratios, growth))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::financials::{BalanceSheetPeriod, CompanyInfo, RevenuePoint};
    use crate::domain::news::RawNewsItem;
    use crate::ingest::provider::MarketDataProvider;
    use anyhow::Result;

    /// Canned provider; `None` in a slot makes that call fail.
    #[derive(Debug, Clone, Default)]
    pub struct StubProvider {
        pub balance_sheet: Option<Vec<BalanceSheetPeriod>>,
        pub revenue: Option<Option<Vec<RevenuePoint>>>,
        pub info: Option<CompanyInfo>,
        pub news: Option<Vec<RawNewsItem>>,
    }

    #[async_trait::async_trait]
    impl MarketDataProvider for StubProvider {
        fn provider_name(&self) -> &'static str {
            "stub"
        }

        async fn fetch_balance_sheet(&self, _ticker: &str) -> Result<Vec<BalanceSheetPeriod>> {
            self.balance_sheet
                .clone()
                .ok_or_else(|| anyhow::anyhow!("balance sheet unavailable"))
        }

        async fn fetch_quarterly_revenue(&self, _ticker: &str) -> Result<Option<Vec<RevenuePoint>>> {
            self.revenue
                .clone()
                .ok_or_else(|| anyhow::anyhow!("revenue unavailable"))
        }

        async fn fetch_company_info(&self, _ticker: &str) -> Result<CompanyInfo> {
            self.info
                .clone()
                .ok_or_else(|| anyhow::anyhow!("company info unavailable"))
        }

        async fn fetch_news(&self, _ticker: &str, _count: usize) -> Result<Vec<RawNewsItem>> {
            self.news
                .clone()
                .ok_or_else(|| anyhow::anyhow!("news unavailable"))
        }
    }
}
