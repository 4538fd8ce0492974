use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One reporting period of balance-sheet fields. Missing fields read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetPeriod {
    pub as_of_date: Option<NaiveDate>,
    pub current_assets: Option<f64>,
    pub current_liabilities: Option<f64>,
    pub inventory: Option<f64>,
    pub total_debt: Option<f64>,
    pub stockholders_equity: Option<f64>,
}

impl BalanceSheetPeriod {
    pub fn current_assets(&self) -> f64 {
        self.current_assets.unwrap_or(0.0)
    }

    pub fn current_liabilities(&self) -> f64 {
        self.current_liabilities.unwrap_or(0.0)
    }

    pub fn inventory(&self) -> f64 {
        self.inventory.unwrap_or(0.0)
    }

    pub fn total_debt(&self) -> f64 {
        self.total_debt.unwrap_or(0.0)
    }

    pub fn stockholders_equity(&self) -> f64 {
        self.stockholders_equity.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub date: NaiveDate,
    pub revenue: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub market_cap: Option<f64>,
    pub enterprise_value: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPair {
    pub current_value: Option<f64>,
    pub previous_value: Option<f64>,
}

impl ComparisonPair {
    pub fn new(current_value: Option<f64>, previous_value: Option<f64>) -> Self {
        Self {
            current_value,
            previous_value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioSet {
    pub current_ratio: ComparisonPair,
    pub quick_ratio: ComparisonPair,
    pub debt_to_equity: ComparisonPair,
    pub market_cap: ComparisonPair,
}

/// Quarter-over-quarter revenue growth. Both fields are `None` when the
/// provider had no revenue data at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthHistory {
    pub report_dates: Option<Vec<String>>,
    pub quarterly_revenue_growth: Option<Vec<Option<f64>>>,
}

impl GrowthHistory {
    pub fn no_data() -> Self {
        Self::default()
    }

    pub fn is_no_data(&self) -> bool {
        self.report_dates.is_none() && self.quarterly_revenue_growth.is_none()
    }
}

/// Response body of `GET /finance/{ticker}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialData {
    pub ticker: String,
    pub current_ratio: ComparisonPair,
    pub quick_ratio: ComparisonPair,
    pub debt_to_equity: ComparisonPair,
    pub market_cap: ComparisonPair,
    pub report_dates: Option<Vec<String>>,
    pub quarterly_revenue_growth: Option<Vec<Option<f64>>>,
}

impl FinancialData {
    pub fn assemble(ticker: String, ratios: RatioSet, growth: GrowthHistory) -> Self {
        Self {
            ticker,
            current_ratio: ratios.current_ratio,
            quick_ratio: ratios.quick_ratio,
            debt_to_equity: ratios.debt_to_equity,
            market_cap: ratios.market_cap,
            report_dates: growth.report_dates,
            quarterly_revenue_growth: growth.quarterly_revenue_growth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_read_as_zero() {
        let p = BalanceSheetPeriod {
            current_assets: Some(10.0),
            ..Default::default()
        };
        assert_eq!(p.current_assets(), 10.0);
        assert_eq!(p.current_liabilities(), 0.0);
        assert_eq!(p.inventory(), 0.0);
    }

    #[test]
    fn serializes_nulls_for_no_data() {
        let data = FinancialData::assemble(
            "AAPL".to_string(),
            RatioSet::default(),
            GrowthHistory::no_data(),
        );
        let v = serde_json::to_value(&data).unwrap();
        assert_eq!(
            v,
            json!({
                "ticker": "AAPL",
                "current_ratio": {"current_value": null, "previous_value": null},
                "quick_ratio": {"current_value": null, "previous_value": null},
                "debt_to_equity": {"current_value": null, "previous_value": null},
                "market_cap": {"current_value": null, "previous_value": null},
                "report_dates": null,
                "quarterly_revenue_growth": null,
            })
        );
    }
}
