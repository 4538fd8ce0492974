use crate::analysis::error::NoDataError;
use crate::analysis::safe_div;
use crate::domain::financials::{BalanceSheetPeriod, CompanyInfo, ComparisonPair, RatioSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ratio {
    Current,
    Quick,
    DebtToEquity,
}

impl Ratio {
    pub fn of(self, period: &BalanceSheetPeriod) -> Option<f64> {
        match self {
            Ratio::Current => safe_div(period.current_assets(), period.current_liabilities()),
            Ratio::Quick => safe_div(
                period.current_assets() - period.inventory(),
                period.current_liabilities(),
            ),
            Ratio::DebtToEquity => safe_div(period.total_debt(), period.stockholders_equity()),
        }
    }
}

/// Compares T0 (`periods[0]`) against T-1 (`periods[1]`). `periods` must be
/// ordered most recent first.
///
/// The market cap pair is not a T-1 comparison: `previous_value` carries the
/// enterprise value from the same snapshot.
pub fn calculate_ratios(
    periods: &[BalanceSheetPeriod],
    info: &CompanyInfo,
) -> Result<RatioSet, NoDataError> {
    let Some(t0) = periods.first() else {
        return Err(NoDataError::new("No financial balance sheet data found."));
    };
    let t1 = periods.get(1);

    let compare = |ratio: Ratio| ComparisonPair::new(ratio.of(t0), t1.and_then(|p| ratio.of(p)));

    Ok(RatioSet {
        current_ratio: compare(Ratio::Current),
        quick_ratio: compare(Ratio::Quick),
        debt_to_equity: compare(Ratio::DebtToEquity),
        market_cap: ComparisonPair::new(info.market_cap, info.enterprise_value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(assets: f64, liabilities: f64, inventory: f64, debt: f64, equity: f64) -> BalanceSheetPeriod {
        BalanceSheetPeriod {
            as_of_date: None,
            current_assets: Some(assets),
            current_liabilities: Some(liabilities),
            inventory: Some(inventory),
            total_debt: Some(debt),
            stockholders_equity: Some(equity),
        }
    }

    #[test]
    fn current_ratio_divides_assets_by_liabilities() {
        let p = period(200.0, 100.0, 0.0, 0.0, 1.0);
        assert_eq!(Ratio::Current.of(&p), Some(2.0));

        let p = period(200.0, 0.0, 0.0, 0.0, 1.0);
        assert_eq!(Ratio::Current.of(&p), None);
    }

    #[test]
    fn quick_ratio_excludes_inventory() {
        let p = period(150.0, 50.0, 50.0, 0.0, 1.0);
        assert_eq!(Ratio::Quick.of(&p), Some(2.0));
    }

    #[test]
    fn debt_to_equity_is_null_without_equity() {
        let p = period(1.0, 1.0, 0.0, 30.0, 0.0);
        assert_eq!(Ratio::DebtToEquity.of(&p), None);

        let p = period(1.0, 1.0, 0.0, 30.0, 90.0);
        assert_eq!(Ratio::DebtToEquity.of(&p), Some(0.333));
    }

    #[test]
    fn missing_liabilities_read_as_zero() {
        let p = BalanceSheetPeriod {
            current_assets: Some(10.0),
            ..Default::default()
        };
        assert_eq!(Ratio::Current.of(&p), None);
        assert_eq!(Ratio::Quick.of(&p), None);
    }

    #[test]
    fn compares_latest_against_previous_period() {
        let periods = vec![
            period(200.0, 100.0, 20.0, 50.0, 100.0),
            period(300.0, 200.0, 100.0, 80.0, 0.0),
        ];
        let info = CompanyInfo {
            market_cap: Some(3.0e12),
            enterprise_value: Some(3.1e12),
        };

        let set = calculate_ratios(&periods, &info).unwrap();
        assert_eq!(set.current_ratio, ComparisonPair::new(Some(2.0), Some(1.5)));
        assert_eq!(set.quick_ratio, ComparisonPair::new(Some(1.8), Some(1.0)));
        assert_eq!(set.debt_to_equity, ComparisonPair::new(Some(0.5), None));
        assert_eq!(set.market_cap, ComparisonPair::new(Some(3.0e12), Some(3.1e12)));
    }

    #[test]
    fn single_period_leaves_previous_values_null() {
        let periods = vec![period(200.0, 100.0, 0.0, 10.0, 20.0)];
        let info = CompanyInfo {
            market_cap: Some(1000.0),
            enterprise_value: None,
        };

        let set = calculate_ratios(&periods, &info).unwrap();
        assert_eq!(set.current_ratio, ComparisonPair::new(Some(2.0), None));
        assert_eq!(set.quick_ratio, ComparisonPair::new(Some(2.0), None));
        assert_eq!(set.debt_to_equity, ComparisonPair::new(Some(0.5), None));
        assert_eq!(set.market_cap, ComparisonPair::new(Some(1000.0), None));
    }

    #[test]
    fn zero_periods_is_a_no_data_error() {
        let err = calculate_ratios(&[], &CompanyInfo::default()).unwrap_err();
        assert!(err.to_string().contains("No financial balance sheet data"));
    }
}
