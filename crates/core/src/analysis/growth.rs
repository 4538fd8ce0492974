use crate::analysis::safe_div;
use crate::domain::financials::{GrowthHistory, RevenuePoint};

/// Quarter-over-quarter revenue growth, attributed to the later quarter.
///
/// Input order does not matter; points are sorted oldest first and duplicate
/// dates collapse to the last one reported. `None` or an empty series yields
/// the no-data sentinel.
pub fn calculate_growth_history(points: Option<Vec<RevenuePoint>>) -> GrowthHistory {
    let Some(mut points) = points.filter(|p| !p.is_empty()) else {
        return GrowthHistory::no_data();
    };

    // Stable sort keeps provider order among equal dates, so the last one wins below.
    points.sort_by_key(|p| p.date);
    let mut series: Vec<RevenuePoint> = Vec::with_capacity(points.len());
    for point in points {
        match series.last_mut() {
            Some(last) if last.date == point.date => *last = point,
            _ => series.push(point),
        }
    }

    let mut report_dates = Vec::with_capacity(series.len().saturating_sub(1));
    let mut growth = Vec::with_capacity(series.len().saturating_sub(1));
    for pair in series.windows(2) {
        let (previous, current) = (pair[0], pair[1]);
        let rate = match (current.revenue, previous.revenue) {
            (Some(cur), Some(prev)) => safe_div(cur - prev, prev),
            _ => None,
        };
        report_dates.push(current.date.format("%Y-%m-%d").to_string());
        growth.push(rate);
    }

    GrowthHistory {
        report_dates: Some(report_dates),
        quarterly_revenue_growth: Some(growth),
    }
}

/// Growth history is supplementary: an upstream failure is logged and
/// downgraded to the no-data sentinel.
pub fn growth_history_or_sentinel(
    ticker: &str,
    fetched: anyhow::Result<Option<Vec<RevenuePoint>>>,
) -> GrowthHistory {
    match fetched {
        Ok(points) => calculate_growth_history(points),
        Err(err) => {
            tracing::warn!(%ticker, error = %err, "revenue history unavailable; returning empty growth");
            GrowthHistory::no_data()
        }
    }
}
