//! Year-by-year view of a projection

use serde::{Deserialize, Serialize};

use crate::projection::{MonthlySnapshot, ProjectionResult};

/// One row of the yearly results table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualRow {
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Year")]
    pub year: f64,
    #[serde(rename = "Portfolio Value")]
    pub portfolio_value: f64,
    #[serde(rename = "Total Contributions")]
    pub total_contributions: f64,
    #[serde(rename = "Total Dividends")]
    pub total_dividends: f64,
    #[serde(rename = "Total Appreciation")]
    pub total_appreciation: f64,
    #[serde(rename = "Annual Dividend Income")]
    pub annual_dividend_income: f64,
    #[serde(rename = "Monthly Dividend Income")]
    pub monthly_dividend_income: f64,
    #[serde(rename = "Yield on Cost")]
    pub yield_on_cost_pct: f64,
}

/// Dividend income over the 12 months ending at `index`.
///
/// In the first year the window starts at month 0, so it covers fewer months.
pub fn trailing_annual_income(snapshots: &[MonthlySnapshot], index: usize) -> f64 {
    if snapshots.is_empty() {
        return 0.0;
    }
    let end = index.min(snapshots.len() - 1);
    let start = end.saturating_sub(11);
    snapshots[start..=end].iter().map(|s| s.dividend_payment).sum()
}

/// Rolling 12-month dividend income for every month of the projection
pub fn annualized_dividend_series(result: &ProjectionResult) -> Vec<f64> {
    (0..result.snapshots.len())
        .map(|i| trailing_annual_income(&result.snapshots, i))
        .collect()
}

/// Month indices shown in the yearly table: each year boundary plus the final month
pub fn annual_indices(len: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let mut indices: Vec<usize> = (0..len).step_by(12).collect();
    if indices.last() != Some(&(len - 1)) {
        indices.push(len - 1);
    }
    indices
}

/// Resample the monthly series into the yearly table
pub fn annual_table(result: &ProjectionResult) -> Vec<AnnualRow> {
    let snapshots = &result.snapshots;

    annual_indices(snapshots.len())
        .into_iter()
        .map(|i| {
            let s = &snapshots[i];
            let annual_income = trailing_annual_income(snapshots, i);
            AnnualRow {
                month: s.month,
                year: (s.years() * 10.0).round() / 10.0,
                portfolio_value: s.portfolio_value,
                total_contributions: s.cumulative_contributions,
                total_dividends: s.cumulative_dividends,
                total_appreciation: s.appreciation(),
                annual_dividend_income: annual_income,
                monthly_dividend_income: annual_income / 12.0,
                yield_on_cost_pct: s.yield_on_cost_pct,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{PaymentFrequency, ProjectionParameters};
    use crate::projection::run;
    use approx::assert_relative_eq;

    #[test]
    fn test_annual_indices() {
        assert_eq!(annual_indices(121), vec![0, 12, 24, 36, 48, 60, 72, 84, 96, 108, 120]);
        assert_eq!(annual_indices(15), vec![0, 12, 14]);
        assert_eq!(annual_indices(1), vec![0]);
        assert!(annual_indices(0).is_empty());
    }

    #[test]
    fn test_annual_table_rows() {
        let result = run(&ProjectionParameters::default()).unwrap();
        let table = annual_table(&result);

        assert_eq!(table.len(), 11);
        assert_eq!(table[0].month, 0);
        assert_eq!(table[0].annual_dividend_income, 0.0);
        assert_eq!(table[10].month, 120);
        assert_relative_eq!(table[10].year, 10.0);

        let last = result.final_snapshot().unwrap();
        assert_relative_eq!(table[10].portfolio_value, last.portfolio_value);
        assert_relative_eq!(table[10].total_appreciation, last.appreciation());
    }

    #[test]
    fn test_trailing_income_sums_one_year() {
        let params = ProjectionParameters {
            annual_dividend_growth: 0.0,
            reinvest_dividends: false,
            annual_appreciation: 0.0,
            is_taxed: false,
            ..Default::default()
        }
        .with_frequency(PaymentFrequency::Monthly);
        let result = run(&params).unwrap();
        let table = annual_table(&result);

        // 4% of 10,000 paid monthly, untaxed, no growth
        for row in table.iter().skip(1) {
            assert_relative_eq!(row.annual_dividend_income, 400.0, max_relative = 1e-9);
            assert_relative_eq!(row.monthly_dividend_income, 400.0 / 12.0, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_first_year_window_is_partial() {
        let result = run(&ProjectionParameters::default()).unwrap();
        let series = annualized_dividend_series(&result);

        assert_eq!(series.len(), result.snapshots.len());
        assert_eq!(series[2], 0.0);
        assert_relative_eq!(series[3], result.snapshots[3].dividend_payment);
        assert_relative_eq!(
            series[6],
            result.snapshots[3].dividend_payment + result.snapshots[6].dividend_payment
        );
    }
}
