//! Headline figures for a finished projection

use serde::{Deserialize, Serialize};

use super::annual::trailing_annual_income;
use crate::projection::ProjectionResult;

/// Where the final portfolio value came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioBreakdown {
    pub final_value: f64,
    pub contributions: f64,
    pub dividends: f64,
    pub appreciation: f64,
    pub contributions_share_pct: f64,
    pub dividends_share_pct: f64,
    pub appreciation_share_pct: f64,
}

impl PortfolioBreakdown {
    pub fn from_result(result: &ProjectionResult) -> Self {
        let Some(last) = result.final_snapshot() else {
            return Self::from_parts(0.0, 0.0, 0.0);
        };
        Self::from_parts(last.portfolio_value, last.cumulative_contributions, last.cumulative_dividends)
    }

    fn from_parts(final_value: f64, contributions: f64, dividends: f64) -> Self {
        let appreciation = final_value - contributions - dividends;
        let share = |part: f64| if final_value != 0.0 { part / final_value * 100.0 } else { 0.0 };

        Self {
            final_value,
            contributions,
            dividends,
            appreciation,
            contributions_share_pct: share(contributions),
            dividends_share_pct: share(dividends),
            appreciation_share_pct: share(appreciation),
        }
    }
}

/// Dividend income at the end of the horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendIncomeSummary {
    /// Dividend paid in the final month (0 if it was not a payment month)
    pub last_payment: f64,
    /// Dividends received over the final 12 months
    pub annual_income: f64,
    pub monthly_average: f64,
}

impl DividendIncomeSummary {
    pub fn from_result(result: &ProjectionResult) -> Self {
        let snapshots = &result.snapshots;
        let last_payment = snapshots.last().map(|s| s.dividend_payment).unwrap_or(0.0);
        let annual_income = trailing_annual_income(snapshots, snapshots.len().saturating_sub(1));

        Self {
            last_payment,
            annual_income,
            monthly_average: annual_income / 12.0,
        }
    }
}

/// Change in yield on cost over the horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldOnCostSummary {
    pub initial_pct: f64,
    pub final_pct: f64,
    /// Relative increase in percent, `None` when the initial yield is zero
    pub increase_pct: Option<f64>,
    /// Final yield on cost applied to everything contributed
    pub estimated_annual_income: f64,
}

impl YieldOnCostSummary {
    pub fn from_result(result: &ProjectionResult) -> Self {
        let initial_pct = result.initial_snapshot().map(|s| s.yield_on_cost_pct).unwrap_or(0.0);
        let (final_pct, contributions) = result
            .final_snapshot()
            .map(|s| (s.yield_on_cost_pct, s.cumulative_contributions))
            .unwrap_or((0.0, 0.0));

        let increase_pct = if initial_pct != 0.0 {
            Some((final_pct / initial_pct - 1.0) * 100.0)
        } else {
            None
        };

        Self {
            initial_pct,
            final_pct,
            increase_pct,
            estimated_annual_income: final_pct / 100.0 * contributions,
        }
    }
}

/// All headline figures for one projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub portfolio: PortfolioBreakdown,
    pub dividends: DividendIncomeSummary,
    pub yield_on_cost: YieldOnCostSummary,
    /// Annualized money-weighted return of the investor cashflows
    pub money_weighted_return: Option<f64>,
}

impl ReportSummary {
    pub fn from_result(result: &ProjectionResult) -> Self {
        Self {
            portfolio: PortfolioBreakdown::from_result(result),
            dividends: DividendIncomeSummary::from_result(result),
            yield_on_cost: YieldOnCostSummary::from_result(result),
            money_weighted_return: result.money_weighted_return(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{PaymentFrequency, ProjectionParameters};
    use crate::projection::run;
    use approx::assert_relative_eq;

    #[test]
    fn test_breakdown_shares_sum_to_100() {
        let params = ProjectionParameters {
            monthly_contribution: 200.0,
            ..Default::default()
        };
        let breakdown = PortfolioBreakdown::from_result(&run(&params).unwrap());

        assert_relative_eq!(
            breakdown.contributions_share_pct + breakdown.dividends_share_pct + breakdown.appreciation_share_pct,
            100.0,
            max_relative = 1e-9
        );
        assert_relative_eq!(breakdown.contributions, 10_000.0 + 120.0 * 200.0, max_relative = 1e-12);
    }

    #[test]
    fn test_breakdown_zero_value() {
        let params = ProjectionParameters {
            starting_principal: 0.0,
            ..Default::default()
        };
        let breakdown = PortfolioBreakdown::from_result(&run(&params).unwrap());
        assert_eq!(breakdown.final_value, 0.0);
        assert_eq!(breakdown.contributions_share_pct, 0.0);
    }

    #[test]
    fn test_dividend_summary_yearly() {
        let params = ProjectionParameters::default().with_frequency(PaymentFrequency::Yearly);
        let result = run(&params).unwrap();
        let summary = DividendIncomeSummary::from_result(&result);

        let last = result.final_snapshot().unwrap();
        assert!(last.dividend_payment > 0.0);
        assert_relative_eq!(summary.last_payment, last.dividend_payment);
        assert_relative_eq!(summary.annual_income, last.dividend_payment);
        assert_relative_eq!(summary.monthly_average, last.dividend_payment / 12.0);
    }

    #[test]
    fn test_yield_on_cost_summary() {
        let result = run(&ProjectionParameters::default()).unwrap();
        let summary = YieldOnCostSummary::from_result(&result);

        assert_relative_eq!(summary.initial_pct, 4.0);
        assert!(summary.final_pct > 0.0);
        let increase = summary.increase_pct.unwrap();
        assert_relative_eq!(increase, (summary.final_pct / 4.0 - 1.0) * 100.0);
        assert_relative_eq!(summary.estimated_annual_income, summary.final_pct / 100.0 * 10_000.0);
    }

    #[test]
    fn test_yield_on_cost_increase_undefined_for_zero_yield() {
        let params = ProjectionParameters {
            annual_dividend_yield: 0.0,
            ..Default::default()
        };
        let summary = YieldOnCostSummary::from_result(&run(&params).unwrap());
        assert!(summary.increase_pct.is_none());
    }

    #[test]
    fn test_money_weighted_return_matches_appreciation() {
        // No dividends or contributions: the investor return is the appreciation rate
        let params = ProjectionParameters {
            annual_dividend_yield: 0.0,
            monthly_contribution: 0.0,
            annual_appreciation: 0.05,
            ..Default::default()
        };
        let summary = ReportSummary::from_result(&run(&params).unwrap());
        assert_relative_eq!(summary.money_weighted_return.unwrap(), 0.05, epsilon = 1e-6);
    }
}
