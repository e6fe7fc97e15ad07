//! Output structures for projections

use serde::{Deserialize, Serialize};

use super::irr::calculate_irr;
use crate::params::{ProjectionParameters, MAX_YEARS_INVESTED};

/// State of the portfolio at the end of one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    /// Month index, 0 is the initial state
    pub month: u32,

    /// Market value after contribution, reinvestment and appreciation
    pub portfolio_value: f64,

    /// Net dividend paid this month (0 outside payment months)
    pub dividend_payment: f64,

    /// Starting principal plus contributions to date
    pub cumulative_contributions: f64,

    /// Net dividends paid to date
    pub cumulative_dividends: f64,

    /// Annualized after-tax dividend over contributions, in percent
    pub yield_on_cost_pct: f64,

    /// Whether this month was a scheduled payment month
    pub is_payment_month: bool,
}

impl MonthlySnapshot {
    /// Elapsed time in years
    pub fn years(&self) -> f64 {
        self.month as f64 / 12.0
    }

    /// Value not explained by contributions or dividends
    pub fn appreciation(&self) -> f64 {
        self.portfolio_value - self.cumulative_contributions - self.cumulative_dividends
    }
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Parameters the series was produced from
    pub parameters: ProjectionParameters,

    /// One snapshot per month, index 0 through the horizon
    pub snapshots: Vec<MonthlySnapshot>,
}

impl ProjectionResult {
    pub fn new(parameters: ProjectionParameters) -> Self {
        let capacity = parameters.horizon_months().min(MAX_YEARS_INVESTED * 12) as usize + 1;
        Self {
            parameters,
            snapshots: Vec::with_capacity(capacity),
        }
    }

    /// Add a snapshot
    pub fn add_snapshot(&mut self, snapshot: MonthlySnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn horizon_months(&self) -> u32 {
        self.parameters.horizon_months()
    }

    pub fn initial_snapshot(&self) -> Option<&MonthlySnapshot> {
        self.snapshots.first()
    }

    pub fn final_snapshot(&self) -> Option<&MonthlySnapshot> {
        self.snapshots.last()
    }

    pub fn total_dividends(&self) -> f64 {
        self.final_snapshot().map(|s| s.cumulative_dividends).unwrap_or(0.0)
    }

    /// Cashflows from the investor's point of view, one per month.
    ///
    /// Money put in is negative. Dividends that are not reinvested are paid
    /// out and count as inflows. The final portfolio value is received at
    /// the horizon.
    pub fn investor_cashflows(&self) -> Vec<f64> {
        let contribution = self.parameters.monthly_contribution;
        let reinvest = self.parameters.reinvest_dividends;

        let mut cashflows: Vec<f64> = self
            .snapshots
            .iter()
            .map(|s| {
                if s.month == 0 {
                    -s.portfolio_value
                } else {
                    let payout = if reinvest { 0.0 } else { s.dividend_payment };
                    payout - contribution
                }
            })
            .collect();

        if let (Some(last), Some(snapshot)) = (cashflows.last_mut(), self.snapshots.last()) {
            *last += snapshot.portfolio_value;
        }
        cashflows
    }

    /// Annualized money-weighted return of the investor cashflows
    pub fn money_weighted_return(&self) -> Option<f64> {
        calculate_irr(&self.investor_cashflows(), 12)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let final_snapshot = self.final_snapshot().copied();
        let payment_count = self.snapshots.iter().filter(|s| s.dividend_payment > 0.0).count() as u32;

        ProjectionSummary {
            total_months: self.snapshots.len().saturating_sub(1) as u32,
            payment_count,
            final_value: final_snapshot.map(|s| s.portfolio_value).unwrap_or(0.0),
            total_contributions: final_snapshot.map(|s| s.cumulative_contributions).unwrap_or(0.0),
            total_dividends: final_snapshot.map(|s| s.cumulative_dividends).unwrap_or(0.0),
            total_appreciation: final_snapshot.map(|s| s.appreciation()).unwrap_or(0.0),
            final_yield_on_cost_pct: final_snapshot.map(|s| s.yield_on_cost_pct).unwrap_or(0.0),
            money_weighted_return: self.money_weighted_return(),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub payment_count: u32,
    pub final_value: f64,
    pub total_contributions: f64,
    pub total_dividends: f64,
    pub total_appreciation: f64,
    pub final_yield_on_cost_pct: f64,
    pub money_weighted_return: Option<f64>,
}
