//! Loop state carried across months of a single projection

use crate::params::ProjectionParameters;

/// State of the portfolio at a point in time during projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection month (0 before the first month elapses)
    pub month: u32,

    /// Market value of the holdings
    pub current_principal: f64,

    /// Annual yield used for the next dividend payment
    pub current_annual_yield: f64,

    /// Starting principal plus every monthly contribution so far
    pub cumulative_contributions: f64,

    /// Net dividends received so far, reinvested or not
    pub cumulative_dividends: f64,
}

impl ProjectionState {
    /// Initialize state at projection start
    pub fn initial(params: &ProjectionParameters) -> Self {
        Self {
            month: 0,
            current_principal: params.starting_principal,
            current_annual_yield: params.annual_dividend_yield,
            cumulative_contributions: params.starting_principal,
            cumulative_dividends: 0.0,
        }
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.month += 1;
    }

    /// True on the last month of each projection year
    pub fn is_year_end(&self) -> bool {
        self.month > 0 && self.month % 12 == 0
    }

    /// Current annualized dividend as a percentage of everything contributed
    pub fn yield_on_cost_pct(&self, after_tax_factor: f64) -> f64 {
        if self.cumulative_contributions > 0.0 {
            let annual_dividend = self.current_principal * self.current_annual_yield * after_tax_factor;
            annual_dividend / self.cumulative_contributions * 100.0
        } else {
            0.0
        }
    }
}
