//! Core projection engine for month-by-month portfolio growth

use crate::error::InvalidParameterError;
use crate::params::ProjectionParameters;
use super::snapshots::{MonthlySnapshot, ProjectionResult};
use super::state::ProjectionState;

/// Run a projection for one parameter set.
///
/// Returns `horizon_months + 1` snapshots ordered by month, starting with the
/// initial state at month 0. Fails before any state is created when a
/// parameter is out of its domain.
pub fn run(params: &ProjectionParameters) -> Result<ProjectionResult, InvalidParameterError> {
    Ok(ProjectionEngine::new(params.clone())?.project())
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    params: ProjectionParameters,
    monthly_appreciation: f64,
    after_tax_factor: f64,
}

impl ProjectionEngine {
    /// Validate the parameters and build an engine for them
    pub fn new(params: ProjectionParameters) -> Result<Self, InvalidParameterError> {
        params.validate()?;
        Ok(Self {
            monthly_appreciation: params.monthly_appreciation_rate(),
            after_tax_factor: params.after_tax_factor(),
            params,
        })
    }

    pub fn parameters(&self) -> &ProjectionParameters {
        &self.params
    }

    /// Run the full projection
    pub fn project(&self) -> ProjectionResult {
        log::debug!(
            "Projecting {} months: principal={:.2} yield={} frequency={} reinvest={}",
            self.params.horizon_months(),
            self.params.starting_principal,
            self.params.annual_dividend_yield,
            self.params.payment_frequency,
            self.params.reinvest_dividends,
        );

        let mut result = ProjectionResult::new(self.params.clone());
        let mut state = ProjectionState::initial(&self.params);

        result.add_snapshot(self.initial_snapshot(&state));

        for _month in 1..=self.params.horizon_months() {
            state.advance_month();
            let snapshot = self.calculate_month(&mut state);
            result.add_snapshot(snapshot);
        }

        if let Some(last) = result.final_snapshot() {
            log::debug!(
                "Projection complete: value={:.2} dividends={:.2} yoc={:.2}%",
                last.portfolio_value,
                last.cumulative_dividends,
                last.yield_on_cost_pct,
            );
        }

        result
    }

    fn initial_snapshot(&self, state: &ProjectionState) -> MonthlySnapshot {
        MonthlySnapshot {
            month: 0,
            portfolio_value: state.current_principal,
            dividend_payment: 0.0,
            cumulative_contributions: state.cumulative_contributions,
            cumulative_dividends: 0.0,
            yield_on_cost_pct: self.params.annual_dividend_yield * 100.0,
            is_payment_month: false,
        }
    }

    /// Apply one month. The steps compound on each other and must run in this order.
    fn calculate_month(&self, state: &mut ProjectionState) -> MonthlySnapshot {
        self.apply_contribution(state);
        let is_payment_month = self.params.payment_frequency.is_payment_month(state.month);
        let dividend_payment = if is_payment_month {
            self.pay_dividend(state)
        } else {
            0.0
        };
        self.apply_appreciation(state);
        self.grow_yield(state);

        MonthlySnapshot {
            month: state.month,
            portfolio_value: state.current_principal,
            dividend_payment,
            cumulative_contributions: state.cumulative_contributions,
            cumulative_dividends: state.cumulative_dividends,
            yield_on_cost_pct: state.yield_on_cost_pct(self.after_tax_factor),
            is_payment_month,
        }
    }

    fn apply_contribution(&self, state: &mut ProjectionState) {
        state.current_principal += self.params.monthly_contribution;
        state.cumulative_contributions += self.params.monthly_contribution;
    }

    /// Pay this period's share of the annual yield, net of tax
    fn pay_dividend(&self, state: &mut ProjectionState) -> f64 {
        let period_yield = state.current_annual_yield / self.params.payment_frequency.payments_per_year() as f64;
        let gross_payment = state.current_principal * period_yield;
        let payment = gross_payment * self.after_tax_factor;

        state.cumulative_dividends += payment;
        if self.params.reinvest_dividends {
            state.current_principal += payment;
        }

        log::trace!("Month {}: dividend {:.4} (gross {:.4})", state.month, payment, gross_payment);
        payment
    }

    /// Monthly compounding of the annual appreciation, after any reinvestment
    fn apply_appreciation(&self, state: &mut ProjectionState) {
        state.current_principal *= 1.0 + self.monthly_appreciation;
    }

    /// Yield grows once per year and applies from the next month on
    fn grow_yield(&self, state: &mut ProjectionState) {
        if state.is_year_end() {
            state.current_annual_yield *= 1.0 + self.params.annual_dividend_growth;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{PaymentFrequency, MAX_YEARS_INVESTED};
    use approx::assert_relative_eq;

    /// Example scenario: quarterly, taxed, reinvested, 3% growth and appreciation
    fn example_params() -> ProjectionParameters {
        ProjectionParameters {
            starting_principal: 10_000.0,
            annual_dividend_yield: 0.04,
            is_taxed: true,
            dividend_tax_rate: 0.30,
            annual_dividend_growth: 0.03,
            payment_frequency: PaymentFrequency::Quarterly,
            monthly_contribution: 0.0,
            years_invested: 10,
            reinvest_dividends: true,
            annual_appreciation: 0.03,
        }
    }

    /// Only dividends are active, and they are paid out
    fn flat_params() -> ProjectionParameters {
        ProjectionParameters {
            annual_dividend_growth: 0.0,
            monthly_contribution: 0.0,
            reinvest_dividends: false,
            annual_appreciation: 0.0,
            ..example_params()
        }
    }

    #[test]
    fn test_projection_length_and_order() {
        for years in [1, 10, 50] {
            let params = ProjectionParameters { years_invested: years, ..example_params() };
            let result = run(&params).unwrap();

            assert_eq!(result.snapshots.len(), (years * 12 + 1) as usize);
            for (i, s) in result.snapshots.iter().enumerate() {
                assert_eq!(s.month, i as u32);
            }
        }
    }

    #[test]
    fn test_initial_snapshot() {
        let result = run(&example_params()).unwrap();
        let first = result.initial_snapshot().unwrap();

        assert_eq!(first.month, 0);
        assert_eq!(first.dividend_payment, 0.0);
        assert_eq!(first.portfolio_value, 10_000.0);
        assert_eq!(first.cumulative_contributions, 10_000.0);
        assert_eq!(first.cumulative_dividends, 0.0);
        assert_eq!(first.yield_on_cost_pct, 0.04 * 100.0);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let params = ProjectionParameters { years_invested: 0, ..example_params() };
        let err = run(&params).unwrap_err();
        assert_eq!(err.parameter, "years_invested");

        let params = ProjectionParameters { annual_dividend_yield: f64::NAN, ..example_params() };
        assert!(ProjectionEngine::new(params).is_err());
    }

    #[test]
    fn test_horizon_beyond_cap_rejected_before_projection() {
        for years in [MAX_YEARS_INVESTED + 1, 400_000_000, u32::MAX] {
            let params = ProjectionParameters { years_invested: years, ..example_params() };
            let err = run(&params).unwrap_err();
            assert_eq!(err.parameter, "years_invested");
        }

        let params = ProjectionParameters { years_invested: MAX_YEARS_INVESTED, ..example_params() };
        let result = run(&params).unwrap();
        assert_eq!(result.snapshots.len(), 601);
    }

    #[test]
    fn test_value_constant_without_growth_channels() {
        let result = run(&flat_params()).unwrap();
        for s in &result.snapshots {
            assert_eq!(s.portfolio_value, 10_000.0);
        }
        assert!(result.total_dividends() > 0.0);
    }

    #[test]
    fn test_reinvestment_only_steps_on_payment_months() {
        let params = ProjectionParameters { reinvest_dividends: true, ..flat_params() };
        let result = run(&params).unwrap();

        for pair in result.snapshots.windows(2) {
            let (prev, curr) = (pair[0], pair[1]);
            if params.payment_frequency.is_payment_month(curr.month) {
                assert!(curr.portfolio_value > prev.portfolio_value, "month {}", curr.month);
            } else {
                assert_eq!(curr.portfolio_value, prev.portfolio_value, "month {}", curr.month);
            }
        }
    }

    #[test]
    fn test_cumulative_contributions_exact() {
        let params = ProjectionParameters { monthly_contribution: 250.0, ..example_params() };
        let result = run(&params).unwrap();

        for s in &result.snapshots {
            assert_relative_eq!(
                s.cumulative_contributions,
                10_000.0 + s.month as f64 * 250.0,
                max_relative = 1e-12
            );
        }

        let no_growth = ProjectionParameters {
            reinvest_dividends: false,
            annual_appreciation: -0.2,
            ..params.clone()
        };
        let other = run(&no_growth).unwrap();
        for (a, b) in result.snapshots.iter().zip(&other.snapshots) {
            assert_eq!(a.cumulative_contributions, b.cumulative_contributions);
        }
    }

    #[test]
    fn test_payment_months_by_frequency() {
        for frequency in PaymentFrequency::ALL {
            let params = example_params().with_frequency(frequency);
            let result = run(&params).unwrap();
            let spacing = 12 / frequency.payments_per_year();

            for s in &result.snapshots {
                let expected = s.month > 0 && s.month % spacing == 0;
                assert_eq!(s.is_payment_month, expected);
                assert_eq!(s.dividend_payment > 0.0, expected, "{frequency} month {}", s.month);
            }
        }
    }

    #[test]
    fn test_yearly_payments_only_on_year_end() {
        let params = example_params().with_frequency(PaymentFrequency::Yearly);
        let result = run(&params).unwrap();
        let paid: Vec<u32> = result
            .snapshots
            .iter()
            .filter(|s| s.dividend_payment > 0.0)
            .map(|s| s.month)
            .collect();
        assert_eq!(paid, (1..=10).map(|y| y * 12).collect::<Vec<_>>());
    }

    #[test]
    fn test_first_quarterly_payment() {
        let params = example_params();
        let result = run(&params).unwrap();

        let monthly_rate = 1.03_f64.powf(1.0 / 12.0) - 1.0;
        let principal_month_3 = 10_000.0 * (1.0 + monthly_rate).powi(2);
        let expected_payment = principal_month_3 * (0.04 / 4.0) * 0.70;

        let month_3 = &result.snapshots[3];
        assert_relative_eq!(month_3.dividend_payment, expected_payment, max_relative = 1e-12);
        assert_relative_eq!(
            month_3.portfolio_value,
            (principal_month_3 + expected_payment) * (1.0 + monthly_rate),
            max_relative = 1e-12
        );
        assert_eq!(result.snapshots[1].dividend_payment, 0.0);
        assert_eq!(result.snapshots[2].dividend_payment, 0.0);
    }

    #[test]
    fn test_example_scenario_grows() {
        let result = run(&example_params()).unwrap();
        let last = result.final_snapshot().unwrap();

        assert_eq!(last.month, 120);
        assert!(last.portfolio_value > 10_000.0);

        for pair in result.snapshots.windows(2) {
            assert!(pair[1].cumulative_dividends >= pair[0].cumulative_dividends);
            if pair[1].dividend_payment > 0.0 {
                assert!(pair[1].cumulative_dividends > pair[0].cumulative_dividends);
            }
        }
    }

    #[test]
    fn test_yield_growth_applies_from_next_month() {
        let params = ProjectionParameters {
            annual_dividend_growth: 0.10,
            ..flat_params()
        }
        .with_frequency(PaymentFrequency::Monthly);
        let result = run(&params).unwrap();

        let net_monthly = 10_000.0 * 0.04 / 12.0 * 0.70;
        assert_relative_eq!(result.snapshots[12].dividend_payment, net_monthly, max_relative = 1e-12);
        assert_relative_eq!(result.snapshots[13].dividend_payment, net_monthly * 1.10, max_relative = 1e-12);
        assert_relative_eq!(result.snapshots[25].dividend_payment, net_monthly * 1.21, max_relative = 1e-12);
    }

    #[test]
    fn test_yield_on_cost_uses_grown_yield_and_tax() {
        let params = ProjectionParameters {
            annual_dividend_growth: 0.10,
            ..flat_params()
        };
        let result = run(&params).unwrap();

        assert_relative_eq!(result.snapshots[11].yield_on_cost_pct, 4.0 * 0.70, max_relative = 1e-12);
        assert_relative_eq!(result.snapshots[12].yield_on_cost_pct, 4.0 * 1.10 * 0.70, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_principal_zero_contribution() {
        let params = ProjectionParameters {
            starting_principal: 0.0,
            ..example_params()
        };
        let result = run(&params).unwrap();

        assert_relative_eq!(result.snapshots[0].yield_on_cost_pct, 4.0);
        for s in result.snapshots.iter().skip(1) {
            assert_eq!(s.portfolio_value, 0.0);
            assert_eq!(s.yield_on_cost_pct, 0.0);
        }
    }

    #[test]
    fn test_untaxed_pays_gross() {
        let taxed = run(&flat_params()).unwrap();
        let untaxed = run(&ProjectionParameters { is_taxed: false, ..flat_params() }).unwrap();

        assert_relative_eq!(
            untaxed.snapshots[3].dividend_payment * 0.70,
            taxed.snapshots[3].dividend_payment,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_runs_are_deterministic() {
        let a = run(&example_params()).unwrap();
        let b = run(&example_params()).unwrap();
        assert_eq!(a.snapshots, b.snapshots);
    }
}
