//! Parameter structures for a single projection run

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidParameterError;

/// Upper bound on annual share price appreciation (100%/year)
pub const MAX_ANNUAL_APPRECIATION: f64 = 1.0;

/// Upper bound on annual dividend growth (100%/year)
pub const MAX_ANNUAL_DIVIDEND_GROWTH: f64 = 1.0;

/// Longest supported horizon in years (600 months)
pub const MAX_YEARS_INVESTED: u32 = 50;

/// How often dividends are distributed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    Monthly,
    Quarterly,
    Yearly,
}

impl PaymentFrequency {
    pub const ALL: [PaymentFrequency; 3] = [
        PaymentFrequency::Monthly,
        PaymentFrequency::Quarterly,
        PaymentFrequency::Yearly,
    ];

    pub fn payments_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::Yearly => 1,
        }
    }

    /// Spacing between payment months (12 / payments per year)
    pub fn months_between_payments(&self) -> u32 {
        12 / self.payments_per_year()
    }

    /// True if a payment falls on this 1-indexed projection month
    pub fn is_payment_month(&self, month: u32) -> bool {
        month > 0 && month % self.months_between_payments() == 0
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "Monthly",
            PaymentFrequency::Quarterly => "Quarterly",
            PaymentFrequency::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u32> for PaymentFrequency {
    type Error = InvalidParameterError;

    fn try_from(payments_per_year: u32) -> Result<Self, Self::Error> {
        match payments_per_year {
            12 => Ok(PaymentFrequency::Monthly),
            4 => Ok(PaymentFrequency::Quarterly),
            1 => Ok(PaymentFrequency::Yearly),
            other => Err(InvalidParameterError::new(
                "payments_per_year",
                other,
                "must be one of 12, 4 or 1",
            )),
        }
    }
}

impl FromStr for PaymentFrequency {
    type Err = InvalidParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(PaymentFrequency::Monthly),
            "quarterly" => Ok(PaymentFrequency::Quarterly),
            "yearly" | "annual" | "annually" => Ok(PaymentFrequency::Yearly),
            other => match other.parse::<u32>() {
                Ok(n) => PaymentFrequency::try_from(n),
                Err(_) => Err(InvalidParameterError::new(
                    "payments_per_year",
                    s,
                    "expected monthly, quarterly, yearly or 12/4/1",
                )),
            },
        }
    }
}

/// Contribution amount as entered, before conversion to a monthly figure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "amount", rename_all = "lowercase")]
pub enum ContributionSchedule {
    Monthly(f64),
    Annual(f64),
}

impl ContributionSchedule {
    /// Amount added each month. Annual contributions are spread evenly.
    pub fn monthly_amount(&self) -> f64 {
        match *self {
            ContributionSchedule::Monthly(amount) => amount,
            ContributionSchedule::Annual(amount) => amount / 12.0,
        }
    }
}

impl Default for ContributionSchedule {
    fn default() -> Self {
        ContributionSchedule::Monthly(0.0)
    }
}

/// Immutable inputs for one projection run.
///
/// All rates are decimals (4% = 0.04). Use [`PercentInputs`] to build one
/// from percentages as a user would type them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParameters {
    /// Capital invested at month 0
    pub starting_principal: f64,

    /// Annual dividend yield on current principal
    pub annual_dividend_yield: f64,

    /// Whether dividends are taxed before being paid out or reinvested
    pub is_taxed: bool,

    /// Dividend withholding rate, only used when `is_taxed`
    pub dividend_tax_rate: f64,

    /// Yearly growth of the dividend yield, applied every 12th month
    pub annual_dividend_growth: f64,

    /// Dividend payment frequency
    pub payment_frequency: PaymentFrequency,

    /// Contribution added at the start of every month
    pub monthly_contribution: f64,

    /// Projection horizon in whole years
    pub years_invested: u32,

    /// Whether dividend payments are added back to principal
    pub reinvest_dividends: bool,

    /// Annual share price appreciation, compounded monthly
    pub annual_appreciation: f64,
}

impl Default for ProjectionParameters {
    fn default() -> Self {
        Self {
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
}

impl ProjectionParameters {
    /// Number of simulated months
    pub fn horizon_months(&self) -> u32 {
        self.years_invested.saturating_mul(12)
    }

    /// Fraction of a dividend kept after tax
    pub fn after_tax_factor(&self) -> f64 {
        if self.is_taxed {
            1.0 - self.dividend_tax_rate
        } else {
            1.0
        }
    }

    /// Equivalent monthly compounding rate for the annual appreciation
    pub fn monthly_appreciation_rate(&self) -> f64 {
        (1.0 + self.annual_appreciation).powf(1.0 / 12.0) - 1.0
    }

    /// Copy of these parameters with a different payment frequency
    pub fn with_frequency(&self, payment_frequency: PaymentFrequency) -> Self {
        Self {
            payment_frequency,
            ..self.clone()
        }
    }

    /// Check every input against its domain
    pub fn validate(&self) -> Result<(), InvalidParameterError> {
        non_negative_amount("starting_principal", self.starting_principal)?;
        non_negative_amount("monthly_contribution", self.monthly_contribution)?;
        rate_in("annual_dividend_yield", self.annual_dividend_yield, 0.0, 1.0)?;
        if self.is_taxed {
            rate_in("dividend_tax_rate", self.dividend_tax_rate, 0.0, 1.0)?;
        }
        rate_in(
            "annual_dividend_growth",
            self.annual_dividend_growth,
            -1.0,
            MAX_ANNUAL_DIVIDEND_GROWTH,
        )?;
        rate_in(
            "annual_appreciation",
            self.annual_appreciation,
            -1.0,
            MAX_ANNUAL_APPRECIATION,
        )?;
        if self.years_invested == 0 {
            return Err(InvalidParameterError::new(
                "years_invested",
                self.years_invested,
                "must be at least 1",
            ));
        }
        if self.years_invested > MAX_YEARS_INVESTED {
            return Err(InvalidParameterError::new(
                "years_invested",
                self.years_invested,
                format!("must be at most {}", MAX_YEARS_INVESTED),
            ));
        }
        Ok(())
    }
}

fn non_negative_amount(name: &'static str, value: f64) -> Result<(), InvalidParameterError> {
    if !value.is_finite() {
        return Err(InvalidParameterError::new(name, value, "must be finite"));
    }
    if value < 0.0 {
        return Err(InvalidParameterError::new(name, value, "must not be negative"));
    }
    Ok(())
}

fn rate_in(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), InvalidParameterError> {
    if !value.is_finite() {
        return Err(InvalidParameterError::new(name, value, "must be finite"));
    }
    if value < min || value > max {
        return Err(InvalidParameterError::new(
            name,
            value,
            format!("must be in [{}, {}]", min, max),
        ));
    }
    Ok(())
}

/// Raw inputs as entered on a form or command line: rates in percent and
/// the contribution in its entered period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentInputs {
    pub starting_principal: f64,
    pub dividend_yield_pct: f64,
    pub is_taxed: bool,
    pub tax_rate_pct: f64,
    pub dividend_growth_pct: f64,
    pub payment_frequency: PaymentFrequency,
    pub contribution: ContributionSchedule,
    pub years_invested: u32,
    pub reinvest_dividends: bool,
    pub appreciation_pct: f64,
}

impl Default for PercentInputs {
    fn default() -> Self {
        Self {
            starting_principal: 10_000.0,
            dividend_yield_pct: 4.0,
            is_taxed: true,
            tax_rate_pct: 30.0,
            dividend_growth_pct: 3.0,
            payment_frequency: PaymentFrequency::Quarterly,
            contribution: ContributionSchedule::default(),
            years_invested: 10,
            reinvest_dividends: true,
            appreciation_pct: 3.0,
        }
    }
}

impl PercentInputs {
    /// Convert to engine parameters and validate them
    pub fn normalize(&self) -> Result<ProjectionParameters, InvalidParameterError> {
        let params = ProjectionParameters {
            starting_principal: self.starting_principal,
            annual_dividend_yield: self.dividend_yield_pct / 100.0,
            is_taxed: self.is_taxed,
            dividend_tax_rate: if self.is_taxed { self.tax_rate_pct / 100.0 } else { 0.0 },
            annual_dividend_growth: self.dividend_growth_pct / 100.0,
            payment_frequency: self.payment_frequency,
            monthly_contribution: self.contribution.monthly_amount(),
            years_invested: self.years_invested,
            reinvest_dividends: self.reinvest_dividends,
            annual_appreciation: self.appreciation_pct / 100.0,
        };
        params.validate()?;
        Ok(params)
    }
}
