//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use dividend_projection::{ContributionSchedule, PaymentFrequency, PercentInputs};

/// Project the growth of a dividend portfolio month by month
#[derive(Parser)]
#[command(name = "dividend-projection")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run one projection
    Project(ProjectArgs),

    /// Run every scenario in a CSV file and compare them
    Batch(BatchArgs),

    /// Compare monthly, quarterly and yearly payments for one parameter set
    Frequencies(ParameterArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

/// Period the contribution amount is entered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ContributionPeriod {
    #[default]
    Monthly,
    Annual,
}

/// Projection inputs. Rates are percentages.
#[derive(Args, Debug, Clone)]
pub struct ParameterArgs {
    /// Starting principal
    #[arg(long, default_value_t = 10_000.0)]
    pub principal: f64,

    /// Annual dividend yield in percent
    #[arg(long = "yield", default_value_t = 4.0)]
    pub dividend_yield: f64,

    /// Dividend tax rate in percent
    #[arg(long, default_value_t = 30.0)]
    pub tax_rate: f64,

    /// Dividends are not taxed
    #[arg(long)]
    pub untaxed: bool,

    /// Expected annual dividend growth in percent
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    pub dividend_growth: f64,

    /// Payment frequency: monthly, quarterly or yearly (or 12, 4, 1)
    #[arg(long, default_value = "quarterly")]
    pub frequency: PaymentFrequency,

    /// Periodic contribution amount
    #[arg(long, default_value_t = 0.0)]
    pub contribution: f64,

    /// Whether the contribution is monthly or annual
    #[arg(long, value_enum, default_value = "monthly")]
    pub contribution_period: ContributionPeriod,

    /// Years invested (1 to 50)
    #[arg(long, default_value_t = 10)]
    pub years: u32,

    /// Take dividends as cash instead of reinvesting them
    #[arg(long)]
    pub no_reinvest: bool,

    /// Expected annual share price appreciation in percent
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    pub appreciation: f64,
}

impl ParameterArgs {
    pub fn to_inputs(&self) -> PercentInputs {
        let contribution = match self.contribution_period {
            ContributionPeriod::Monthly => ContributionSchedule::Monthly(self.contribution),
            ContributionPeriod::Annual => ContributionSchedule::Annual(self.contribution),
        };

        PercentInputs {
            starting_principal: self.principal,
            dividend_yield_pct: self.dividend_yield,
            is_taxed: !self.untaxed,
            tax_rate_pct: self.tax_rate,
            dividend_growth_pct: self.dividend_growth,
            payment_frequency: self.frequency,
            contribution,
            years_invested: self.years,
            reinvest_dividends: !self.no_reinvest,
            appreciation_pct: self.appreciation,
        }
    }
}

/// Arguments for a single projection
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    #[command(flatten)]
    pub params: ParameterArgs,

    /// Emit every month instead of the yearly table
    #[arg(long)]
    pub monthly: bool,
}

/// Arguments for a batch run
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Scenario CSV file
    pub scenarios: PathBuf,
}
