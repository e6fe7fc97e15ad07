//! Load named scenarios from a CSV file
//!
//! One scenario per row. Rates are given in percent, the contribution in
//! its entered period (`Monthly` or `Annual`).

use std::path::Path;

use csv::Reader;

use super::{ContributionSchedule, PaymentFrequency, PercentInputs};
use crate::error::{Error, Result};
use crate::scenario::Scenario;

/// Raw CSV row matching the scenario file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "StartingPrincipal")]
    starting_principal: f64,
    #[serde(rename = "DividendYieldPct")]
    dividend_yield_pct: f64,
    #[serde(rename = "Taxed")]
    taxed: String,
    #[serde(rename = "TaxRatePct")]
    tax_rate_pct: f64,
    #[serde(rename = "DividendGrowthPct")]
    dividend_growth_pct: f64,
    #[serde(rename = "Frequency")]
    frequency: String,
    #[serde(rename = "Contribution")]
    contribution: f64,
    #[serde(rename = "ContributionType")]
    contribution_type: String,
    #[serde(rename = "Years")]
    years: u32,
    #[serde(rename = "Reinvest")]
    reinvest: String,
    #[serde(rename = "AppreciationPct")]
    appreciation_pct: f64,
}

impl CsvRow {
    fn to_scenario(self) -> Result<Scenario> {
        let payment_frequency: PaymentFrequency = self.frequency.parse()?;

        let contribution = match self.contribution_type.trim().to_ascii_lowercase().as_str() {
            "monthly" => ContributionSchedule::Monthly(self.contribution),
            "annual" | "yearly" => ContributionSchedule::Annual(self.contribution),
            _ => {
                return Err(Error::UnknownValue {
                    field: "ContributionType",
                    value: self.contribution_type,
                })
            }
        };

        let inputs = PercentInputs {
            starting_principal: self.starting_principal,
            dividend_yield_pct: self.dividend_yield_pct,
            is_taxed: parse_flag("Taxed", &self.taxed)?,
            tax_rate_pct: self.tax_rate_pct,
            dividend_growth_pct: self.dividend_growth_pct,
            payment_frequency,
            contribution,
            years_invested: self.years,
            reinvest_dividends: parse_flag("Reinvest", &self.reinvest)?,
            appreciation_pct: self.appreciation_pct,
        };

        Ok(Scenario::new(self.name, inputs.normalize()?))
    }
}

fn parse_flag(field: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(Error::UnknownValue {
            field,
            value: value.to_string(),
        }),
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>> {
    let path = path.as_ref();
    let scenarios = load_scenarios_from_reader(std::fs::File::open(path)?)?;
    log::info!("Loaded {} scenarios from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Scenario>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for (index, result) in csv_reader.deserialize().enumerate() {
        let row_number = index + 1;
        let row: CsvRow = result?;
        let scenario = row.to_scenario().map_err(|source| Error::ScenarioRow {
            row: row_number,
            source: Box::new(source),
        })?;
        scenarios.push(scenario);
    }

    Ok(scenarios)
}
