//! Scenario runner for batch projections
//!
//! Each projection owns its loop state, so scenarios are run in parallel
//! without any shared mutable data.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::InvalidParameterError;
use crate::params::{PaymentFrequency, ProjectionParameters};
use crate::projection::{run, ProjectionResult};
use crate::report::DividendIncomeSummary;

/// A named parameter set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub parameters: ProjectionParameters,
}

impl Scenario {
    pub fn new(name: impl Into<String>, parameters: ProjectionParameters) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }
}

/// Outcome of one scenario in a batch
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: Result<ProjectionResult, InvalidParameterError>,
}

/// One line of a side-by-side scenario comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    #[serde(rename = "Scenario")]
    pub name: String,
    #[serde(rename = "Final Value")]
    pub final_value: f64,
    #[serde(rename = "Total Contributions")]
    pub total_contributions: f64,
    #[serde(rename = "Total Dividends")]
    pub total_dividends: f64,
    #[serde(rename = "Final Yield on Cost")]
    pub final_yield_on_cost_pct: f64,
    #[serde(rename = "Final Annual Income")]
    pub final_annual_income: f64,
    #[serde(rename = "Money-Weighted Return")]
    pub money_weighted_return: Option<f64>,
}

impl ScenarioComparison {
    pub fn from_result(name: &str, result: &ProjectionResult) -> Self {
        let summary = result.summary();
        Self {
            name: name.to_string(),
            final_value: summary.final_value,
            total_contributions: summary.total_contributions,
            total_dividends: summary.total_dividends,
            final_yield_on_cost_pct: summary.final_yield_on_cost_pct,
            final_annual_income: DividendIncomeSummary::from_result(result).annual_income,
            money_weighted_return: summary.money_weighted_return,
        }
    }
}

/// Runs many independent projections
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    scenarios: Vec<Scenario>,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scenarios(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    pub fn add(&mut self, scenario: Scenario) {
        self.scenarios.push(scenario);
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Run every scenario in parallel, results in input order
    pub fn run_batch(&self) -> Vec<ScenarioOutcome> {
        log::info!("Running {} scenarios", self.scenarios.len());

        let outcomes: Vec<ScenarioOutcome> = self
            .scenarios
            .par_iter()
            .map(|scenario| ScenarioOutcome {
                name: scenario.name.clone(),
                result: run(&scenario.parameters),
            })
            .collect();

        for outcome in &outcomes {
            if let Err(e) = &outcome.result {
                log::warn!("Scenario '{}' skipped: {}", outcome.name, e);
            }
        }

        outcomes
    }

    /// Comparison rows for every scenario that ran successfully
    pub fn compare(&self) -> Vec<ScenarioComparison> {
        self.run_batch()
            .iter()
            .filter_map(|outcome| {
                outcome
                    .result
                    .as_ref()
                    .ok()
                    .map(|result| ScenarioComparison::from_result(&outcome.name, result))
            })
            .collect()
    }
}

/// Same parameters under each payment frequency
pub fn frequency_scenarios(params: &ProjectionParameters) -> Vec<Scenario> {
    PaymentFrequency::ALL
        .iter()
        .map(|&frequency| Scenario::new(frequency.as_str(), params.with_frequency(frequency)))
        .collect()
}

/// Run the same parameters once per payment frequency
pub fn run_frequency_comparison(params: &ProjectionParameters) -> Result<Vec<ScenarioComparison>, InvalidParameterError> {
    params.validate()?;
    Ok(ScenarioRunner::with_scenarios(frequency_scenarios(params)).compare())
}
