//! Dividend Projection CLI
//!
//! # Usage
//!
//! ```bash
//! # Yearly table for the default scenario
//! dividend-projection project
//!
//! # $500/month for 25 years, monthly payouts, full monthly series as CSV
//! dividend-projection --format csv project --contribution 500 --years 25 --frequency monthly --monthly
//!
//! # Compare scenarios from a file
//! dividend-projection batch scenarios.csv
//! ```

use std::fs::File;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use dividend_projection::params::load_scenarios;
use dividend_projection::projection::ProjectionEngine;
use dividend_projection::report::{
    self, annual_table, format_annual_table, format_currency, AnnualRow, ReportSummary,
};
use dividend_projection::scenario::{run_frequency_comparison, ScenarioComparison, ScenarioRunner};
use dividend_projection::ProjectionResult;

mod cli;

use cli::{BatchArgs, Cli, Commands, OutputFormat, ParameterArgs, ProjectArgs};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Unable to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    match cli.command {
        Commands::Project(args) => project(&args, cli.format, &mut out)?,
        Commands::Batch(args) => batch(&args, cli.format, &mut out)?,
        Commands::Frequencies(args) => frequencies(&args, cli.format, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct ProjectionReport<'a> {
    summary: ReportSummary,
    annual: Vec<AnnualRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    monthly: Option<&'a ProjectionResult>,
}

fn project(args: &ProjectArgs, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let params = args.params.to_inputs().normalize()?;
    let result = ProjectionEngine::new(params)?.project();
    let rows = annual_table(&result);

    match format {
        OutputFormat::Table => {
            write_summary(out, &ReportSummary::from_result(&result))?;
            writeln!(out)?;
            if args.monthly {
                for s in &result.snapshots {
                    writeln!(
                        out,
                        "{:>4} {:>16} {:>12} {:>7.2}%",
                        s.month,
                        format_currency(s.portfolio_value),
                        format_currency(s.dividend_payment),
                        s.yield_on_cost_pct,
                    )?;
                }
            } else {
                write!(out, "{}", format_annual_table(&rows))?;
            }
        }
        OutputFormat::Csv if args.monthly => report::write_monthly_csv(out, &result)?,
        OutputFormat::Csv => report::write_annual_csv(out, &rows)?,
        OutputFormat::Json => {
            let report = ProjectionReport {
                summary: ReportSummary::from_result(&result),
                annual: rows,
                monthly: args.monthly.then_some(&result),
            };
            report::write_json(out, &report)?;
        }
    }

    Ok(())
}

fn batch(args: &BatchArgs, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let scenarios = load_scenarios(&args.scenarios)
        .with_context(|| format!("Failed to load scenarios from {}", args.scenarios.display()))?;
    let rows = ScenarioRunner::with_scenarios(scenarios).compare();
    write_comparison(out, &rows, format)
}

fn frequencies(args: &ParameterArgs, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let params = args.to_inputs().normalize()?;
    let rows = run_frequency_comparison(&params)?;
    write_comparison(out, &rows, format)
}

fn write_comparison(out: &mut dyn Write, rows: &[ScenarioComparison], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            writeln!(
                out,
                "{:<20} {:>16} {:>16} {:>14} {:>8} {:>14} {:>8}",
                "Scenario", "Final Value", "Contributions", "Dividends", "YoC", "Annual Inc", "MWR"
            )?;
            writeln!(out, "{}", "-".repeat(102))?;
            for row in rows {
                let mwr = row
                    .money_weighted_return
                    .map(|r| format!("{:.2}%", r * 100.0))
                    .unwrap_or_else(|| "n/a".to_string());
                writeln!(
                    out,
                    "{:<20} {:>16} {:>16} {:>14} {:>7.2}% {:>14} {:>8}",
                    row.name,
                    format_currency(row.final_value),
                    format_currency(row.total_contributions),
                    format_currency(row.total_dividends),
                    row.final_yield_on_cost_pct,
                    format_currency(row.final_annual_income),
                    mwr,
                )?;
            }
        }
        OutputFormat::Csv => report::export::write_csv(out, rows)?,
        OutputFormat::Json => report::write_json(out, rows)?,
    }
    Ok(())
}

fn write_summary(out: &mut dyn Write, summary: &ReportSummary) -> io::Result<()> {
    let p = &summary.portfolio;
    writeln!(out, "Final Value:   {}", format_currency(p.final_value))?;
    writeln!(out, "Contributions: {} ({:.1}%)", format_currency(p.contributions), p.contributions_share_pct)?;
    writeln!(out, "Dividends:     {} ({:.1}%)", format_currency(p.dividends), p.dividends_share_pct)?;
    writeln!(out, "Appreciation:  {} ({:.1}%)", format_currency(p.appreciation), p.appreciation_share_pct)?;
    writeln!(out)?;

    let d = &summary.dividends;
    writeln!(out, "Last Payment:    {}", format_currency(d.last_payment))?;
    writeln!(out, "Annual Income:   {}", format_currency(d.annual_income))?;
    writeln!(out, "Monthly Average: {}", format_currency(d.monthly_average))?;
    writeln!(out)?;

    let y = &summary.yield_on_cost;
    writeln!(out, "Initial Yield: {:.2}%", y.initial_pct)?;
    writeln!(out, "Final Yield:   {:.2}%", y.final_pct)?;
    if let Some(increase) = y.increase_pct {
        writeln!(out, "Increase:      {:.1}%", increase)?;
    }
    writeln!(out, "Est. Annual Income: {}", format_currency(y.estimated_annual_income))?;

    if let Some(mwr) = summary.money_weighted_return {
        writeln!(out, "Money-Weighted Return: {:.2}%", mwr * 100.0)?;
    }
    Ok(())
}
