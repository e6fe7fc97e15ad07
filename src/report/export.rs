//! CSV, JSON and plain-text output of projection results

use std::io::Write;

use serde::{Deserialize, Serialize};

use super::annual::AnnualRow;
use crate::error::Result;
use crate::projection::{MonthlySnapshot, ProjectionResult};

/// Monthly snapshot with the derived reporting columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Years")]
    pub years: f64,
    #[serde(rename = "Portfolio Value")]
    pub portfolio_value: f64,
    #[serde(rename = "Cumulative Contributions")]
    pub cumulative_contributions: f64,
    #[serde(rename = "Cumulative Dividends")]
    pub cumulative_dividends: f64,
    #[serde(rename = "Appreciation")]
    pub appreciation: f64,
    #[serde(rename = "Dividend Income")]
    pub dividend_income: f64,
    #[serde(rename = "Yield on Cost")]
    pub yield_on_cost_pct: f64,
}

impl From<&MonthlySnapshot> for SnapshotRecord {
    fn from(s: &MonthlySnapshot) -> Self {
        Self {
            month: s.month,
            years: s.years(),
            portfolio_value: s.portfolio_value,
            cumulative_contributions: s.cumulative_contributions,
            cumulative_dividends: s.cumulative_dividends,
            appreciation: s.appreciation(),
            dividend_income: s.dividend_payment,
            yield_on_cost_pct: s.yield_on_cost_pct,
        }
    }
}

/// Write every month of a projection as CSV
pub fn write_monthly_csv<W: Write>(writer: W, result: &ProjectionResult) -> Result<()> {
    write_csv(writer, result.snapshots.iter().map(SnapshotRecord::from))
}

/// Write the yearly table as CSV
pub fn write_annual_csv<W: Write>(writer: W, rows: &[AnnualRow]) -> Result<()> {
    write_csv(writer, rows.iter())
}

/// Serialize any record sequence as CSV with a header row
pub fn write_csv<W, I, T>(writer: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write any serializable value as pretty JSON
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Format a currency amount with thousands separators, e.g. `$12,345.67`
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{cents}")
}

/// Render the yearly table as fixed-width text
pub fn format_annual_table(rows: &[AnnualRow]) -> String {
    let header = format!(
        "{:>5} {:>16} {:>16} {:>14} {:>16} {:>14} {:>12} {:>8}\n",
        "Year", "Portfolio", "Contributions", "Dividends", "Appreciation", "Annual Inc", "Monthly Inc", "YoC"
    );
    let rule = "-".repeat(header.trim_end().len());

    let mut out = String::with_capacity(header.len() * (rows.len() + 2));
    out.push_str(&header);
    out.push_str(&rule);
    out.push('\n');

    for row in rows {
        out.push_str(&format!(
            "{:>5.1} {:>16} {:>16} {:>14} {:>16} {:>14} {:>12} {:>7.2}%\n",
            row.year,
            format_currency(row.portfolio_value),
            format_currency(row.total_contributions),
            format_currency(row.total_dividends),
            format_currency(row.total_appreciation),
            format_currency(row.annual_dividend_income),
            format_currency(row.monthly_dividend_income),
            row.yield_on_cost_pct,
        ));
    }

    out
}
