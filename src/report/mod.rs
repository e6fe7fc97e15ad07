//! Reporting view over a finished projection
//!
//! Everything here reads the snapshot series without changing it: a yearly
//! table, headline summaries, and CSV/JSON/text output.

mod annual;
mod summary;
pub mod export;

pub use annual::{annual_indices, annual_table, annualized_dividend_series, trailing_annual_income, AnnualRow};
pub use summary::{DividendIncomeSummary, PortfolioBreakdown, ReportSummary, YieldOnCostSummary};
pub use export::{format_annual_table, format_currency, write_annual_csv, write_json, write_monthly_csv, SnapshotRecord};
