//! Dividend Projection - monthly growth engine for dividend-paying portfolios
//!
//! This library provides:
//! - Validated, immutable projection parameters
//! - A deterministic month-by-month simulation of contributions, dividends,
//!   tax, reinvestment, price appreciation and dividend growth
//! - A reporting view (yearly table, summaries, CSV/JSON export)
//! - Parallel batch runs for comparing scenarios

pub mod error;
pub mod params;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{Error, InvalidParameterError};
pub use params::{ContributionSchedule, PaymentFrequency, PercentInputs, ProjectionParameters};
pub use projection::{run, MonthlySnapshot, ProjectionEngine, ProjectionResult};
pub use scenario::{Scenario, ScenarioRunner};
