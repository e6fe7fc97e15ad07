//! Projection parameters and scenario loading

mod data;
pub mod loader;

pub use data::{
    ContributionSchedule, PaymentFrequency, PercentInputs, ProjectionParameters,
    MAX_ANNUAL_APPRECIATION, MAX_ANNUAL_DIVIDEND_GROWTH, MAX_YEARS_INVESTED,
};
pub use loader::{load_scenarios, load_scenarios_from_reader};
