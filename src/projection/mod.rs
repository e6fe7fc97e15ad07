//! Projection engine for dividend portfolio growth

mod state;
mod engine;
mod snapshots;
mod irr;

pub use state::ProjectionState;
pub use engine::{run, ProjectionEngine};
pub use snapshots::{MonthlySnapshot, ProjectionResult, ProjectionSummary};
pub use irr::calculate_irr;
