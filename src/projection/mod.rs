//! Projection engine for yearly portfolio projections

mod state;
mod engine;
mod events;
mod table;

pub use state::ProjectionState;
pub use engine::ProjectionEngine;
pub use events::EventIndex;
pub use table::{ProjectionResult, ProjectionSummary, YearRecord};
