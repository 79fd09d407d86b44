//! Investment Projection - year-by-year portfolio projection to age 100
//!
//! This library provides:
//! - Scenario parameters and custom cash-flow events, with validation
//! - A deterministic projection engine (lump sum, stepped-up monthly
//!   contributions, custom investments/withdrawals, escalating SWP)
//! - A result table with lookup by age and summary statistics
//! - Parallel what-if runs over a base scenario
//! - Currency formatting, text tables and CSV export

pub mod error;
pub mod plan;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{LoadError, ProjectionError};
pub use plan::{CustomCashFlowEvent, EventKind, ScenarioFile, ScenarioParameters};
pub use projection::{ProjectionEngine, ProjectionResult, YearRecord};
pub use report::Currency;
pub use scenario::ScenarioRunner;
