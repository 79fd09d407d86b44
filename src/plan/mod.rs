//! Scenario inputs: parameters, custom cash-flow events and file loading

mod data;
pub mod loader;

pub use data::{
    CustomCashFlowEvent, EventKind, ScenarioParameters, EVENT_GROWTH_RANGE, MIN_AGE, TERMINAL_AGE,
};
pub use loader::{
    load_events, load_events_from_reader, load_scenario, load_scenario_from_reader, ScenarioFile,
};
