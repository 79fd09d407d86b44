//! Error types for scenario validation, projection lookups and input loading

use thiserror::Error;

/// Errors raised by scenario validation, event indexing and result lookups
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProjectionError {
    /// A scenario parameter is outside its allowed range, or the ages are out of order
    #[error("invalid scenario: {field} {reason}")]
    InvalidScenario { field: &'static str, reason: String },

    /// A custom cash-flow event falls outside the horizon or carries a bad amount
    #[error("invalid event #{index}: {reason}")]
    InvalidEvent { index: usize, reason: String },

    /// A result lookup asked for an age that was not simulated
    #[error("age {age} is outside the projected range {first}..={last}")]
    AgeOutOfRange { age: u32, first: u32, last: u32 },
}

impl ProjectionError {
    pub(crate) fn scenario(field: &'static str, reason: impl Into<String>) -> Self {
        ProjectionError::InvalidScenario {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn event(index: usize, reason: impl Into<String>) -> Self {
        ProjectionError::InvalidEvent {
            index,
            reason: reason.into(),
        }
    }
}

/// Errors raised while reading scenario or event files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed events CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: unknown event kind {kind:?}")]
    UnknownKind { row: usize, kind: String },

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}
