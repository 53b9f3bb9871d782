//! Calculation error type.
//!
//! A `CalculationError` means the geometry or a rate handed to a calculator
//! cannot produce a number.  Upstream validation should already reject
//! these inputs; the checks are repeated here because a wrong number in a
//! timeline is worse than an aborted run.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    #[error("area polygon has {corners} corner(s); at least 3 are required")]
    DegeneratePolygon { corners: usize },

    #[error("line route has {waypoints} waypoint(s); at least 2 are required")]
    DegenerateRoute { waypoints: usize },

    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("timeline runs past the last representable date at {activity:?}")]
    TimelineOverflow { activity: String },

    #[error("{what} for operation {operation:?}: {source}")]
    InOperation {
        operation: String,
        what:      &'static str,
        #[source]
        source:    Box<CalculationError>,
    },
}

impl CalculationError {
    /// Attach the name of the operation whose calculation failed.
    pub fn in_operation(self, operation: impl Into<String>, what: &'static str) -> Self {
        CalculationError::InOperation {
            operation: operation.into(),
            what,
            source: Box::new(self),
        }
    }
}

/// Shorthand result type for calculator functions.
pub type CalcResult<T> = Result<T, CalculationError>;
