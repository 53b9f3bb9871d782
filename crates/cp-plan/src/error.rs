//! Configuration errors.
//!
//! All of these are fatal and raised by [`CruiseBuilder::build`]
//! before any scheduling starts; each names the offending entity.
//!
//! [`CruiseBuilder::build`]: crate::CruiseBuilder::build

use cp_core::{CalculationError, GeoPoint};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("cruise has no legs")]
    NoLegs,

    #[error("leg {leg:?} references unknown activity {name:?}")]
    UnknownReference { leg: String, name: String },

    #[error("duplicate {kind} name {name:?}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("{entity:?} has coordinate {point} outside the valid range")]
    InvalidCoordinate { entity: String, point: GeoPoint },

    #[error(
        "mixed longitude conventions: {signed:?} uses -180..180 while {positive:?} uses 0..360"
    )]
    MixedLongitude { signed: String, positive: String },

    #[error("leg {0:?} schedules no activities")]
    EmptyLeg(String),

    #[error("cluster {cluster:?} in leg {leg:?} has no activities")]
    EmptyCluster { leg: String, cluster: String },

    #[error("cluster {cluster:?} in leg {leg:?}: order must list each activity exactly once")]
    InvalidOrdering { leg: String, cluster: String },

    #[error("{entity:?}: {what} = {value} is out of range (expected {expected})")]
    InvalidParameter {
        entity:   String,
        what:     &'static str,
        value:    f64,
        expected: &'static str,
    },

    #[error("too many {0} for the identifier range")]
    TooMany(&'static str),

    #[error(transparent)]
    Calculation(#[from] CalculationError),
}

pub type PlanResult<T> = Result<T, ConfigurationError>;
