//! Non-fatal scheduling warnings.
//!
//! A warning never interrupts a run.  Each one is logged with `warn!` when
//! raised, passed to the observer, and returned in
//! [`Schedule::warnings`][crate::Schedule::warnings].

use cp_ops::{MissingDuration, Window};
use thiserror::Error;

/// Speeds outside this range (knots) are reported as unusual.
pub const USUAL_SPEED_KT: (f64, f64) = (1.0, 20.0);
/// Station spacings outside this range (km) are reported as unusual.
pub const USUAL_SPACING_KM: (f64, f64) = (4.0, 50.0);
/// Turnaround times above this (minutes) are reported as unusual.
pub const MAX_USUAL_TURNAROUND_MIN: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SchedulingWarning {
    #[error("operation {operation:?}: no manual duration for {missing:?}; scheduled with {minutes} min")]
    DefaultedDuration {
        operation: String,
        missing:   MissingDuration,
        minutes:   f64,
    },

    #[error(
        "operation {operation:?} needs {window:?} but takes {duration_minutes:.1} min, \
         longer than the {available_minutes:.1} min window"
    )]
    WindowTooShort {
        operation:         String,
        window:            Window,
        duration_minutes:  f64,
        available_minutes: f64,
    },

    #[error("operation {operation:?}: {window:?} window can never be met; scheduled without waiting")]
    UnreachableWindow { operation: String, window: Window },

    #[error(
        "leg {leg:?}, group {group:?}: spatial ordering stopped at the iteration cap; \
         using best order found"
    )]
    OrderingCapReached { leg: String, group: String },

    #[error("{entity:?}: vessel speed {knots} kt is unusual")]
    UnusualSpeed { entity: String, knots: f64 },

    #[error("{entity:?}: station spacing {km} km is unusual")]
    UnusualSpacing { entity: String, km: f64 },

    #[error("{entity:?}: turnaround {minutes} min is unusually long")]
    UnusualTurnaround { entity: String, minutes: f64 },
}

impl SchedulingWarning {
    /// Checks a leg's effective parameters against the usual ranges.
    pub(crate) fn for_parameters(
        entity:     &str,
        speed:      f64,
        spacing:    f64,
        turnaround: f64,
    ) -> Vec<SchedulingWarning> {
        let mut out = Vec::new();
        if !(USUAL_SPEED_KT.0..=USUAL_SPEED_KT.1).contains(&speed) {
            out.push(SchedulingWarning::UnusualSpeed { entity: entity.to_owned(), knots: speed });
        }
        if !(USUAL_SPACING_KM.0..=USUAL_SPACING_KM.1).contains(&spacing) {
            out.push(SchedulingWarning::UnusualSpacing { entity: entity.to_owned(), km: spacing });
        }
        if turnaround > MAX_USUAL_TURNAROUND_MIN {
            out.push(SchedulingWarning::UnusualTurnaround {
                entity:  entity.to_owned(),
                minutes: turnaround,
            });
        }
        out
    }
}
