//! `ActivityRecord` — one timed entry of the schedule.
//!
//! Records are produced once per run and never mutated.  Every renderer and
//! every summary reads them; nothing downstream recomputes distances or
//! times on its own.

use cp_core::time::as_minutes;
use cp_core::units::km_to_nm;
use cp_core::{GeoPoint, LegId, OpId, Timestamp};

/// What a record represents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RecordKind {
    /// Arrival at the leg's departure port (transit from the previous leg).
    PortDeparture,
    /// A scheduled operation.
    Operation,
    /// Zero-distance hold before a daylight- or night-dependent operation.
    Wait,
    /// Arrival at the leg's arrival port.
    PortArrival,
    /// The leg's contingency time.
    Buffer,
}

impl RecordKind {
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::PortDeparture => "port_departure",
            RecordKind::Operation     => "operation",
            RecordKind::Wait          => "wait",
            RecordKind::PortArrival   => "port_arrival",
            RecordKind::Buffer        => "buffer",
        }
    }
}

/// A timed activity.
///
/// `transit_*` describe the passage *into* this record from the previous
/// record's exit position; it happens before `start`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ActivityRecord {
    /// Operation or port name; `"wait"`/`"buffer"` records reuse the name
    /// of the entity they belong to.
    pub label: String,
    pub kind: RecordKind,
    /// Catalog id for operation and wait records.
    pub op: Option<OpId>,
    /// Operation type label (`CTD`, `mooring`, `line`, …).
    pub op_type: Option<&'static str>,

    pub leg: LegId,
    pub leg_name: String,
    /// Named cluster the operation belongs to; `None` for implicit groups
    /// and port/buffer records.
    pub cluster: Option<String>,

    /// Where the activity begins.
    pub position: GeoPoint,
    /// Where the activity ends (differs from `position` for lines).
    pub exit_position: GeoPoint,
    pub depth: Option<f64>,

    pub start: Timestamp,
    pub end: Timestamp,
    /// `end - start` in minutes, delays included.
    pub duration_minutes: f64,

    pub transit_km: f64,
    /// `transit_km` in nautical miles.
    pub transit_nm: f64,
    pub transit_minutes: f64,
    /// Hold inserted before this operation; the same span is also emitted as
    /// its own `Wait` record.
    pub wait_minutes: f64,
    /// Distance covered while working (lines only), km.
    pub operation_km: f64,
    /// Vessel speed used for the inbound transit, knots.
    pub speed_knots: f64,
}

impl ActivityRecord {
    #[inline]
    pub fn operation_nm(&self) -> f64 {
        km_to_nm(self.operation_km)
    }

    /// Span measured on the timestamps, minutes.
    pub fn span_minutes(&self) -> f64 {
        as_minutes(self.end - self.start)
    }

    #[inline]
    pub fn is_operation(&self) -> bool {
        self.kind == RecordKind::Operation
    }
}
