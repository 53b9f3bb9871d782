//! Per-leg and per-cruise totals.
//!
//! Derived only by summing [`ActivityRecord`]s, so a summary can never
//! disagree with the timeline it describes.

use cp_core::time::minutes;
use cp_core::units::km_to_nm;
use cp_core::{LegId, Timestamp};

use crate::{ActivityRecord, RecordKind};

/// Totals for one leg.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LegSummary {
    pub leg: LegId,
    pub name: String,
    /// When the vessel leaves the previous position for this leg.
    pub start: Timestamp,
    pub end: Timestamp,
    pub operations: usize,
    pub transit_km: f64,
    pub transit_minutes: f64,
    pub wait_minutes: f64,
    /// Operation time including start/end delays.
    pub operation_minutes: f64,
    pub operation_km: f64,
    pub buffer_minutes: f64,
}

impl LegSummary {
    fn open(r: &ActivityRecord) -> Self {
        Self {
            leg:               r.leg,
            name:              r.leg_name.clone(),
            start:             r.start.checked_sub_signed(minutes(r.transit_minutes)).unwrap_or(r.start),
            end:               r.start,
            operations:        0,
            transit_km:        0.0,
            transit_minutes:   0.0,
            wait_minutes:      0.0,
            operation_minutes: 0.0,
            operation_km:      0.0,
            buffer_minutes:    0.0,
        }
    }

    fn add(&mut self, r: &ActivityRecord) {
        self.transit_km += r.transit_km;
        self.transit_minutes += r.transit_minutes;
        self.wait_minutes += r.wait_minutes;
        match r.kind {
            RecordKind::Operation => {
                self.operations += 1;
                self.operation_minutes += r.duration_minutes;
                self.operation_km += r.operation_km;
            }
            RecordKind::Buffer => self.buffer_minutes += r.duration_minutes,
            // Wait spans are counted through the operation's `wait_minutes`.
            RecordKind::Wait | RecordKind::PortDeparture | RecordKind::PortArrival => {}
        }
        self.end = r.end;
    }

    /// Total distance steamed, transit plus line work, km.
    pub fn distance_km(&self) -> f64 {
        self.transit_km + self.operation_km
    }

    pub fn distance_nm(&self) -> f64 {
        km_to_nm(self.distance_km())
    }

    /// Sum of every time component, minutes.
    pub fn total_minutes(&self) -> f64 {
        self.transit_minutes + self.wait_minutes + self.operation_minutes + self.buffer_minutes
    }
}

/// Totals for the whole cruise.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CruiseSummary {
    pub legs: Vec<LegSummary>,
    pub operations: usize,
    pub transit_km: f64,
    pub transit_minutes: f64,
    pub wait_minutes: f64,
    pub operation_minutes: f64,
    pub operation_km: f64,
    pub buffer_minutes: f64,
}

impl CruiseSummary {
    /// Summarise a timeline.  Records of one leg must be contiguous, as the
    /// scheduler emits them.
    pub fn from_records(records: &[ActivityRecord]) -> Self {
        let mut legs: Vec<LegSummary> = Vec::new();
        for r in records {
            match legs.last_mut() {
                Some(current) if current.leg == r.leg => current.add(r),
                _ => {
                    let mut next = LegSummary::open(r);
                    next.add(r);
                    legs.push(next);
                }
            }
        }

        let mut out = CruiseSummary::default();
        for l in &legs {
            out.operations += l.operations;
            out.transit_km += l.transit_km;
            out.transit_minutes += l.transit_minutes;
            out.wait_minutes += l.wait_minutes;
            out.operation_minutes += l.operation_minutes;
            out.operation_km += l.operation_km;
            out.buffer_minutes += l.buffer_minutes;
        }
        out.legs = legs;
        out
    }

    pub fn start(&self) -> Option<Timestamp> {
        self.legs.first().map(|l| l.start)
    }

    pub fn end(&self) -> Option<Timestamp> {
        self.legs.last().map(|l| l.end)
    }

    pub fn distance_km(&self) -> f64 {
        self.transit_km + self.operation_km
    }

    pub fn distance_nm(&self) -> f64 {
        km_to_nm(self.distance_km())
    }

    pub fn total_minutes(&self) -> f64 {
        self.transit_minutes + self.wait_minutes + self.operation_minutes + self.buffer_minutes
    }

    /// Total length in days.
    pub fn total_days(&self) -> f64 {
        self.total_minutes() / (24.0 * 60.0)
    }
}
