//! `Leg` — a contiguous cruise phase between two ports.
//!
//! # Parameter inheritance
//!
//! Speed, turnaround, and station spacing resolve leg override → cruise
//! default.  Every duration and distance computed inside the leg goes
//! through [`Leg::duration_context`] or the `effective_*` accessors, so a
//! leg override applies uniformly.  Operation-level overrides (a line's own
//! speed) sit one level further down and are resolved by the operation.
//!
//! # Ordering priority
//!
//! Exactly one list governs a leg's ordering, highest priority first:
//!
//! | Priority | List        | Meaning                                         |
//! |----------|-------------|-------------------------------------------------|
//! | 1        | `sequence`  | explicit mix of operations and cluster names    |
//! | 2        | `clusters`  | clusters in declaration order                   |
//! | 3        | `stations`  | flat list of operations                         |
//! | 4        | `sections`  | unexpanded sections, scheduled as lines         |
//!
//! Names in the non-governing lists are still existence-checked.

use std::sync::Arc;

use cp_core::{CruiseDefaults, GeoPoint, LegId};
use cp_ops::{DurationContext, Waypoints, resolve};
use cp_strategy::Strategy;

use crate::Cluster;

// ── Port ──────────────────────────────────────────────────────────────────────

/// A named harbour position anchoring a leg.
#[derive(Clone, Debug, PartialEq)]
pub struct Port {
    pub name: String,
    pub position: GeoPoint,
}

impl Port {
    pub fn new(name: impl Into<String>, position: GeoPoint) -> Self {
        Self { name: name.into(), position }
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Which list governed the leg's ordering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    Sequence,
    Clusters,
    Stations,
    Sections,
}

// ── Leg ───────────────────────────────────────────────────────────────────────

/// One leg of the cruise.  Built by [`CruiseBuilder`][crate::CruiseBuilder].
#[derive(Debug)]
pub struct Leg {
    pub(crate) id: LegId,
    pub(crate) name: String,
    pub(crate) departure: Port,
    pub(crate) arrival: Port,
    pub(crate) speed_knots: Option<f64>,
    pub(crate) turnaround_minutes: Option<f64>,
    pub(crate) spacing_km: Option<f64>,
    pub(crate) strategy: Option<Strategy>,
    pub(crate) buffer_minutes: f64,
    pub(crate) layout: Layout,
    pub(crate) groups: Vec<Cluster>,
    pub(crate) defaults: Arc<CruiseDefaults>,
}

impl Leg {
    pub fn id(&self) -> LegId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn departure(&self) -> &Port {
        &self.departure
    }

    pub fn arrival(&self) -> &Port {
        &self.arrival
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Groups in scheduling order.  Each is a named or implicit cluster.
    pub fn groups(&self) -> &[Cluster] {
        &self.groups
    }

    /// Named clusters only.
    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.groups.iter().filter(|c| !c.is_implicit())
    }

    /// Number of operations the leg schedules.
    pub fn operation_count(&self) -> usize {
        self.groups.iter().map(Cluster::len).sum()
    }

    /// Contingency appended once after the leg's arrival, minutes.
    pub fn buffer_minutes(&self) -> f64 {
        self.buffer_minutes
    }

    // ── Effective parameters ──────────────────────────────────────────────

    /// Vessel speed for transits inside this leg, knots.
    pub fn effective_speed(&self) -> f64 {
        resolve(&[self.speed_knots], self.defaults.vessel_speed_knots)
    }

    /// Turnaround time, minutes.
    pub fn effective_turnaround(&self) -> f64 {
        resolve(&[self.turnaround_minutes], self.defaults.turnaround_minutes)
    }

    /// Distance between section stations, km.
    pub fn effective_spacing(&self) -> f64 {
        resolve(&[self.spacing_km], self.defaults.station_spacing_km)
    }

    /// Strategy for groups that don't set their own.
    pub fn effective_strategy(&self) -> Strategy {
        self.strategy.unwrap_or_default()
    }

    /// Duration parameters with this leg's overrides applied.
    pub fn duration_context(&self) -> DurationContext {
        DurationContext {
            speed_knots: self.effective_speed(),
            turnaround_minutes: self.effective_turnaround(),
            ..DurationContext::from_defaults(&self.defaults)
        }
    }
}

impl Waypoints for Leg {
    fn entry_point(&self) -> GeoPoint {
        self.departure.position
    }

    fn exit_point(&self) -> GeoPoint {
        self.arrival.position
    }
}
