//! `Cruise` — the root of the hierarchy.

use std::sync::Arc;

use cp_core::{CruiseDefaults, GeoPoint, LegId, OpId, Timestamp};
use cp_ops::{Operation, Waypoints};
use cp_strategy::DayWindow;
use rustc_hash::FxHashMap;

use crate::Leg;

/// A validated, immutable cruise plan.
///
/// Operations live in a flat catalog indexed by [`OpId`]; legs and clusters
/// share them by reference.  Build one with
/// [`CruiseBuilder`][crate::CruiseBuilder].
#[derive(Debug)]
pub struct Cruise {
    pub(crate) name: String,
    pub(crate) start: Timestamp,
    pub(crate) defaults: Arc<CruiseDefaults>,
    pub(crate) catalog: Vec<Arc<Operation>>,
    pub(crate) by_name: FxHashMap<String, OpId>,
    pub(crate) legs: Vec<Leg>,
}

impl Cruise {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Departure date and time of the first leg.
    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn defaults(&self) -> &CruiseDefaults {
        &self.defaults
    }

    pub fn day_window(&self) -> DayWindow {
        DayWindow::from_defaults(&self.defaults)
    }

    /// Legs in declaration order.  Never empty.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn leg(&self, id: LegId) -> Option<&Leg> {
        self.legs.get(id.index())
    }

    /// Where the vessel starts: the first leg's departure port.
    pub fn departure(&self) -> GeoPoint {
        self.legs[0].entry_point()
    }

    /// Where the vessel finishes: the last leg's arrival port.
    pub fn arrival(&self) -> GeoPoint {
        self.legs[self.legs.len() - 1].exit_point()
    }

    /// Every catalog operation, scheduled or not.
    pub fn operations(&self) -> impl Iterator<Item = (OpId, &Operation)> {
        self.catalog
            .iter()
            .enumerate()
            .map(|(i, op)| (OpId(i as u32), op.as_ref()))
    }

    pub fn operation(&self, id: OpId) -> Option<&Operation> {
        self.catalog.get(id.index()).map(Arc::as_ref)
    }

    pub fn find(&self, name: &str) -> Option<OpId> {
        self.by_name.get(name).copied()
    }
}
