//! Fluent builder for constructing a [`Cruise`].
//!
//! The builder is the only way to obtain a `Cruise`.  `build` resolves every
//! name to an [`OpId`], decides which list governs each leg, wraps bare
//! operations into implicit clusters, and runs the checks listed on
//! [`CruiseBuilder::build`].  Anything it accepts can be scheduled without
//! a configuration error.

use std::sync::{Arc, OnceLock};

use cp_core::{ClusterId, CruiseDefaults, GeoPoint, LegId, OpId, Timestamp};
use cp_ops::{DurationContext, Operation};
use cp_strategy::Strategy;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::{Cluster, ConfigurationError, Cruise, Layout, Leg, PlanResult, Port};

// ── ClusterSpec ───────────────────────────────────────────────────────────────

/// Declaration of a named cluster inside a leg.
#[derive(Clone, Debug)]
pub struct ClusterSpec {
    name:       String,
    activities: Vec<String>,
    strategy:   Option<Strategy>,
    order:      Option<Vec<String>>,
}

impl ClusterSpec {
    /// A cluster over the named operations, in author order.
    pub fn new<S: Into<String>>(name: impl Into<String>, activities: impl IntoIterator<Item = S>) -> Self {
        Self {
            name:       name.into(),
            activities: activities.into_iter().map(Into::into).collect(),
            strategy:   None,
            order:      None,
        }
    }

    /// Strategy for this cluster.  Falls back to the leg's.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Fix the visiting order explicitly.
    ///
    /// Must list every activity exactly once.  Disables spatial
    /// reordering; daylight waits still apply.
    pub fn order<S: Into<String>>(mut self, order: impl IntoIterator<Item = S>) -> Self {
        self.order = Some(order.into_iter().map(Into::into).collect());
        self
    }
}

// ── LegSpec ───────────────────────────────────────────────────────────────────

/// Declaration of one leg.
///
/// | Method         | Default                         |
/// |----------------|---------------------------------|
/// | `.speed(kt)`   | cruise `vessel_speed_knots`     |
/// | `.turnaround()`| cruise `turnaround_minutes`     |
/// | `.spacing(km)` | cruise `station_spacing_km`     |
/// | `.strategy(s)` | `Strategy::Sequential`          |
/// | `.buffer(min)` | 0                               |
#[derive(Clone, Debug)]
pub struct LegSpec {
    name:       String,
    departure:  Port,
    arrival:    Port,
    sequence:   Vec<String>,
    clusters:   Vec<ClusterSpec>,
    stations:   Vec<String>,
    sections:   Vec<String>,
    speed:      Option<f64>,
    turnaround: Option<f64>,
    spacing:    Option<f64>,
    strategy:   Option<Strategy>,
    buffer:     f64,
}

impl LegSpec {
    pub fn new(name: impl Into<String>, departure: Port, arrival: Port) -> Self {
        Self {
            name: name.into(),
            departure,
            arrival,
            sequence:   Vec::new(),
            clusters:   Vec::new(),
            stations:   Vec::new(),
            sections:   Vec::new(),
            speed:      None,
            turnaround: None,
            spacing:    None,
            strategy:   None,
            buffer:     0.0,
        }
    }

    /// Explicit ordering over operation and cluster names.  Highest priority.
    pub fn sequence<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.sequence = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn cluster(mut self, cluster: ClusterSpec) -> Self {
        self.clusters.push(cluster);
        self
    }

    /// Flat station list.
    pub fn stations<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.stations = names.into_iter().map(Into::into).collect();
        self
    }

    /// Unexpanded sections; each is scheduled as the line it names.
    pub fn sections<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.sections = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn speed(mut self, knots: f64) -> Self {
        self.speed = Some(knots);
        self
    }

    pub fn turnaround(mut self, minutes: f64) -> Self {
        self.turnaround = Some(minutes);
        self
    }

    pub fn spacing(mut self, km: f64) -> Self {
        self.spacing = Some(km);
        self
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Contingency appended once after the leg, minutes.
    pub fn buffer(mut self, minutes: f64) -> Self {
        self.buffer = minutes;
        self
    }

    fn layout(&self) -> Option<Layout> {
        if !self.sequence.is_empty() {
            Some(Layout::Sequence)
        } else if !self.clusters.is_empty() {
            Some(Layout::Clusters)
        } else if !self.stations.is_empty() {
            Some(Layout::Stations)
        } else if !self.sections.is_empty() {
            Some(Layout::Sections)
        } else {
            None
        }
    }
}

// ── CruiseBuilder ─────────────────────────────────────────────────────────────

/// Fluent builder for [`Cruise`].
///
/// # Example
///
/// ```rust,ignore
/// let cruise = CruiseBuilder::new("MV-2028", start)
///     .operation(PointOperation::new("STN_001", GeoPoint::new(50.0, -40.0)).depth(2000.0))
///     .operation(PointOperation::new("STN_002", GeoPoint::new(50.5, -40.0)).depth(3000.0))
///     .leg(LegSpec::new("Atlantic", halifax, st_johns).stations(["STN_001", "STN_002"]))
///     .build()?;
/// ```
pub struct CruiseBuilder {
    name:       String,
    start:      Timestamp,
    defaults:   CruiseDefaults,
    operations: Vec<Operation>,
    legs:       Vec<LegSpec>,
}

impl CruiseBuilder {
    pub fn new(name: impl Into<String>, start: Timestamp) -> Self {
        Self {
            name: name.into(),
            start,
            defaults:   CruiseDefaults::default(),
            operations: Vec::new(),
            legs:       Vec::new(),
        }
    }

    /// Replace the global defaults.  If not called, `CruiseDefaults::default()`.
    pub fn defaults(mut self, defaults: CruiseDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Add an operation to the catalog.
    ///
    /// Catalog operations are only scheduled when a leg references them.
    pub fn operation(mut self, op: impl Into<Operation>) -> Self {
        self.operations.push(op.into());
        self
    }

    pub fn operations<O: Into<Operation>>(mut self, ops: impl IntoIterator<Item = O>) -> Self {
        self.operations.extend(ops.into_iter().map(Into::into));
        self
    }

    pub fn leg(mut self, leg: LegSpec) -> Self {
        self.legs.push(leg);
        self
    }

    /// Validate everything and return an immutable [`Cruise`].
    ///
    /// # Errors
    ///
    /// A [`ConfigurationError`] naming the offending entity when:
    ///
    /// - there are no legs, or a leg or cluster schedules nothing;
    /// - a name is duplicated (operations, legs, clusters within a leg, or a
    ///   cluster sharing an operation's name);
    /// - any list of any leg names something that does not exist;
    /// - a cluster `order` is not a permutation of its activities;
    /// - a coordinate is out of range, or `-180..180` and `0..360`
    ///   longitudes are mixed anywhere in the cruise;
    /// - a default or override is out of range (speeds and rates ≤ 0,
    ///   negative durations, depths, delays or buffers, an empty or
    ///   out-of-range day window);
    /// - an operation's duration cannot be computed with the cruise
    ///   defaults (degenerate geometry).
    pub fn build(self) -> PlanResult<Cruise> {
        check_defaults(&self.name, &self.defaults)?;

        // ── Catalog ───────────────────────────────────────────────────────
        let mut by_name: FxHashMap<String, OpId> = FxHashMap::default();
        let ctx = DurationContext::from_defaults(&self.defaults);
        for (i, op) in self.operations.iter().enumerate() {
            let id = OpId::try_from(i).map_err(|_| ConfigurationError::TooMany("operations"))?;
            if by_name.insert(op.name().to_owned(), id).is_some() {
                return Err(ConfigurationError::DuplicateName {
                    kind: "operation",
                    name: op.name().to_owned(),
                });
            }
            check_operation(op)?;
            op.calculate_duration(&ctx)?;
        }
        let catalog: Vec<Arc<Operation>> = self.operations.into_iter().map(Arc::new).collect();

        check_longitudes(&catalog, &self.legs)?;

        // ── Legs ──────────────────────────────────────────────────────────
        if self.legs.is_empty() {
            return Err(ConfigurationError::NoLegs);
        }
        let defaults = Arc::new(self.defaults);
        let mut leg_names: FxHashSet<&str> = FxHashSet::default();
        for spec in &self.legs {
            if !leg_names.insert(&spec.name) {
                return Err(ConfigurationError::DuplicateName { kind: "leg", name: spec.name.clone() });
            }
        }

        let resolver = Resolver { catalog: &catalog, by_name: &by_name };
        let mut legs = Vec::with_capacity(self.legs.len());
        for (i, spec) in self.legs.iter().enumerate() {
            let id = LegId::try_from(i).map_err(|_| ConfigurationError::TooMany("legs"))?;
            legs.push(resolver.leg(id, spec, &defaults)?);
        }

        debug!(
            cruise = %self.name,
            operations = catalog.len(),
            legs = legs.len(),
            "cruise built"
        );

        Ok(Cruise {
            name: self.name,
            start: self.start,
            defaults,
            catalog,
            by_name,
            legs,
        })
    }
}

// ── Reference resolution ──────────────────────────────────────────────────────

struct Resolver<'a> {
    catalog: &'a [Arc<Operation>],
    by_name: &'a FxHashMap<String, OpId>,
}

/// A resolved entry of a governing list.
enum Item<'s> {
    Op(OpId),
    Cluster(&'s ClusterSpec),
}

impl Resolver<'_> {
    fn op(&self, leg: &str, name: &str) -> PlanResult<(OpId, Arc<Operation>)> {
        let id = self.by_name.get(name).copied().ok_or_else(|| {
            ConfigurationError::UnknownReference { leg: leg.to_owned(), name: name.to_owned() }
        })?;
        Ok((id, Arc::clone(&self.catalog[id.index()])))
    }

    fn leg(&self, id: LegId, spec: &LegSpec, defaults: &Arc<CruiseDefaults>) -> PlanResult<Leg> {
        check_leg(spec)?;
        let layout = spec.layout().ok_or_else(|| ConfigurationError::EmptyLeg(spec.name.clone()))?;

        // Cluster names, checked before any list is resolved against them.
        let mut clusters: FxHashMap<&str, &ClusterSpec> = FxHashMap::default();
        for c in &spec.clusters {
            if self.by_name.contains_key(&c.name) || clusters.insert(&c.name, c).is_some() {
                return Err(ConfigurationError::DuplicateName { kind: "cluster", name: c.name.clone() });
            }
            if c.activities.is_empty() {
                return Err(ConfigurationError::EmptyCluster {
                    leg:     spec.name.clone(),
                    cluster: c.name.clone(),
                });
            }
            for name in &c.activities {
                self.op(&spec.name, name)?;
            }
        }

        // Every list is existence-checked, governing or not.
        let mut sequence = Vec::with_capacity(spec.sequence.len());
        for name in &spec.sequence {
            match clusters.get(name.as_str()) {
                Some(c) => sequence.push(Item::Cluster(c)),
                None => sequence.push(Item::Op(self.op(&spec.name, name)?.0)),
            }
        }
        let stations = spec
            .stations
            .iter()
            .map(|n| self.op(&spec.name, n))
            .collect::<PlanResult<Vec<_>>>()?;
        let sections = spec
            .sections
            .iter()
            .map(|n| self.op(&spec.name, n))
            .collect::<PlanResult<Vec<_>>>()?;

        let leg_strategy = spec.strategy.unwrap_or_default();
        let cap = defaults.tsp_iteration_cap;
        let mut groups: Vec<Cluster> = Vec::new();
        let mut push = |name: Option<String>,
                        strategy: Strategy,
                        explicit_order: bool,
                        ops: Vec<(OpId, Arc<Operation>)>|
         -> PlanResult<()> {
            let cid = ClusterId::try_from(groups.len())
                .map_err(|_| ConfigurationError::TooMany("clusters"))?;
            groups.push(Cluster {
                id: cid,
                name,
                strategy,
                explicit_order,
                ops,
                iteration_cap: cap,
                resolved: OnceLock::new(),
            });
            Ok(())
        };

        match layout {
            Layout::Sequence => {
                // Consecutive bare operations share one implicit group.
                let mut run: Vec<(OpId, Arc<Operation>)> = Vec::new();
                for item in sequence {
                    match item {
                        Item::Op(op) => run.push((op, Arc::clone(&self.catalog[op.index()]))),
                        Item::Cluster(c) => {
                            if !run.is_empty() {
                                push(None, leg_strategy, false, std::mem::take(&mut run))?;
                            }
                            let (ops, explicit) = self.cluster_ops(&spec.name, c)?;
                            push(Some(c.name.clone()), c.strategy.unwrap_or(leg_strategy), explicit, ops)?;
                        }
                    }
                }
                if !run.is_empty() {
                    push(None, leg_strategy, false, run)?;
                }
            }
            Layout::Clusters => {
                for c in &spec.clusters {
                    let (ops, explicit) = self.cluster_ops(&spec.name, c)?;
                    push(Some(c.name.clone()), c.strategy.unwrap_or(leg_strategy), explicit, ops)?;
                }
            }
            Layout::Stations => push(None, leg_strategy, false, stations)?,
            Layout::Sections => push(None, leg_strategy, false, sections)?,
        }

        debug!(
            leg = %spec.name,
            ?layout,
            groups = groups.len(),
            strategy = %leg_strategy,
            "leg resolved"
        );

        Ok(Leg {
            id,
            name: spec.name.clone(),
            departure: spec.departure.clone(),
            arrival: spec.arrival.clone(),
            speed_knots: spec.speed,
            turnaround_minutes: spec.turnaround,
            spacing_km: spec.spacing,
            strategy: spec.strategy,
            buffer_minutes: spec.buffer,
            layout,
            groups,
            defaults: Arc::clone(defaults),
        })
    }

    /// Operations of a named cluster, in explicit order if one is given.
    fn cluster_ops(&self, leg: &str, c: &ClusterSpec) -> PlanResult<(Vec<(OpId, Arc<Operation>)>, bool)> {
        let Some(order) = &c.order else {
            let ops = c.activities.iter().map(|n| self.op(leg, n)).collect::<PlanResult<_>>()?;
            return Ok((ops, false));
        };

        let mut expected: Vec<&str> = c.activities.iter().map(String::as_str).collect();
        let mut given: Vec<&str> = order.iter().map(String::as_str).collect();
        expected.sort_unstable();
        given.sort_unstable();
        if expected != given {
            return Err(ConfigurationError::InvalidOrdering {
                leg:     leg.to_owned(),
                cluster: c.name.clone(),
            });
        }
        let ops = order.iter().map(|n| self.op(leg, n)).collect::<PlanResult<_>>()?;
        Ok((ops, true))
    }
}

// ── Range checks ──────────────────────────────────────────────────────────────

fn invalid(entity: &str, what: &'static str, value: f64, expected: &'static str) -> ConfigurationError {
    ConfigurationError::InvalidParameter { entity: entity.to_owned(), what, value, expected }
}

fn positive(entity: &str, what: &'static str, value: f64) -> PlanResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(entity, what, value, "> 0"))
    }
}

fn non_negative(entity: &str, what: &'static str, value: f64) -> PlanResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(entity, what, value, ">= 0"))
    }
}

fn check_defaults(cruise: &str, d: &CruiseDefaults) -> PlanResult<()> {
    positive(cruise, "vessel speed (kt)", d.vessel_speed_knots)?;
    non_negative(cruise, "turnaround (min)", d.turnaround_minutes)?;
    positive(cruise, "descent rate (m/s)", d.descent_rate_m_s)?;
    positive(cruise, "ascent rate (m/s)", d.ascent_rate_m_s)?;
    non_negative(cruise, "bottom time (min)", d.bottom_time_minutes)?;
    positive(cruise, "station spacing (km)", d.station_spacing_km)?;
    non_negative(cruise, "missing-duration default (min)", d.missing_duration_minutes)?;
    if d.day_end_hour > 24 {
        return Err(invalid(cruise, "day end hour", f64::from(d.day_end_hour), "<= 24"));
    }
    if d.day_start_hour >= d.day_end_hour {
        return Err(invalid(cruise, "day start hour", f64::from(d.day_start_hour), "< day end hour"));
    }
    Ok(())
}

fn check_point(entity: &str, p: GeoPoint) -> PlanResult<()> {
    if p.is_valid() {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidCoordinate { entity: entity.to_owned(), point: p })
    }
}

fn check_operation(op: &Operation) -> PlanResult<()> {
    let name = op.name();
    for &p in op.coordinates() {
        check_point(name, p)?;
    }
    if let Some(m) = op.manual_duration() {
        non_negative(name, "duration (min)", m)?;
    }
    if let Some(d) = op.depth() {
        non_negative(name, "depth (m)", d)?;
    }
    let meta = op.meta();
    non_negative(name, "delay_start (min)", meta.delay_start_minutes)?;
    non_negative(name, "delay_end (min)", meta.delay_end_minutes)?;
    if let Operation::Line(line) = op
        && let Some(speed) = line.speed_knots
    {
        positive(name, "line speed (kt)", speed)?;
    }
    Ok(())
}

fn check_leg(spec: &LegSpec) -> PlanResult<()> {
    let name = &spec.name;
    check_point(&spec.departure.name, spec.departure.position)?;
    check_point(&spec.arrival.name, spec.arrival.position)?;
    if let Some(v) = spec.speed {
        positive(name, "vessel speed (kt)", v)?;
    }
    if let Some(v) = spec.turnaround {
        non_negative(name, "turnaround (min)", v)?;
    }
    if let Some(v) = spec.spacing {
        positive(name, "station spacing (km)", v)?;
    }
    non_negative(name, "buffer (min)", spec.buffer)
}

/// Rejects a cruise that mixes `-180..180` and `0..360` longitudes.
fn check_longitudes(catalog: &[Arc<Operation>], legs: &[LegSpec]) -> PlanResult<()> {
    let ops = catalog
        .iter()
        .flat_map(|op| op.coordinates().iter().map(move |p| (op.name(), *p)));
    let ports = legs.iter().flat_map(|l| {
        [
            (l.departure.name.as_str(), l.departure.position),
            (l.arrival.name.as_str(), l.arrival.position),
        ]
    });

    let mut signed: Option<&str> = None;
    let mut positive: Option<&str> = None;
    for (name, p) in ops.chain(ports) {
        if p.uses_signed_longitudes() {
            signed.get_or_insert(name);
        }
        if p.uses_positive_longitudes() {
            positive.get_or_insert(name);
        }
        if let (Some(s), Some(pos)) = (signed, positive) {
            return Err(ConfigurationError::MixedLongitude {
                signed:   s.to_owned(),
                positive: pos.to_owned(),
            });
        }
    }
    Ok(())
}
