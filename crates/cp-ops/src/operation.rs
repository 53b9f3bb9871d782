//! Operation types: `PointOperation`, `LineOperation`, `AreaOperation`, and
//! the `Operation` sum type that dispatches between them.
//!
//! # Entry and exit
//!
//! | Variant | Entry            | Exit            |
//! |---------|------------------|-----------------|
//! | Point   | location         | location        |
//! | Line    | first waypoint   | last waypoint   |
//! | Area    | corner centroid  | corner centroid |
//!
//! Organizational units (legs, clusters) implement the same [`Waypoints`]
//! contract so that transit between any two entities is routed by one code
//! path.

use cp_core::{CalcResult, CalculationError, GeoPoint, centroid, route_distance};

use crate::duration::{self, Duration, DurationContext, DurationSource, MissingDuration};
use crate::resolve;

// ── Waypoints ─────────────────────────────────────────────────────────────────

/// Anything the vessel can be routed into and out of.
pub trait Waypoints {
    /// Where the vessel must be to begin.
    fn entry_point(&self) -> GeoPoint;

    /// Where the vessel is when finished.
    fn exit_point(&self) -> GeoPoint;
}

// ── Tags ──────────────────────────────────────────────────────────────────────

/// What kind of work a point operation performs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OperationType {
    #[default]
    Ctd,
    WaterSampling,
    Calibration,
    Mooring,
    Waypoint,
}

impl OperationType {
    /// Profiling types lower an instrument through the water column and use
    /// the depth-based duration formula.
    #[inline]
    pub fn is_profiling(self) -> bool {
        matches!(
            self,
            OperationType::Ctd | OperationType::WaterSampling | OperationType::Calibration
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            OperationType::Ctd           => "CTD",
            OperationType::WaterSampling => "water_sampling",
            OperationType::Calibration   => "calibration",
            OperationType::Mooring       => "mooring",
            OperationType::Waypoint      => "waypoint",
        }
    }
}

/// The specific scientific action an operation carries out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Action {
    Profile,
    Sampling,
    Deployment,
    Recovery,
    Calibration,
    Adcp,
    Bathymetry,
    Thermosalinograph,
    TowYo,
    Seismic,
    Microstructure,
    /// A CTD section that has not been expanded into stations.
    Section,
    Survey,
}

/// Time-of-day requirement for starting an operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Window {
    /// Must begin inside `[day_start_hour, day_end_hour)`.
    Day,
    /// Must begin outside the daylight window.
    Night,
}

/// Discriminant of [`Operation`], for reporting.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperationKind {
    Point,
    Line,
    Area,
}

// ── OpMeta ────────────────────────────────────────────────────────────────────

/// Fields shared by every operation variant.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct OpMeta {
    /// Catalog name.  Unique across the cruise.
    pub name: String,
    pub comment: Option<String>,
    /// Minutes added before the operation proper (e.g. deck preparation).
    pub delay_start_minutes: f64,
    /// Minutes added after the operation proper.
    pub delay_end_minutes: f64,
    /// Explicit time-of-day requirement.  `None` falls back to the
    /// variant's default (see [`Operation::window`]).
    pub window: Option<Window>,
}

impl OpMeta {
    fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }
}

// ── PointOperation ────────────────────────────────────────────────────────────

/// Work at a single fixed location: CTD casts, water sampling, moorings.
#[derive(Clone, Debug, PartialEq)]
pub struct PointOperation {
    pub meta: OpMeta,
    pub position: GeoPoint,
    /// Water depth (m, positive down).  Only profiling types use it.
    pub depth: Option<f64>,
    pub op_type: OperationType,
    pub action: Option<Action>,
    /// Manual duration in minutes.  Always wins when set.
    pub duration: Option<f64>,
}

impl PointOperation {
    /// A CTD station at `position` with no depth and no manual duration.
    pub fn new(name: impl Into<String>, position: GeoPoint) -> Self {
        Self {
            meta: OpMeta::named(name),
            position,
            depth: None,
            op_type: OperationType::Ctd,
            action: None,
            duration: None,
        }
    }

    pub fn depth(mut self, metres: f64) -> Self {
        self.depth = Some(metres);
        self
    }

    pub fn op_type(mut self, op_type: OperationType) -> Self {
        self.op_type = op_type;
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn duration(mut self, minutes: f64) -> Self {
        self.duration = Some(minutes);
        self
    }

    fn calculate_duration(&self, ctx: &DurationContext) -> CalcResult<Duration> {
        if let Some(m) = self.duration {
            return Ok(Duration::new(m, DurationSource::Manual));
        }
        if self.op_type.is_profiling() {
            let minutes = duration::depth_profile_minutes(self.depth.unwrap_or(0.0), ctx)?;
            return Ok(Duration::new(minutes, DurationSource::DepthProfile));
        }
        if self.op_type == OperationType::Mooring {
            return Ok(Duration::new(
                ctx.missing_duration_minutes,
                DurationSource::Defaulted(MissingDuration::Mooring),
            ));
        }
        Ok(Duration::new(ctx.turnaround_minutes, DurationSource::Turnaround))
    }
}

// ── LineOperation ─────────────────────────────────────────────────────────────

/// Continuous work along a route: underway transects, tow-yos, ADCP lines.
#[derive(Clone, Debug, PartialEq)]
pub struct LineOperation {
    pub meta: OpMeta,
    /// Ordered waypoints; at least two.
    route: Vec<GeoPoint>,
    /// Operation-specific speed, knots.  Overrides leg and cruise speed.
    pub speed_knots: Option<f64>,
    pub action: Option<Action>,
}

impl LineOperation {
    /// Build a line over `route`.
    ///
    /// # Errors
    ///
    /// [`CalculationError::DegenerateRoute`] if `route` has fewer than two
    /// waypoints.
    pub fn new(name: impl Into<String>, route: Vec<GeoPoint>) -> CalcResult<Self> {
        if route.len() < 2 {
            return Err(CalculationError::DegenerateRoute { waypoints: route.len() });
        }
        Ok(Self {
            meta: OpMeta::named(name),
            route,
            speed_knots: None,
            action: None,
        })
    }

    pub fn speed(mut self, knots: f64) -> Self {
        self.speed_knots = Some(knots);
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn route(&self) -> &[GeoPoint] {
        &self.route
    }

    /// Length along the waypoints, km.
    pub fn distance_km(&self) -> f64 {
        route_distance(&self.route)
    }

    fn calculate_duration(&self, ctx: &DurationContext) -> CalcResult<Duration> {
        let speed = resolve(&[self.speed_knots], ctx.speed_knots);
        let minutes = duration::route_minutes(self.distance_km(), speed)?;
        Ok(Duration::new(minutes, DurationSource::Route))
    }
}

// ── AreaOperation ─────────────────────────────────────────────────────────────

/// Work inside a polygon: grid surveys, search patterns.
///
/// Routing treats the area as its corner centroid.  The duration cannot be
/// derived from the geometry and must be supplied by the planner.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaOperation {
    pub meta: OpMeta,
    corners: Vec<GeoPoint>,
    center: GeoPoint,
    /// Manual duration in minutes.  Required; absence is reported.
    pub duration: Option<f64>,
    pub action: Option<Action>,
}

impl AreaOperation {
    /// Build an area over `corners`.
    ///
    /// # Errors
    ///
    /// [`CalculationError::DegeneratePolygon`] if fewer than three corners
    /// are given.
    pub fn new(name: impl Into<String>, corners: Vec<GeoPoint>) -> CalcResult<Self> {
        let center = centroid(&corners)?;
        Ok(Self {
            meta: OpMeta::named(name),
            corners,
            center,
            duration: None,
            action: None,
        })
    }

    pub fn duration(mut self, minutes: f64) -> Self {
        self.duration = Some(minutes);
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn corners(&self) -> &[GeoPoint] {
        &self.corners
    }

    pub fn centroid(&self) -> GeoPoint {
        self.center
    }

    fn calculate_duration(&self, ctx: &DurationContext) -> CalcResult<Duration> {
        // Geometry is re-checked even though `new` enforced it.
        centroid(&self.corners)?;
        Ok(match self.duration {
            Some(m) => Duration::new(m, DurationSource::Manual),
            None => Duration::new(
                ctx.missing_duration_minutes,
                DurationSource::Defaulted(MissingDuration::Area),
            ),
        })
    }
}

// ── Operation ─────────────────────────────────────────────────────────────────

/// One scheduled unit of work.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    Point(PointOperation),
    Line(LineOperation),
    Area(AreaOperation),
}

impl From<PointOperation> for Operation {
    fn from(op: PointOperation) -> Self {
        Operation::Point(op)
    }
}

impl From<LineOperation> for Operation {
    fn from(op: LineOperation) -> Self {
        Operation::Line(op)
    }
}

impl From<AreaOperation> for Operation {
    fn from(op: AreaOperation) -> Self {
        Operation::Area(op)
    }
}

impl Operation {
    pub fn meta(&self) -> &OpMeta {
        match self {
            Operation::Point(op) => &op.meta,
            Operation::Line(op) => &op.meta,
            Operation::Area(op) => &op.meta,
        }
    }

    fn meta_mut(&mut self) -> &mut OpMeta {
        match self {
            Operation::Point(op) => &mut op.meta,
            Operation::Line(op) => &mut op.meta,
            Operation::Area(op) => &mut op.meta,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.meta().name
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Point(_) => OperationKind::Point,
            Operation::Line(_) => OperationKind::Line,
            Operation::Area(_) => OperationKind::Area,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.meta_mut().comment = Some(comment.into());
        self
    }

    pub fn with_delays(mut self, start_minutes: f64, end_minutes: f64) -> Self {
        let meta = self.meta_mut();
        meta.delay_start_minutes = start_minutes;
        meta.delay_end_minutes = end_minutes;
        self
    }

    pub fn with_window(mut self, window: Window) -> Self {
        self.meta_mut().window = Some(window);
        self
    }

    /// Short type label for reports: the point type, or `line` / `area`.
    pub fn type_label(&self) -> &'static str {
        match self {
            Operation::Point(op) => op.op_type.label(),
            Operation::Line(_) => "line",
            Operation::Area(_) => "area",
        }
    }

    pub fn action(&self) -> Option<Action> {
        match self {
            Operation::Point(op) => op.action,
            Operation::Line(op) => op.action,
            Operation::Area(op) => op.action,
        }
    }

    /// Water depth for point operations; `None` otherwise.
    pub fn depth(&self) -> Option<f64> {
        match self {
            Operation::Point(op) => op.depth,
            _ => None,
        }
    }

    /// Distance covered while performing the operation itself, km.
    pub fn operation_distance_km(&self) -> f64 {
        match self {
            Operation::Line(op) => op.distance_km(),
            _ => 0.0,
        }
    }

    /// Every coordinate the operation carries, for range checks.
    pub fn coordinates(&self) -> &[GeoPoint] {
        match self {
            Operation::Point(op) => std::slice::from_ref(&op.position),
            Operation::Line(op) => &op.route,
            Operation::Area(op) => &op.corners,
        }
    }

    /// Manual duration if the variant carries one.
    pub fn manual_duration(&self) -> Option<f64> {
        match self {
            Operation::Point(op) => op.duration,
            Operation::Line(_) => None,
            Operation::Area(op) => op.duration,
        }
    }

    /// Effective time-of-day requirement.  Moorings need daylight unless
    /// their metadata says otherwise.
    pub fn window(&self) -> Option<Window> {
        self.meta().window.or(match self {
            Operation::Point(op) if op.op_type == OperationType::Mooring => Some(Window::Day),
            _ => None,
        })
    }

    /// `(delay_start, delay_end)` in minutes, clamped to ≥ 0.
    pub fn delays(&self) -> (f64, f64) {
        let meta = self.meta();
        (meta.delay_start_minutes.max(0.0), meta.delay_end_minutes.max(0.0))
    }

    /// Duration of the operation proper (without delays).
    ///
    /// # Errors
    ///
    /// A [`CalculationError`] tagged with the operation name when the
    /// geometry is degenerate or a rate/speed is not positive.
    pub fn calculate_duration(&self, ctx: &DurationContext) -> CalcResult<Duration> {
        let result = match self {
            Operation::Point(op) => op.calculate_duration(ctx),
            Operation::Line(op) => op.calculate_duration(ctx),
            Operation::Area(op) => op.calculate_duration(ctx),
        };
        result.map_err(|e| e.in_operation(self.name(), "duration"))
    }
}

impl Waypoints for Operation {
    fn entry_point(&self) -> GeoPoint {
        match self {
            Operation::Point(op) => op.position,
            Operation::Line(op) => op.route[0],
            Operation::Area(op) => op.center,
        }
    }

    fn exit_point(&self) -> GeoPoint {
        match self {
            Operation::Point(op) => op.position,
            Operation::Line(op) => op.route[op.route.len() - 1],
            Operation::Area(op) => op.center,
        }
    }
}
