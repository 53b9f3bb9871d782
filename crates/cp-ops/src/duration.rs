//! Duration rules.
//!
//! Three rules produce operation durations, all in minutes:
//!
//! | Rule        | Used by                         | Formula                                  |
//! |-------------|---------------------------------|------------------------------------------|
//! | manual      | any point/area with `duration`  | the given value                          |
//! | depth-based | profiling point operations      | `(d/v_down + d/v_up)/60 + bottom + turn` |
//! | speed-based | line operations                 | `route_km / (knots × 1.852) × 60`        |
//!
//! Point operations with none of the above fall back to the inherited
//! turnaround time.  Moorings and areas without a manual duration get the
//! configured sentinel and are reported, not rejected.

use cp_core::units::travel_minutes;
use cp_core::{CalcResult, CalculationError, CruiseDefaults};

// ── DurationContext ───────────────────────────────────────────────────────────

/// Parameter values already resolved for the leg an operation runs in.
#[derive(Clone, Debug, PartialEq)]
pub struct DurationContext {
    /// Effective vessel speed, knots.
    pub speed_knots: f64,
    /// Effective turnaround time, minutes.
    pub turnaround_minutes: f64,
    pub descent_rate_m_s: f64,
    pub ascent_rate_m_s: f64,
    pub bottom_time_minutes: f64,
    /// Sentinel for operations missing a mandatory manual duration.
    pub missing_duration_minutes: f64,
}

impl DurationContext {
    /// Context with no leg overrides.
    pub fn from_defaults(defaults: &CruiseDefaults) -> Self {
        Self {
            speed_knots:              defaults.vessel_speed_knots,
            turnaround_minutes:       defaults.turnaround_minutes,
            descent_rate_m_s:         defaults.descent_rate_m_s,
            ascent_rate_m_s:          defaults.ascent_rate_m_s,
            bottom_time_minutes:      defaults.bottom_time_minutes,
            missing_duration_minutes: defaults.missing_duration_minutes,
        }
    }
}

// ── Duration ──────────────────────────────────────────────────────────────────

/// Which mandatory duration was missing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MissingDuration {
    Mooring,
    Area,
}

/// Where a duration came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DurationSource {
    Manual,
    DepthProfile,
    Route,
    Turnaround,
    /// Sentinel substituted for a missing manual duration.
    Defaulted(MissingDuration),
}

/// A computed operation duration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Duration {
    /// Minutes, ≥ 0.
    pub minutes: f64,
    pub source: DurationSource,
}

impl Duration {
    /// Negative or non-finite minutes clamp to zero.
    pub fn new(minutes: f64, source: DurationSource) -> Self {
        let minutes = if minutes.is_finite() { minutes.max(0.0) } else { 0.0 };
        Self { minutes, source }
    }

    #[inline]
    pub fn is_defaulted(&self) -> bool {
        matches!(self.source, DurationSource::Defaulted(_))
    }
}

// ── Rules ─────────────────────────────────────────────────────────────────────

/// Depth-based profile time, minutes.
///
/// Descent and ascent are timed separately so asymmetric winch rates are
/// honoured.  At depth 0 the result is exactly `bottom + turnaround`.
///
/// # Errors
///
/// [`CalculationError::NonPositive`] if either rate is ≤ 0.
pub fn depth_profile_minutes(depth_m: f64, ctx: &DurationContext) -> CalcResult<f64> {
    positive("descent rate", ctx.descent_rate_m_s)?;
    positive("ascent rate", ctx.ascent_rate_m_s)?;

    let depth = depth_m.max(0.0);
    let cast_secs = depth / ctx.descent_rate_m_s + depth / ctx.ascent_rate_m_s;
    Ok(cast_secs / 60.0 + ctx.bottom_time_minutes + ctx.turnaround_minutes)
}

/// Speed-based time to cover `distance_km`, minutes.
///
/// # Errors
///
/// [`CalculationError::NonPositive`] if `speed_knots` is ≤ 0.
pub fn route_minutes(distance_km: f64, speed_knots: f64) -> CalcResult<f64> {
    travel_minutes(distance_km, speed_knots).ok_or(CalculationError::NonPositive {
        what:  "vessel speed",
        value: speed_knots,
    })
}

fn positive(what: &'static str, value: f64) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalculationError::NonPositive { what, value })
    }
}
