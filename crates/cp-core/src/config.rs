//! Global cruise defaults.
//!
//! These are the bottom of the parameter-inheritance chain: every
//! leg-level and operation-level override falls back to a value here.
//! Typically loaded from a YAML/TOML/JSON file by the application and passed
//! to the cruise builder; `Default` gives the canonical values.

/// Vessel transit speed, knots.
pub const DEFAULT_VESSEL_SPEED_KT: f64 = 10.0;
/// Profile turnaround time, minutes.
pub const DEFAULT_TURNAROUND_MIN: f64 = 30.0;
/// Winch descent/ascent rate, metres per second.
pub const DEFAULT_PROFILE_RATE_M_S: f64 = 1.0;
/// Time held at the bottom of a profile, minutes.
pub const DEFAULT_BOTTOM_TIME_MIN: f64 = 2.0;
/// Distance between stations along a section, kilometres.
pub const DEFAULT_STATION_SPACING_KM: f64 = 15.0;
/// Placeholder for operations that must carry a manual duration but don't
/// (999 hours).  Large on purpose so it stands out in any timeline.
pub const MISSING_DURATION_SENTINEL_MIN: f64 = 59_940.0;
/// Upper bound on improvement passes of the spatial ordering heuristic.
pub const DEFAULT_TSP_ITERATION_CAP: usize = 1_000;

/// Global defaults for one cruise.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CruiseDefaults {
    /// Transit speed used when neither the leg nor the operation overrides it.
    pub vessel_speed_knots: f64,

    /// Minutes added to every profile, and the duration of point operations
    /// that have no other duration rule.
    pub turnaround_minutes: f64,

    /// Descent rate of profiling instruments, m/s.  Must be > 0.
    pub descent_rate_m_s: f64,

    /// Ascent rate of profiling instruments, m/s.  Must be > 0.
    pub ascent_rate_m_s: f64,

    /// Fixed time at the bottom of each profile, minutes.
    pub bottom_time_minutes: f64,

    /// Default distance between section stations, km.
    pub station_spacing_km: f64,

    /// First hour of the daylight window (inclusive).
    pub day_start_hour: u32,

    /// Hour at which the daylight window closes (exclusive).
    pub day_end_hour: u32,

    /// Duration assigned to moorings and areas with no manual duration.
    pub missing_duration_minutes: f64,

    /// Maximum improvement passes for `spatial_interleaved` ordering.
    pub tsp_iteration_cap: usize,
}

impl Default for CruiseDefaults {
    fn default() -> Self {
        Self {
            vessel_speed_knots:       DEFAULT_VESSEL_SPEED_KT,
            turnaround_minutes:       DEFAULT_TURNAROUND_MIN,
            descent_rate_m_s:         DEFAULT_PROFILE_RATE_M_S,
            ascent_rate_m_s:          DEFAULT_PROFILE_RATE_M_S,
            bottom_time_minutes:      DEFAULT_BOTTOM_TIME_MIN,
            station_spacing_km:       DEFAULT_STATION_SPACING_KM,
            day_start_hour:           8,
            day_end_hour:             20,
            missing_duration_minutes: MISSING_DURATION_SENTINEL_MIN,
            tsp_iteration_cap:        DEFAULT_TSP_ITERATION_CAP,
        }
    }
}

impl CruiseDefaults {
    /// Length of the daylight window in hours (0 if the window is empty).
    #[inline]
    pub fn day_window_hours(&self) -> u32 {
        self.day_end_hour.saturating_sub(self.day_start_hour)
    }
}
