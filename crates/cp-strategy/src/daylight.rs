//! Daylight window and the day/night wait rule.
//!
//! # Window convention
//!
//! The daylight window is half-open: `[start_hour, end_hour)`.
//!
//! ```text
//!   arrival hour         Day requirement          Night requirement
//!   h <  start           wait until start today   no wait
//!   start ≤ h < end      no wait                  wait until end today
//!   h ≥ end              wait until start +1 day  no wait
//! ```
//!
//! An arrival at exactly `start_hour` needs no wait; an arrival at exactly
//! `end_hour` is outside the window.

use chrono::TimeDelta;

use cp_core::time::{at_hour, hour_of_day, minutes};
use cp_core::{CruiseDefaults, Timestamp};
use cp_ops::Window;

/// Configured daylight hours.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayWindow {
    /// First daylight hour (inclusive), 0–23.
    pub start_hour: u32,
    /// Hour daylight ends (exclusive), 1–24.
    pub end_hour: u32,
}

impl DayWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self { start_hour, end_hour }
    }

    pub fn from_defaults(defaults: &CruiseDefaults) -> Self {
        Self::new(defaults.day_start_hour, defaults.day_end_hour)
    }

    /// `true` if no instant can satisfy a `Day` requirement.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start_hour >= self.end_hour || self.start_hour >= 24
    }

    /// Window length in minutes.
    pub fn length_minutes(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        f64::from(self.end_hour.min(24) - self.start_hour) * 60.0
    }

    /// `true` if `t` lies in `[start_hour, end_hour)`.
    pub fn contains(&self, t: Timestamp) -> bool {
        let h = hour_of_day(t);
        f64::from(self.start_hour) <= h && h < f64::from(self.end_hour)
    }

    /// The first `start_hour` at or after `t`.
    ///
    /// Saturates at `Timestamp::MAX` on the last day of the calendar.
    pub fn next_start(&self, t: Timestamp) -> Timestamp {
        let today = at_hour(t, self.start_hour);
        if today >= t {
            today
        } else {
            today.checked_add_signed(TimeDelta::days(1)).unwrap_or(Timestamp::MAX)
        }
    }

    /// How long an operation arriving at `arrival` must wait before it may
    /// start under `window`.
    ///
    /// Returns `None` when the requirement can never be met (empty daylight
    /// window for `Day`, or a 24-hour window for `Night`).
    pub fn wait_for(&self, arrival: Timestamp, window: Window) -> Option<TimeDelta> {
        match window {
            Window::Day => {
                if self.is_empty() {
                    return None;
                }
                if self.contains(arrival) {
                    return Some(TimeDelta::zero());
                }
                Some(self.next_start(arrival) - arrival)
            }
            Window::Night => {
                if self.start_hour == 0 && self.end_hour >= 24 {
                    return None;
                }
                if !self.contains(arrival) {
                    return Some(TimeDelta::zero());
                }
                Some(at_hour(arrival, self.end_hour) - arrival)
            }
        }
    }

    /// Minutes per day during which `window` is satisfied.
    pub fn available_minutes(&self, window: Window) -> f64 {
        match window {
            Window::Day => self.length_minutes(),
            Window::Night => 24.0 * 60.0 - self.length_minutes(),
        }
    }

    /// `true` if an operation of `duration_minutes` cannot fit in one
    /// window, whatever the arrival time.
    pub fn too_short_for(&self, window: Window, duration_minutes: f64) -> bool {
        minutes(duration_minutes) > minutes(self.available_minutes(window))
    }
}

impl Default for DayWindow {
    fn default() -> Self {
        Self::from_defaults(&CruiseDefaults::default())
    }
}
