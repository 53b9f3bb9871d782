//! Scheduler observer trait for progress reporting and streaming output.

use cp_core::Timestamp;
use cp_plan::Leg;

use crate::{ActivityRecord, SchedulingWarning};

/// Callbacks invoked by [`schedule_with`][crate::schedule_with] as the
/// timeline is built.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: streaming printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl ScheduleObserver for Printer {
///     fn on_record(&mut self, r: &ActivityRecord) {
///         println!("{} {:>10} {}", r.start, r.kind.label(), r.label);
///     }
/// }
/// ```
pub trait ScheduleObserver {
    /// Called before the first record of `leg`, with the cursor time.
    fn on_leg_start(&mut self, _leg: &Leg, _at: Timestamp) {}

    /// Called for every record, in timeline order.
    fn on_record(&mut self, _record: &ActivityRecord) {}

    /// Called as each warning is raised.
    fn on_warning(&mut self, _warning: &SchedulingWarning) {}

    /// Called after the leg's arrival (and buffer, if any).
    fn on_leg_end(&mut self, _leg: &Leg, _at: Timestamp) {}
}

/// A [`ScheduleObserver`] that does nothing.
pub struct NoopObserver;

impl ScheduleObserver for NoopObserver {}
