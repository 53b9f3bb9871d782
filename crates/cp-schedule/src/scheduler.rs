//! The scheduling pass.
//!
//! # Algorithm
//!
//! A single fold over the legs in declaration order, threading a
//! [`Cursor`] (time and position) through every step:
//!
//! ```text
//! for leg in cruise.legs:
//!     transit cursor → departure port              (PortDeparture)
//!     for group in leg.groups, op in group.resolved_order:
//!         arrival = cursor.time + transit(cursor.point → op.entry)
//!         wait    = day/night wait, if the group's strategy checks daylight
//!         start   = arrival + wait                  (Wait, if wait > 0)
//!         end     = start + duration + delays       (Operation)
//!         cursor  = (end, op.exit)
//!     transit cursor → arrival port                 (PortArrival)
//!     cursor.time += buffer                         (Buffer, if > 0)
//! ```
//!
//! Time only moves forward, so records come out ordered and
//! non-overlapping.  The buffer is added once per leg, after its arrival.

use chrono::TimeDelta;
use tracing::{debug, info, trace, warn};

use cp_core::time::{advance, as_minutes};
use cp_core::{CalculationError, GeoPoint, OpId, Timestamp, km_to_nm};
use cp_ops::duration::route_minutes;
use cp_ops::{DurationContext, DurationSource, Operation, Waypoints};
use cp_plan::{Cluster, Cruise, Leg};
use cp_strategy::DayWindow;

use crate::warning::USUAL_SPEED_KT;
use crate::{
    ActivityRecord, CruiseSummary, NoopObserver, RecordKind, ScheduleError, ScheduleObserver,
    ScheduleResult, SchedulingWarning,
};

// ── Schedule ──────────────────────────────────────────────────────────────────

/// Output of one scheduling run.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Schedule {
    /// Timeline in chronological order.
    pub records: Vec<ActivityRecord>,
    /// Everything worth a second look; none of it stopped the run.
    pub warnings: Vec<SchedulingWarning>,
}

impl Schedule {
    /// Per-leg and cruise totals, summed from `records`.
    pub fn summary(&self) -> CruiseSummary {
        CruiseSummary::from_records(&self.records)
    }

    /// Operation records only.
    pub fn operations(&self) -> impl Iterator<Item = &ActivityRecord> {
        self.records.iter().filter(|r| r.is_operation())
    }

    /// When the last record ends.
    pub fn end(&self) -> Option<Timestamp> {
        self.records.last().map(|r| r.end)
    }
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Compute the timeline of `cruise`.
///
/// # Errors
///
/// [`ScheduleError::Calculation`][crate::ScheduleError::Calculation] if a
/// duration or transit cannot be computed.  The cruise graph is already
/// validated, so configuration problems cannot surface here.
pub fn calculate_schedule(cruise: &Cruise) -> ScheduleResult<Schedule> {
    schedule_with(cruise, &mut NoopObserver)
}

/// [`calculate_schedule`] with progress callbacks.
pub fn schedule_with<O: ScheduleObserver + ?Sized>(
    cruise:   &Cruise,
    observer: &mut O,
) -> ScheduleResult<Schedule> {
    let mut run = Run {
        window: cruise.day_window(),
        observer,
        schedule: Schedule::default(),
    };

    let origin = Cursor { time: cruise.start(), point: cruise.departure() };
    let end = cruise
        .legs()
        .iter()
        .try_fold(origin, |cursor, leg| run.leg(cursor, leg))?;

    info!(
        cruise = cruise.name(),
        records = run.schedule.records.len(),
        warnings = run.schedule.warnings.len(),
        end = %end.time,
        "schedule complete"
    );
    Ok(run.schedule)
}

// ── Run state ─────────────────────────────────────────────────────────────────

/// Where the vessel is and when.
#[derive(Copy, Clone, Debug)]
struct Cursor {
    time:  Timestamp,
    point: GeoPoint,
}

/// Leg-level values every operation in the leg uses.
struct LegCtx<'a> {
    leg:      &'a Leg,
    speed:    f64,
    duration: DurationContext,
}

struct Run<'o, O: ScheduleObserver + ?Sized> {
    window:   DayWindow,
    observer: &'o mut O,
    schedule: Schedule,
}

impl<O: ScheduleObserver + ?Sized> Run<'_, O> {
    fn leg(&mut self, cursor: Cursor, leg: &Leg) -> ScheduleResult<Cursor> {
        self.observer.on_leg_start(leg, cursor.time);
        debug!(leg = leg.name(), start = %cursor.time, groups = leg.groups().len(), "leg started");

        for w in SchedulingWarning::for_parameters(
            leg.name(),
            leg.effective_speed(),
            leg.effective_spacing(),
            leg.effective_turnaround(),
        ) {
            self.warn(w);
        }

        let ctx = LegCtx {
            leg,
            speed: leg.effective_speed(),
            duration: leg.duration_context(),
        };

        let departure = leg.departure();
        let mut cursor = self.port(cursor, &ctx, RecordKind::PortDeparture, &departure.name, departure.position)?;

        for group in leg.groups() {
            if group.resolved_order().exhausted {
                self.warn(SchedulingWarning::OrderingCapReached {
                    leg:   leg.name().to_owned(),
                    group: group.name().unwrap_or("(unnamed)").to_owned(),
                });
            }
            for (id, op) in group.ordered() {
                cursor = self.operation(cursor, &ctx, group, id, op)?;
            }
        }

        let arrival = leg.arrival();
        cursor = self.port(cursor, &ctx, RecordKind::PortArrival, &arrival.name, arrival.position)?;

        let buffer = leg.buffer_minutes();
        if buffer > 0.0 {
            let end = advance_by(cursor.time, buffer, leg.name())?;
            self.emit(ActivityRecord {
                label:            leg.name().to_owned(),
                kind:             RecordKind::Buffer,
                op:               None,
                op_type:          None,
                leg:              leg.id(),
                leg_name:         leg.name().to_owned(),
                cluster:          None,
                position:         cursor.point,
                exit_position:    cursor.point,
                depth:            None,
                start:            cursor.time,
                end,
                duration_minutes: as_minutes(end - cursor.time),
                transit_km:       0.0,
                transit_nm:       0.0,
                transit_minutes:  0.0,
                wait_minutes:     0.0,
                operation_km:     0.0,
                speed_knots:      ctx.speed,
            });
            cursor.time = end;
        }

        self.observer.on_leg_end(leg, cursor.time);
        debug!(leg = leg.name(), end = %cursor.time, "leg finished");
        Ok(cursor)
    }

    /// Transit to a port; emits a zero-length record on arrival.
    fn port(
        &mut self,
        cursor: Cursor,
        ctx:    &LegCtx<'_>,
        kind:   RecordKind,
        name:   &str,
        at:     GeoPoint,
    ) -> ScheduleResult<Cursor> {
        let (km, transit) = transit(cursor.point, at, ctx.speed)?;
        let time = advance_by(cursor.time, transit, name)?;
        self.emit(ActivityRecord {
            label:            name.to_owned(),
            kind,
            op:               None,
            op_type:          None,
            leg:              ctx.leg.id(),
            leg_name:         ctx.leg.name().to_owned(),
            cluster:          None,
            position:         at,
            exit_position:    at,
            depth:            None,
            start:            time,
            end:              time,
            duration_minutes: 0.0,
            transit_km:       km,
            transit_nm:       km_to_nm(km),
            transit_minutes:  transit,
            wait_minutes:     0.0,
            operation_km:     0.0,
            speed_knots:      ctx.speed,
        });
        Ok(Cursor { time, point: at })
    }

    fn operation(
        &mut self,
        cursor: Cursor,
        ctx:    &LegCtx<'_>,
        group:  &Cluster,
        id:     OpId,
        op:     &Operation,
    ) -> ScheduleResult<Cursor> {
        let duration = op.calculate_duration(&ctx.duration)?;
        if let DurationSource::Defaulted(missing) = duration.source {
            self.warn(SchedulingWarning::DefaultedDuration {
                operation: op.name().to_owned(),
                missing,
                minutes: duration.minutes,
            });
        }
        if let Operation::Line(line) = op
            && let Some(knots) = line.speed_knots
            && !(USUAL_SPEED_KT.0..=USUAL_SPEED_KT.1).contains(&knots)
        {
            self.warn(SchedulingWarning::UnusualSpeed { entity: op.name().to_owned(), knots });
        }

        let (delay_start, delay_end) = op.delays();
        let busy = duration.minutes + delay_start + delay_end;

        let entry = op.entry_point();
        let (km, transit) = transit(cursor.point, entry, ctx.speed)?;
        let arrival = advance_by(cursor.time, transit, op.name())?;
        let wait = self.wait(arrival, group, op, busy);
        let wait_minutes = as_minutes(wait);

        let record = |kind: RecordKind, start: Timestamp, end: Timestamp| ActivityRecord {
            label:            op.name().to_owned(),
            kind,
            op:               Some(id),
            op_type:          Some(op.type_label()),
            leg:              ctx.leg.id(),
            leg_name:         ctx.leg.name().to_owned(),
            cluster:          group.name().map(str::to_owned),
            position:         entry,
            exit_position:    entry,
            depth:            op.depth(),
            start,
            end,
            duration_minutes: as_minutes(end - start),
            transit_km:       0.0,
            transit_nm:       0.0,
            transit_minutes:  0.0,
            wait_minutes:     0.0,
            operation_km:     0.0,
            speed_knots:      ctx.speed,
        };

        let start = arrival
            .checked_add_signed(wait)
            .ok_or_else(|| overflow(op.name()))?;
        let end = advance_by(start, busy, op.name())?;
        if wait > TimeDelta::zero() {
            self.emit(record(RecordKind::Wait, arrival, start));
        }

        self.emit(ActivityRecord {
            exit_position:   op.exit_point(),
            transit_km:      km,
            transit_nm:      km_to_nm(km),
            transit_minutes: transit,
            wait_minutes,
            operation_km:    op.operation_distance_km(),
            ..record(RecordKind::Operation, start, end)
        });

        Ok(Cursor { time: end, point: op.exit_point() })
    }

    /// Day/night hold before `op`, zero unless the group checks daylight.
    fn wait(&mut self, arrival: Timestamp, group: &Cluster, op: &Operation, busy: f64) -> TimeDelta {
        let Some(window) = op.window() else {
            return TimeDelta::zero();
        };
        if !group.strategy().checks_daylight() {
            return TimeDelta::zero();
        }

        let Some(wait) = self.window.wait_for(arrival, window) else {
            self.warn(SchedulingWarning::UnreachableWindow {
                operation: op.name().to_owned(),
                window,
            });
            return TimeDelta::zero();
        };

        if self.window.too_short_for(window, busy) {
            self.warn(SchedulingWarning::WindowTooShort {
                operation:         op.name().to_owned(),
                window,
                duration_minutes:  busy,
                available_minutes: self.window.available_minutes(window),
            });
        }
        wait
    }

    fn emit(&mut self, record: ActivityRecord) {
        trace!(
            kind = record.kind.label(),
            label = %record.label,
            start = %record.start,
            end = %record.end,
            transit_km = record.transit_km,
            "record"
        );
        self.observer.on_record(&record);
        self.schedule.records.push(record);
    }

    fn warn(&mut self, warning: SchedulingWarning) {
        warn!(%warning, "scheduling warning");
        self.observer.on_warning(&warning);
        self.schedule.warnings.push(warning);
    }
}

/// Great-circle transit: `(km, minutes)` at `speed_knots`.
fn transit(from: GeoPoint, to: GeoPoint, speed_knots: f64) -> ScheduleResult<(f64, f64)> {
    let km = from.distance_km(to);
    Ok((km, route_minutes(km, speed_knots)?))
}

/// Moves the cursor `m` minutes past `t`; fatal past the end of the calendar.
fn advance_by(t: Timestamp, m: f64, activity: &str) -> ScheduleResult<Timestamp> {
    advance(t, m).ok_or_else(|| overflow(activity))
}

fn overflow(activity: &str) -> ScheduleError {
    CalculationError::TimelineOverflow { activity: activity.to_owned() }.into()
}
