//! Unit tests for cp-ops.

use cp_core::{CruiseDefaults, GeoPoint};

use crate::{
    AreaOperation, DurationContext, DurationSource, LineOperation, MissingDuration, Operation,
    OperationType, PointOperation, Waypoints, Window,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn ctx() -> DurationContext {
    DurationContext::from_defaults(&CruiseDefaults::default())
}

fn ctd(name: &str, depth: f64) -> Operation {
    PointOperation::new(name, GeoPoint::new(60.0, -20.0)).depth(depth).into()
}

fn square() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(10.0, 10.0),
        GeoPoint::new(10.0, 12.0),
        GeoPoint::new(12.0, 12.0),
        GeoPoint::new(12.0, 10.0),
    ]
}

// ── Entry / exit ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod waypoints {
    use super::*;

    #[test]
    fn point_entry_equals_exit() {
        let op = ctd("S1", 100.0);
        assert_eq!(op.entry_point(), op.exit_point());
        assert_eq!(op.entry_point(), GeoPoint::new(60.0, -20.0));
    }

    #[test]
    fn line_runs_first_to_last_waypoint() {
        let route = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.5, 0.5),
            GeoPoint::new(1.0, 0.0),
        ];
        let op: Operation = LineOperation::new("T1", route).unwrap().into();
        assert_eq!(op.entry_point(), GeoPoint::new(0.0, 0.0));
        assert_eq!(op.exit_point(), GeoPoint::new(1.0, 0.0));
    }

    #[test]
    fn area_entry_and_exit_are_centroid() {
        let op: Operation = AreaOperation::new("A1", square()).unwrap().into();
        assert_eq!(op.entry_point(), GeoPoint::new(11.0, 11.0));
        assert_eq!(op.entry_point(), op.exit_point());
    }

    #[test]
    fn degenerate_geometry_is_rejected_at_construction() {
        assert!(LineOperation::new("T", vec![GeoPoint::new(0.0, 0.0)]).is_err());
        assert!(AreaOperation::new("A", square()[..2].to_vec()).is_err());
    }
}

// ── Point durations ───────────────────────────────────────────────────────────

#[cfg(test)]
mod point_duration {
    use super::*;

    #[test]
    fn depth_zero_is_bottom_plus_turnaround() {
        let d = ctd("S", 0.0).calculate_duration(&ctx()).unwrap();
        assert_eq!(d.minutes, 32.0);
        assert_eq!(d.source, DurationSource::DepthProfile);
    }

    #[test]
    fn reference_depths() {
        let expected = [(0.0, 32.0), (1000.0, 65.333), (5000.0, 198.667)];
        for (depth, minutes) in expected {
            let d = ctd("S", depth).calculate_duration(&ctx()).unwrap();
            assert!((d.minutes - minutes).abs() < 0.01, "depth {depth}: {}", d.minutes);
        }
    }

    #[test]
    fn doubling_depth_doubles_cast_time_only() {
        let fixed = 32.0;
        let a = ctd("S", 1500.0).calculate_duration(&ctx()).unwrap().minutes - fixed;
        let b = ctd("S", 3000.0).calculate_duration(&ctx()).unwrap().minutes - fixed;
        assert!((b - 2.0 * a).abs() < 1e-9);
    }

    #[test]
    fn asymmetric_rates() {
        let mut c = ctx();
        c.descent_rate_m_s = 1.0;
        c.ascent_rate_m_s = 0.5;
        // 600 s down + 1200 s up = 30 min, + 32 fixed.
        let d = ctd("S", 600.0).calculate_duration(&c).unwrap();
        assert!((d.minutes - 62.0).abs() < 1e-9);
    }

    #[test]
    fn zero_rate_is_a_calculation_error() {
        let mut c = ctx();
        c.descent_rate_m_s = 0.0;
        assert!(ctd("S", 100.0).calculate_duration(&c).is_err());
    }

    #[test]
    fn manual_duration_wins() {
        let op: Operation = PointOperation::new("S", GeoPoint::new(0.0, 0.0))
            .depth(4000.0)
            .duration(15.0)
            .into();
        let d = op.calculate_duration(&ctx()).unwrap();
        assert_eq!(d.minutes, 15.0);
        assert_eq!(d.source, DurationSource::Manual);
    }

    #[test]
    fn mooring_without_duration_is_defaulted() {
        let op: Operation = PointOperation::new("M1", GeoPoint::new(0.0, 0.0))
            .op_type(OperationType::Mooring)
            .into();
        let d = op.calculate_duration(&ctx()).unwrap();
        assert!(d.is_defaulted());
        assert_eq!(d.source, DurationSource::Defaulted(MissingDuration::Mooring));
        assert_eq!(d.minutes, CruiseDefaults::default().missing_duration_minutes);
    }

    #[test]
    fn waypoint_falls_back_to_turnaround() {
        let mut c = ctx();
        c.turnaround_minutes = 12.0;
        let op: Operation = PointOperation::new("W", GeoPoint::new(0.0, 0.0))
            .op_type(OperationType::Waypoint)
            .into();
        let d = op.calculate_duration(&c).unwrap();
        assert_eq!(d.minutes, 12.0);
        assert_eq!(d.source, DurationSource::Turnaround);
    }

    #[test]
    fn negative_manual_duration_clamps_to_zero() {
        let op: Operation = PointOperation::new("S", GeoPoint::new(0.0, 0.0))
            .duration(-3.0)
            .into();
        assert_eq!(op.calculate_duration(&ctx()).unwrap().minutes, 0.0);
    }
}

// ── Line and area durations ───────────────────────────────────────────────────

#[cfg(test)]
mod line_area_duration {
    use super::*;

    fn equator_line() -> LineOperation {
        LineOperation::new("T", vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)]).unwrap()
    }

    #[test]
    fn line_uses_context_speed() {
        let op: Operation = equator_line().into();
        let d = op.calculate_duration(&ctx()).unwrap();
        assert!((d.minutes - 360.2).abs() < 0.1, "got {}", d.minutes);
        assert_eq!(d.source, DurationSource::Route);
    }

    #[test]
    fn line_speed_override_beats_context() {
        let op: Operation = equator_line().speed(5.0).into();
        let d = op.calculate_duration(&ctx()).unwrap();
        assert!((d.minutes - 720.5).abs() < 0.2, "got {}", d.minutes);
    }

    #[test]
    fn line_reports_operation_distance() {
        let op: Operation = equator_line().into();
        assert!((op.operation_distance_km() - 111.195).abs() < 0.01);
    }

    #[test]
    fn zero_speed_is_a_calculation_error() {
        let op: Operation = equator_line().speed(0.0).into();
        let err = op.calculate_duration(&ctx()).unwrap_err();
        assert!(err.to_string().contains("\"T\""), "{err}");
    }

    #[test]
    fn area_uses_manual_duration() {
        let op: Operation = AreaOperation::new("A", square()).unwrap().duration(240.0).into();
        assert_eq!(op.calculate_duration(&ctx()).unwrap().minutes, 240.0);
    }

    #[test]
    fn area_without_duration_is_defaulted() {
        let op: Operation = AreaOperation::new("A", square()).unwrap().into();
        let d = op.calculate_duration(&ctx()).unwrap();
        assert_eq!(d.source, DurationSource::Defaulted(MissingDuration::Area));
    }
}

// ── Metadata ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod meta {
    use super::*;

    #[test]
    fn moorings_need_daylight_by_default() {
        let op: Operation = PointOperation::new("M", GeoPoint::new(0.0, 0.0))
            .op_type(OperationType::Mooring)
            .into();
        assert_eq!(op.window(), Some(Window::Day));
        assert_eq!(op.with_window(Window::Night).window(), Some(Window::Night));
        assert_eq!(ctd("S", 10.0).window(), None);
    }

    #[test]
    fn delays_clamp_to_zero() {
        let op = ctd("S", 10.0).with_delays(-5.0, 7.5);
        assert_eq!(op.delays(), (0.0, 7.5));
    }

    #[test]
    fn resolve_picks_most_specific() {
        assert_eq!(crate::resolve(&[None, Some(8.0)], 10.0), 8.0);
        assert_eq!(crate::resolve(&[Some(6.0), Some(8.0)], 10.0), 6.0);
        assert_eq!(crate::resolve::<f64>(&[], 10.0), 10.0);
    }
}
