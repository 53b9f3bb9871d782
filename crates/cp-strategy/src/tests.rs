//! Unit tests for cp-strategy.

use cp_core::GeoPoint;
use cp_core::time::from_ymd_hm;

use crate::{DayWindow, NearestNeighborSolver, Stop, Strategy, order_group, solve_open_path};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn at(h: u32, m: u32) -> cp_core::Timestamp {
    from_ymd_hm(2028, 6, 1, h, m).unwrap()
}

/// Stops along the equator at the given longitudes.
fn equator(lons: &[f64]) -> Vec<Stop> {
    lons.iter().map(|&lon| Stop::at(GeoPoint::new(0.0, lon))).collect()
}

// ── Strategy tag ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod strategy {
    use super::*;

    #[test]
    fn parses_and_prints() {
        for s in [Strategy::Sequential, Strategy::DayNightSplit, Strategy::SpatialInterleaved] {
            assert_eq!(s.as_str().parse::<Strategy>().unwrap(), s);
        }
        assert_eq!(Strategy::default(), Strategy::Sequential);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "zigzag".parse::<Strategy>().unwrap_err();
        assert!(err.to_string().contains("zigzag"));
    }
}

// ── Day window ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod daylight {
    use chrono::TimeDelta;
    use cp_ops::Window;

    use super::*;

    fn window() -> DayWindow {
        DayWindow::new(8, 20)
    }

    #[test]
    fn arrival_inside_window_has_no_wait() {
        assert_eq!(window().wait_for(at(12, 0), Window::Day), Some(TimeDelta::zero()));
    }

    #[test]
    fn arrival_exactly_at_start_has_no_wait() {
        assert_eq!(window().wait_for(at(8, 0), Window::Day), Some(TimeDelta::zero()));
    }

    #[test]
    fn early_arrival_waits_until_start_same_day() {
        let arrival = at(5, 30);
        let wait = window().wait_for(arrival, Window::Day).unwrap();
        assert_eq!(arrival + wait, at(8, 0));
    }

    #[test]
    fn late_arrival_waits_until_next_morning() {
        let arrival = at(21, 15);
        let wait = window().wait_for(arrival, Window::Day).unwrap();
        assert_eq!(arrival + wait, from_ymd_hm(2028, 6, 2, 8, 0).unwrap());
    }

    #[test]
    fn arrival_exactly_at_end_is_outside() {
        let arrival = at(20, 0);
        let wait = window().wait_for(arrival, Window::Day).unwrap();
        assert_eq!(wait, TimeDelta::hours(12));
    }

    #[test]
    fn night_requirement_waits_for_sunset() {
        let arrival = at(15, 0);
        assert_eq!(window().wait_for(arrival, Window::Night), Some(TimeDelta::hours(5)));
        assert_eq!(window().wait_for(at(22, 0), Window::Night), Some(TimeDelta::zero()));
    }

    #[test]
    fn empty_window_is_unreachable() {
        assert_eq!(DayWindow::new(20, 8).wait_for(at(12, 0), Window::Day), None);
        assert_eq!(DayWindow::new(0, 24).wait_for(at(12, 0), Window::Night), None);
    }

    #[test]
    fn long_operations_do_not_fit() {
        assert!(window().too_short_for(Window::Day, 13.0 * 60.0));
        assert!(!window().too_short_for(Window::Day, 12.0 * 60.0));
        assert!(window().too_short_for(Window::Night, 12.5 * 60.0));
    }
}

// ── Open-path solver ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tsp {
    use super::*;
    use crate::tsp::path_cost;

    #[test]
    fn empty_and_single_inputs() {
        let start = GeoPoint::new(0.0, 0.0);
        assert!(solve_open_path(start, None, &[], 10).order.is_empty());
        assert_eq!(solve_open_path(start, None, &equator(&[3.0]), 10).order, vec![0]);
    }

    #[test]
    fn untangles_a_zigzag() {
        let stops = equator(&[4.0, 1.0, 3.0, 2.0]);
        let tour = solve_open_path(GeoPoint::new(0.0, 0.0), None, &stops, 100);
        assert_eq!(tour.order, vec![1, 3, 2, 0]);
        assert!(!tour.exhausted);
    }

    #[test]
    fn result_is_a_permutation() {
        let stops = equator(&[5.0, 1.0, 4.0, 2.0, 3.0, 0.5]);
        let tour = solve_open_path(GeoPoint::new(0.0, 0.0), Some(GeoPoint::new(0.0, 6.0)), &stops, 100);
        let mut sorted = tour.order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..stops.len()).collect::<Vec<_>>());
    }

    #[test]
    fn never_worse_than_author_order() {
        let stops = equator(&[1.0, 2.0, 3.0]);
        let start = GeoPoint::new(0.0, 0.0);
        let end = Some(GeoPoint::new(0.0, 4.0));
        let tour = solve_open_path(start, end, &stops, 100);
        assert_eq!(tour.order, vec![0, 1, 2]);
        assert!(tour.cost_km <= path_cost(start, end, &stops, &[0, 1, 2]) + 1e-9);
    }

    #[test]
    fn ties_keep_author_order() {
        // Two co-located stops: any order costs the same.
        let p = GeoPoint::new(0.0, 1.0);
        let stops = vec![Stop::at(p), Stop::at(p)];
        let tour = solve_open_path(GeoPoint::new(0.0, 0.0), None, &stops, 100);
        assert_eq!(tour.order, vec![0, 1]);
    }

    #[test]
    fn line_direction_is_respected() {
        // The line runs from lon 3 back to lon 1.
        let stops = vec![
            Stop::new(GeoPoint::new(0.0, 3.0), GeoPoint::new(0.0, 1.0)),
            Stop::at(GeoPoint::new(0.0, 0.5)),
        ];
        let tour = solve_open_path(GeoPoint::new(0.0, 0.0), None, &stops, 100);
        // Point first: 0.5 + 2.5 = 3° of travel; line first: 3 + 0.5 = 3.5°.
        assert_eq!(tour.order, vec![1, 0]);
    }

    #[test]
    fn zero_cap_returns_construction_and_flags_exhaustion() {
        // Author order is a bad zigzag and the greedy tour from the start is
        // not optimal once the end anchor is considered.
        let stops = equator(&[1.0, 9.0, 2.0, 8.0, 3.0]);
        let start = GeoPoint::new(0.0, 0.0);
        let end = Some(GeoPoint::new(0.0, 0.0));
        let capped = solve_open_path(start, end, &stops, 0);
        let full = solve_open_path(start, end, &stops, 1_000);
        assert_eq!(capped.iterations, 0);
        assert!(full.cost_km <= capped.cost_km + 1e-9);
        if capped.cost_km > full.cost_km + 1e-9 {
            assert!(capped.exhausted);
        }
    }
}

// ── Group ordering ────────────────────────────────────────────────────────────

#[cfg(test)]
mod order {
    use super::*;

    #[test]
    fn sequential_and_day_night_keep_author_order() {
        let stops = equator(&[4.0, 1.0, 3.0, 2.0, 5.0]);
        let solver = NearestNeighborSolver::new(100);
        for s in [Strategy::Sequential, Strategy::DayNightSplit] {
            let o = order_group(s, &stops, &solver);
            assert_eq!(o.order, vec![0, 1, 2, 3, 4]);
            assert!(!o.is_reordered());
        }
    }

    #[test]
    fn spatial_pins_first_and_last() {
        let stops = equator(&[0.0, 4.0, 1.0, 3.0, 2.0, 5.0]);
        let o = order_group(Strategy::SpatialInterleaved, &stops, &NearestNeighborSolver::new(100));
        assert_eq!(o.order.first(), Some(&0));
        assert_eq!(o.order.last(), Some(&5));
        assert_eq!(o.order, vec![0, 2, 4, 3, 1, 5]);
        assert!(o.is_reordered());
    }

    #[test]
    fn spatial_preserves_the_set() {
        let stops = equator(&[0.0, 7.0, 3.0, 6.0, 1.0, 5.0, 2.0, 4.0]);
        let o = order_group(Strategy::SpatialInterleaved, &stops, &NearestNeighborSolver::new(100));
        let mut sorted = o.order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..stops.len()).collect::<Vec<_>>());
    }

    #[test]
    fn small_groups_are_left_alone() {
        let stops = equator(&[0.0, 5.0, 1.0]);
        let o = order_group(Strategy::SpatialInterleaved, &stops, &NearestNeighborSolver::new(100));
        assert_eq!(o.order, vec![0, 1, 2]);
    }
}
