//! Unit tests for cp-plan.

use cp_core::time::from_ymd_hm;
use cp_core::{CruiseDefaults, GeoPoint, Timestamp};
use cp_ops::{LineOperation, Operation, PointOperation, Waypoints};
use cp_strategy::Strategy;

use crate::{ClusterSpec, ConfigurationError, CruiseBuilder, Layout, LegSpec, Port};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn start() -> Timestamp {
    from_ymd_hm(2028, 6, 1, 8, 0).unwrap()
}

fn port(name: &str, lat: f64, lon: f64) -> Port {
    Port::new(name, GeoPoint::new(lat, lon))
}

fn stn(name: &str, lat: f64, lon: f64) -> Operation {
    PointOperation::new(name, GeoPoint::new(lat, lon)).depth(100.0).into()
}

/// Five stations strung out along 45°N, west of the ports.
fn builder() -> CruiseBuilder {
    CruiseBuilder::new("TEST-01", start()).operations([
        stn("A", 45.0, -50.0),
        stn("B", 45.0, -49.0),
        stn("C", 45.0, -48.0),
        stn("D", 45.0, -47.0),
        stn("E", 45.0, -46.0),
    ])
}

fn leg(name: &str) -> LegSpec {
    LegSpec::new(name, port("Halifax", 44.6, -63.6), port("St. John's", 47.6, -52.7))
}

fn names<'a>(it: impl Iterator<Item = (cp_core::OpId, &'a Operation)>) -> Vec<String> {
    it.map(|(_, op)| op.name().to_owned()).collect()
}

// ── Layout priority ───────────────────────────────────────────────────────────

#[cfg(test)]
mod layout {
    use super::*;

    #[test]
    fn sequence_governs_over_everything() {
        let cruise = builder()
            .leg(
                leg("L1")
                    .sequence(["E", "D"])
                    .cluster(ClusterSpec::new("grp", ["A", "B"]))
                    .stations(["C"]),
            )
            .build()
            .unwrap();
        let l = &cruise.legs()[0];
        assert_eq!(l.layout(), Layout::Sequence);
        assert_eq!(l.groups().len(), 1);
        assert!(l.groups()[0].is_implicit());
        assert_eq!(names(l.groups()[0].ordered()), ["E", "D"]);
    }

    #[test]
    fn clusters_govern_over_stations() {
        let cruise = builder()
            .leg(
                leg("L1")
                    .cluster(ClusterSpec::new("north", ["A", "B"]))
                    .cluster(ClusterSpec::new("south", ["C"]))
                    .stations(["D", "E"]),
            )
            .build()
            .unwrap();
        let l = &cruise.legs()[0];
        assert_eq!(l.layout(), Layout::Clusters);
        let groups: Vec<_> = l.groups().iter().map(|g| g.name().unwrap()).collect();
        assert_eq!(groups, ["north", "south"]);
        assert_eq!(l.operation_count(), 3);
    }

    #[test]
    fn stations_govern_over_sections() {
        let cruise = builder()
            .leg(leg("L1").stations(["B", "A"]).sections(["C"]))
            .build()
            .unwrap();
        assert_eq!(cruise.legs()[0].layout(), Layout::Stations);
        assert_eq!(names(cruise.legs()[0].groups()[0].ordered()), ["B", "A"]);
    }

    #[test]
    fn sections_alone_are_scheduled() {
        let line = LineOperation::new(
            "SEC1",
            vec![GeoPoint::new(45.0, -50.0), GeoPoint::new(46.0, -50.0)],
        )
        .unwrap();
        let cruise = builder().operation(line).leg(leg("L1").sections(["SEC1"])).build().unwrap();
        assert_eq!(cruise.legs()[0].layout(), Layout::Sections);
        assert_eq!(cruise.legs()[0].operation_count(), 1);
    }

    #[test]
    fn sequence_mixes_operations_and_clusters() {
        let cruise = builder()
            .leg(
                leg("L1")
                    .cluster(ClusterSpec::new("moor", ["C", "D"]))
                    .sequence(["A", "B", "moor", "E"]),
            )
            .build()
            .unwrap();
        let groups = cruise.legs()[0].groups();
        assert_eq!(groups.len(), 3);
        assert!(groups[0].is_implicit());
        assert_eq!(names(groups[0].ordered()), ["A", "B"]);
        assert_eq!(groups[1].name(), Some("moor"));
        assert_eq!(names(groups[2].ordered()), ["E"]);
        assert_eq!(cruise.legs()[0].clusters().count(), 1);
    }
}

// ── Parameter inheritance ─────────────────────────────────────────────────────

#[cfg(test)]
mod inheritance {
    use super::*;

    #[test]
    fn leg_overrides_win_over_defaults() {
        let cruise = builder()
            .leg(leg("L1").stations(["A"]).speed(12.0).turnaround(45.0).spacing(20.0))
            .leg(leg("L2").stations(["B"]))
            .build()
            .unwrap();
        let (l1, l2) = (&cruise.legs()[0], &cruise.legs()[1]);
        assert_eq!(l1.effective_speed(), 12.0);
        assert_eq!(l1.effective_turnaround(), 45.0);
        assert_eq!(l1.effective_spacing(), 20.0);
        assert_eq!(l2.effective_speed(), 10.0);
        assert_eq!(l2.effective_turnaround(), 30.0);
        assert_eq!(l2.effective_spacing(), 15.0);
        assert_eq!(l1.duration_context().turnaround_minutes, 45.0);
    }

    #[test]
    fn cluster_strategy_falls_back_to_leg() {
        let cruise = builder()
            .leg(
                leg("L1")
                    .strategy(Strategy::DayNightSplit)
                    .cluster(ClusterSpec::new("own", ["A"]).strategy(Strategy::SpatialInterleaved))
                    .cluster(ClusterSpec::new("inherit", ["B"])),
            )
            .leg(leg("L2").cluster(ClusterSpec::new("plain", ["C"])))
            .build()
            .unwrap();
        let g = cruise.legs()[0].groups();
        assert_eq!(g[0].strategy(), Strategy::SpatialInterleaved);
        assert_eq!(g[1].strategy(), Strategy::DayNightSplit);
        assert_eq!(cruise.legs()[1].groups()[0].strategy(), Strategy::Sequential);
    }

    #[test]
    fn leg_entry_and_exit_are_its_ports() {
        let cruise = builder().leg(leg("L1").stations(["A"])).build().unwrap();
        let l = &cruise.legs()[0];
        assert_eq!(l.entry_point(), GeoPoint::new(44.6, -63.6));
        assert_eq!(l.exit_point(), GeoPoint::new(47.6, -52.7));
        assert_eq!(cruise.departure(), l.entry_point());
        assert_eq!(cruise.arrival(), l.exit_point());
    }
}

// ── Cluster ordering ──────────────────────────────────────────────────────────

#[cfg(test)]
mod cluster_order {
    use super::*;

    #[test]
    fn entry_and_exit_do_not_depend_on_strategy() {
        let activities = ["A", "D", "B", "E", "C"];
        let mut ends = Vec::new();
        for s in [Strategy::Sequential, Strategy::DayNightSplit, Strategy::SpatialInterleaved] {
            let cruise = builder()
                .leg(leg("L1").cluster(ClusterSpec::new("g", activities).strategy(s)))
                .build()
                .unwrap();
            let c = &cruise.legs()[0].groups()[0];
            ends.push((c.entry_point(), c.exit_point()));
        }
        assert!(ends.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(ends[0].0, GeoPoint::new(45.0, -50.0));
        assert_eq!(ends[0].1, GeoPoint::new(45.0, -48.0));
    }

    #[test]
    fn spatial_reorders_interior_only() {
        let cruise = builder()
            .leg(
                leg("L1").cluster(
                    ClusterSpec::new("g", ["A", "D", "B", "C", "E"])
                        .strategy(Strategy::SpatialInterleaved),
                ),
            )
            .build()
            .unwrap();
        let c = &cruise.legs()[0].groups()[0];
        assert_eq!(names(c.ordered()), ["A", "B", "C", "D", "E"]);
        assert_eq!(names(c.authored()), ["A", "D", "B", "C", "E"]);
        assert!(c.resolved_order().is_reordered());
    }

    #[test]
    fn explicit_order_wins_and_disables_reordering() {
        let cruise = builder()
            .leg(
                leg("L1").cluster(
                    ClusterSpec::new("g", ["A", "B", "C", "D", "E"])
                        .strategy(Strategy::SpatialInterleaved)
                        .order(["E", "A", "D", "B", "C"]),
                ),
            )
            .build()
            .unwrap();
        let c = &cruise.legs()[0].groups()[0];
        assert!(c.has_explicit_order());
        assert_eq!(names(c.ordered()), ["E", "A", "D", "B", "C"]);
    }

    #[test]
    fn order_must_be_a_permutation() {
        let err = builder()
            .leg(leg("L1").cluster(ClusterSpec::new("g", ["A", "B"]).order(["A", "A"])))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidOrdering { .. }));
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use super::*;

    #[test]
    fn no_legs() {
        assert_eq!(builder().build().unwrap_err(), ConfigurationError::NoLegs);
    }

    #[test]
    fn dangling_reference_in_governing_list() {
        let err = builder().leg(leg("L1").stations(["A", "Z"])).build().unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownReference { leg: "L1".into(), name: "Z".into() }
        );
    }

    #[test]
    fn dangling_reference_in_non_governing_list() {
        // `sequence` governs, but `sections` still gets checked.
        let err = builder()
            .leg(leg("L1").sequence(["A"]).sections(["NOPE"]))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownReference { ref name, .. } if name == "NOPE"));
    }

    #[test]
    fn dangling_reference_inside_cluster() {
        let err = builder()
            .leg(leg("L1").cluster(ClusterSpec::new("g", ["A", "GHOST"])))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownReference { .. }));
    }

    #[test]
    fn duplicate_names() {
        let err = builder().operation(stn("A", 1.0, 1.0)).build().unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateName { kind: "operation", .. }));

        let err = builder()
            .leg(leg("L1").stations(["A"]))
            .leg(leg("L1").stations(["B"]))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateName { kind: "leg", .. }));

        let err = builder()
            .leg(leg("L1").cluster(ClusterSpec::new("A", ["B"])))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateName { kind: "cluster", .. }));
    }

    #[test]
    fn empty_leg_and_cluster() {
        let err = builder().leg(leg("L1")).build().unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyLeg("L1".into()));

        let err = builder()
            .leg(leg("L1").cluster(ClusterSpec::new("g", Vec::<String>::new())))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::EmptyCluster { .. }));
    }

    #[test]
    fn coordinates_out_of_range() {
        let err = builder()
            .operation(stn("BAD", 91.0, 0.0))
            .leg(leg("L1").stations(["A"]))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidCoordinate { ref entity, .. } if entity == "BAD"));

        let err = builder()
            .leg(LegSpec::new("L1", port("Nowhere", 95.0, -60.0), port("X", 45.0, -60.0)).stations(["A"]))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidCoordinate { .. }));
    }

    #[test]
    fn mixed_longitude_conventions() {
        let err = builder()
            .operation(stn("EAST", 45.0, 310.0))
            .leg(leg("L1").stations(["A"]))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MixedLongitude { signed: "A".into(), positive: "EAST".into() }
        );
    }

    #[test]
    fn parameter_ranges() {
        let err = builder().leg(leg("L1").stations(["A"]).speed(0.0)).build().unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidParameter { what: "vessel speed (kt)", .. }));

        let err = builder().leg(leg("L1").stations(["A"]).buffer(-5.0)).build().unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidParameter { .. }));

        let neg = PointOperation::new("NEG", GeoPoint::new(45.0, -45.0)).duration(-1.0);
        let err = builder().operation(neg).leg(leg("L1").stations(["A"])).build().unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidParameter { ref entity, .. } if entity == "NEG"));

        let late = Operation::from(PointOperation::new("LATE", GeoPoint::new(45.0, -45.0)))
            .with_delays(0.0, -10.0);
        let err = builder().operation(late).leg(leg("L1").stations(["A"])).build().unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidParameter { what: "delay_end (min)", .. }));
    }

    #[test]
    fn day_window_must_be_non_empty() {
        let defaults = CruiseDefaults { day_start_hour: 20, day_end_hour: 8, ..CruiseDefaults::default() };
        let err = builder().defaults(defaults).leg(leg("L1").stations(["A"])).build().unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidParameter { what: "day start hour", .. }));

        let defaults = CruiseDefaults { day_end_hour: 25, ..CruiseDefaults::default() };
        let err = builder().defaults(defaults).leg(leg("L1").stations(["A"])).build().unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidParameter { what: "day end hour", .. }));
    }

    #[test]
    fn unreferenced_catalog_entries_are_allowed() {
        let cruise = builder().leg(leg("L1").stations(["A"])).build().unwrap();
        assert_eq!(cruise.operations().count(), 5);
        assert_eq!(cruise.legs()[0].operation_count(), 1);
        let id = cruise.find("C").unwrap();
        assert_eq!(cruise.operation(id).map(Operation::name), Some("C"));
    }
}
