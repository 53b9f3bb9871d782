//! voyage — a two-leg North Atlantic cruise scheduled end to end.
//!
//! Leg 1 runs a CTD section off Newfoundland and services a mooring pair
//! in daylight only.  Leg 2 crosses to Iceland through a spatially ordered
//! station grid and a multibeam survey box.  The timeline is printed and
//! the cruise summary written to `output/voyage/summary.json`.

use std::path::Path;

use anyhow::{Context, Result};

use cp_core::time::from_ymd_hm;
use cp_core::{CruiseDefaults, GeoPoint};
use cp_ops::{Action, AreaOperation, LineOperation, Operation, OperationType, PointOperation};
use cp_plan::{ClusterSpec, Cruise, CruiseBuilder, LegSpec, Port};
use cp_schedule::{ActivityRecord, Schedule, ScheduleObserver, schedule_with};
use cp_strategy::Strategy;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Reports progress on stderr while the run is in flight.  The timeline
/// itself is only printed once the whole schedule has succeeded.
#[derive(Default)]
struct Progress {
    records: usize,
}

impl ScheduleObserver for Progress {
    fn on_leg_start(&mut self, leg: &cp_plan::Leg, at: cp_core::Timestamp) {
        eprintln!("scheduling {} from {at}", leg.name());
    }

    fn on_record(&mut self, _record: &ActivityRecord) {
        self.records += 1;
    }

    fn on_leg_end(&mut self, leg: &cp_plan::Leg, at: cp_core::Timestamp) {
        eprintln!("  {} done at {at} ({} records so far)", leg.name(), self.records);
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_timeline(cruise: &Cruise, schedule: &Schedule) {
    for leg in cruise.legs() {
        println!();
        println!("── {} ({} → {})", leg.name(), leg.departure().name, leg.arrival().name);
        println!(
            "{:<16} {:<15} {:<17} {:<17} {:>9} {:>8} {:>7}",
            "Activity", "Kind", "Start", "End", "Transit", "Wait", "Hours"
        );
        println!("{}", "-".repeat(95));
        for r in schedule.records.iter().filter(|r| r.leg == leg.id()) {
            println!(
                "{:<16} {:<15} {:<17} {:<17} {:>6.1} nm {:>6.0} m {:>7.2}",
                r.label,
                r.kind.label(),
                r.start.format("%Y-%m-%d %H:%M"),
                r.end.format("%Y-%m-%d %H:%M"),
                r.transit_nm,
                r.wait_minutes,
                r.duration_minutes / 60.0,
            );
        }
    }
    for w in &schedule.warnings {
        println!("   ! {w}");
    }
}

// ── Plan ──────────────────────────────────────────────────────────────────────

fn stations() -> Vec<Operation> {
    // Flemish Cap section, shelf to deep water.
    let section = [
        ("FC_01", 47.00, -52.00, 150.0),
        ("FC_02", 47.00, -51.00, 350.0),
        ("FC_03", 47.00, -50.00, 1_100.0),
        ("FC_04", 47.00, -49.00, 2_800.0),
    ];
    // Irminger grid, deliberately listed out of geographic order.
    let grid = [
        ("IR_A", 58.0, -40.0, 2_900.0),
        ("IR_D", 60.0, -34.0, 2_400.0),
        ("IR_B", 59.0, -38.0, 3_000.0),
        ("IR_E", 61.0, -32.0, 2_000.0),
        ("IR_C", 59.5, -36.0, 2_700.0),
        ("IR_F", 62.0, -30.0, 1_500.0),
    ];
    section
        .iter()
        .chain(grid.iter())
        .map(|&(name, lat, lon, depth)| {
            PointOperation::new(name, GeoPoint::new(lat, lon))
                .depth(depth)
                .action(Action::Profile)
                .into()
        })
        .collect()
}

fn main() -> Result<()> {
    println!("=== voyage: cruiseplan timeline demo ===");

    let start = from_ymd_hm(2028, 6, 1, 6, 0).context("invalid start date")?;
    let defaults = CruiseDefaults { vessel_speed_knots: 11.0, ..CruiseDefaults::default() };

    let recover = PointOperation::new("M1_recover", GeoPoint::new(47.50, -48.00))
        .op_type(OperationType::Mooring)
        .action(Action::Recovery)
        .duration(150.0);
    let deploy = Operation::from(
        PointOperation::new("M1_deploy", GeoPoint::new(47.51, -48.02))
            .op_type(OperationType::Mooring)
            .action(Action::Deployment)
            .duration(240.0),
    )
    .with_delays(30.0, 0.0)
    .with_comment("replacement mooring, same site");
    let adcp = LineOperation::new(
        "ADCP_shelf",
        vec![GeoPoint::new(47.40, -52.60), GeoPoint::new(47.10, -52.20)],
    )?
    .speed(8.0)
    .action(Action::Adcp);
    let survey = AreaOperation::new(
        "MB_box",
        vec![
            GeoPoint::new(63.0, -26.0),
            GeoPoint::new(63.0, -25.0),
            GeoPoint::new(63.5, -25.0),
            GeoPoint::new(63.5, -26.0),
        ],
    )?
    .duration(480.0)
    .action(Action::Bathymetry);

    let st_johns = Port::new("St. John's", GeoPoint::new(47.56, -52.71));
    let cruise = CruiseBuilder::new("NA-2028", start)
        .defaults(defaults)
        .operations(stations())
        .operation(recover)
        .operation(deploy)
        .operation(adcp)
        .operation(survey)
        .leg(
            LegSpec::new("Newfoundland", Port::new("St. John's", GeoPoint::new(47.56, -52.71)), st_johns.clone())
                .cluster(ClusterSpec::new("moorings", ["M1_recover", "M1_deploy"]).strategy(Strategy::DayNightSplit))
                .sequence(["ADCP_shelf", "FC_01", "FC_02", "FC_03", "FC_04", "moorings"])
                .buffer(360.0),
        )
        .leg(
            LegSpec::new("Irminger", st_johns, Port::new("Reykjavik", GeoPoint::new(64.15, -21.94)))
                .cluster(
                    ClusterSpec::new("grid", ["IR_A", "IR_D", "IR_B", "IR_E", "IR_C", "IR_F"])
                        .strategy(Strategy::SpatialInterleaved),
                )
                .sequence(["grid", "MB_box"])
                .speed(12.0)
                .buffer(720.0),
        )
        .build()?;

    let mut progress = Progress::default();
    let schedule = schedule_with(&cruise, &mut progress)?;
    let summary = schedule.summary();

    print_timeline(&cruise, &schedule);
    println!();
    println!("{} records, {} warnings", schedule.records.len(), schedule.warnings.len());
    println!("{:<14} {:>5} {:>10} {:>10} {:>9} {:>9}", "Leg", "Ops", "Dist (nm)", "Transit h", "Wait h", "Days");
    for l in &summary.legs {
        println!(
            "{:<14} {:>5} {:>10.1} {:>10.1} {:>9.1} {:>9.2}",
            l.name,
            l.operations,
            l.distance_nm(),
            l.transit_minutes / 60.0,
            l.wait_minutes / 60.0,
            l.total_minutes() / 1_440.0,
        );
    }
    println!("Total: {:.2} days, {:.0} nm", summary.total_days(), summary.distance_nm());

    let dir = Path::new("output/voyage");
    std::fs::create_dir_all(dir)?;
    let path = dir.join("summary.json");
    std::fs::write(&path, serde_json::to_string_pretty(&summary)?)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Summary written to {}", path.display());

    Ok(())
}
