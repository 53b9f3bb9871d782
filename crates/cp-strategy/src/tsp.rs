//! Anchored open-path ordering.
//!
//! # Problem
//!
//! Given a start anchor, an optional end anchor, and a set of stops that
//! each have an entry and an exit point, find a visiting order that keeps
//! the total transit distance small:
//!
//! ```text
//! cost = d(start, e₀) + Σ d(xᵢ, eᵢ₊₁) + d(xₙ, end)
//! ```
//!
//! The cost is asymmetric whenever a stop is a line (entry ≠ exit).
//!
//! # Default heuristic
//!
//! [`NearestNeighborSolver`] builds a nearest-neighbour tour from the start
//! anchor (kept only if it beats author order), then runs improvement passes of segment reversal and single-stop
//! relocation, accepting only strict improvements.  Ties anywhere resolve
//! to the lower original index, so equal-cost inputs keep author order.
//! Each accepted improvement counts as one iteration; once the cap is
//! reached the best tour so far is returned with `exhausted = true`.
//! Sized for tens of stops, not thousands: one pass is O(n³).

use cp_core::GeoPoint;

/// Improvements smaller than this (km) are treated as ties.
const EPS_KM: f64 = 1e-9;

// ── Stop / Tour ───────────────────────────────────────────────────────────────

/// One stop of the path.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stop {
    pub entry: GeoPoint,
    pub exit: GeoPoint,
}

impl Stop {
    pub fn new(entry: GeoPoint, exit: GeoPoint) -> Self {
        Self { entry, exit }
    }

    /// A stop with identical entry and exit.
    pub fn at(p: GeoPoint) -> Self {
        Self { entry: p, exit: p }
    }
}

/// Result of a solve.
#[derive(Clone, Debug, PartialEq)]
pub struct Tour {
    /// Permutation of stop indices.
    pub order: Vec<usize>,
    /// Total transit distance including both anchors, km.
    pub cost_km: f64,
    /// Improvements applied after construction.
    pub iterations: usize,
    /// `true` if the iteration cap stopped the search early.
    pub exhausted: bool,
}

// ── Solver trait ──────────────────────────────────────────────────────────────

/// Pluggable ordering heuristic.
///
/// # Contract
///
/// - Must return a permutation of `0..stops.len()`.
/// - Must be deterministic for the same inputs.
/// - Must terminate; an iteration cap bounds the work, never fails the call.
pub trait PathSolver {
    fn solve(&self, start: GeoPoint, end: Option<GeoPoint>, stops: &[Stop]) -> Tour;
}

// ── NearestNeighborSolver ─────────────────────────────────────────────────────

/// Nearest-neighbour construction plus reversal/relocation improvement.
#[derive(Copy, Clone, Debug)]
pub struct NearestNeighborSolver {
    pub iteration_cap: usize,
}

impl NearestNeighborSolver {
    pub fn new(iteration_cap: usize) -> Self {
        Self { iteration_cap }
    }
}

impl PathSolver for NearestNeighborSolver {
    fn solve(&self, start: GeoPoint, end: Option<GeoPoint>, stops: &[Stop]) -> Tour {
        // Author order is the fallback construction and wins ties.
        let mut order: Vec<usize> = (0..stops.len()).collect();
        let mut cost = path_cost(start, end, stops, &order);
        let greedy = nearest_neighbor(start, stops);
        let greedy_cost = path_cost(start, end, stops, &greedy);
        if greedy_cost < cost - EPS_KM {
            order = greedy;
            cost = greedy_cost;
        }
        let mut iterations = 0;
        let mut exhausted = false;

        loop {
            if iterations >= self.iteration_cap {
                exhausted = improve(start, end, stops, &order, cost).is_some();
                break;
            }
            match improve(start, end, stops, &order, cost) {
                Some((better, better_cost)) => {
                    order = better;
                    cost = better_cost;
                    iterations += 1;
                }
                None => break,
            }
        }

        Tour { order, cost_km: cost, iterations, exhausted }
    }
}

/// Solve with the default heuristic.
pub fn solve_open_path(
    start: GeoPoint,
    end: Option<GeoPoint>,
    stops: &[Stop],
    iteration_cap: usize,
) -> Tour {
    NearestNeighborSolver::new(iteration_cap).solve(start, end, stops)
}

/// Total transit distance of visiting `stops` in `order`.
pub fn path_cost(start: GeoPoint, end: Option<GeoPoint>, stops: &[Stop], order: &[usize]) -> f64 {
    let mut cost = 0.0;
    let mut here = start;
    for &i in order {
        cost += here.distance_km(stops[i].entry);
        here = stops[i].exit;
    }
    if let Some(end) = end {
        cost += here.distance_km(end);
    }
    cost
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn nearest_neighbor(start: GeoPoint, stops: &[Stop]) -> Vec<usize> {
    let mut visited = vec![false; stops.len()];
    let mut order = Vec::with_capacity(stops.len());
    let mut here = start;

    for _ in 0..stops.len() {
        let mut best: Option<(usize, f64)> = None;
        for (i, stop) in stops.iter().enumerate() {
            if visited[i] {
                continue;
            }
            let d = here.distance_km(stop.entry);
            // Strict comparison keeps the lowest index on ties.
            if best.is_none_or(|(_, bd)| d < bd - EPS_KM) {
                best = Some((i, d));
            }
        }
        let Some((i, _)) = best else { break };
        visited[i] = true;
        order.push(i);
        here = stops[i].exit;
    }
    order
}

/// First strictly improving reversal or relocation, scanning in index
/// order so the result is deterministic.
fn improve(
    start: GeoPoint,
    end: Option<GeoPoint>,
    stops: &[Stop],
    order: &[usize],
    cost: f64,
) -> Option<(Vec<usize>, f64)> {
    let n = order.len();
    if n < 2 {
        return None;
    }

    // Segment reversal.
    for i in 0..n - 1 {
        for j in i + 1..n {
            let mut candidate = order.to_vec();
            candidate[i..=j].reverse();
            let c = path_cost(start, end, stops, &candidate);
            if c < cost - EPS_KM {
                return Some((candidate, c));
            }
        }
    }

    // Relocation of a single stop.
    for from in 0..n {
        for to in 0..n {
            if from == to {
                continue;
            }
            let mut candidate = order.to_vec();
            let stop = candidate.remove(from);
            candidate.insert(to, stop);
            let c = path_cost(start, end, stops, &candidate);
            if c < cost - EPS_KM {
                return Some((candidate, c));
            }
        }
    }

    None
}
