//! Strategy → visiting order of one group (a cluster, or a run of bare
//! operations in a leg).
//!
//! A spatially ordered group keeps its first and last authored stops in
//! place and reorders only the interior between them.  That makes the
//! group's own entry and exit independent of the chosen strategy, so the
//! routing into and out of the group never depends on its internals.

use tracing::debug;

use crate::tsp::{PathSolver, Stop};
use crate::Strategy;

/// Resolved order of one group.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupOrder {
    /// Permutation of authored indices.
    pub order: Vec<usize>,
    /// `true` if the solver hit its iteration cap.
    pub exhausted: bool,
}

impl GroupOrder {
    /// Author order.
    pub fn identity(n: usize) -> Self {
        Self { order: (0..n).collect(), exhausted: false }
    }

    /// `true` if the order differs from author order.
    pub fn is_reordered(&self) -> bool {
        self.order.iter().enumerate().any(|(i, &j)| i != j)
    }
}

/// Visiting order of `stops` (given in author order) under `strategy`.
pub fn order_group<S: PathSolver + ?Sized>(
    strategy: Strategy,
    stops: &[Stop],
    solver: &S,
) -> GroupOrder {
    let n = stops.len();
    if !strategy.reorders() || n <= 3 {
        return GroupOrder::identity(n);
    }

    let first = stops[0];
    let last = stops[n - 1];
    let interior = &stops[1..n - 1];
    let tour = solver.solve(first.exit, Some(last.entry), interior);

    let mut order = Vec::with_capacity(n);
    order.push(0);
    order.extend(tour.order.iter().map(|&i| i + 1));
    order.push(n - 1);

    debug!(
        stops = n,
        cost_km = tour.cost_km,
        iterations = tour.iterations,
        exhausted = tour.exhausted,
        "spatial ordering resolved"
    );

    GroupOrder { order, exhausted: tour.exhausted }
}
