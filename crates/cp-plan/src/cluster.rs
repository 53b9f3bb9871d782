//! `Cluster` — a group of operations scheduled under one strategy.
//!
//! Named clusters come from the leg's `clusters` list or are referenced
//! from its `sequence`.  Bare operations of a leg are wrapped in implicit
//! (unnamed) clusters that use the leg's strategy, so the scheduler only
//! ever walks clusters.
//!
//! # Lazy ordering
//!
//! The internal order depends on the strategy and, for
//! `spatial_interleaved`, on a heuristic solve.  It is computed on first
//! use and cached.  Entry and exit delegate to the first and last
//! operation of that resolved order; because spatial ordering pins the
//! first and last authored operations, they never depend on the strategy.

use std::sync::{Arc, OnceLock};

use cp_core::{ClusterId, GeoPoint, OpId};
use cp_ops::{Operation, Waypoints};
use cp_strategy::{GroupOrder, NearestNeighborSolver, Stop, Strategy, order_group};

/// A non-empty, ordered group of operations within one leg.
#[derive(Debug)]
pub struct Cluster {
    pub(crate) id: ClusterId,
    pub(crate) name: Option<String>,
    pub(crate) strategy: Strategy,
    /// `true` if the author fixed the order explicitly.
    pub(crate) explicit_order: bool,
    /// Operations in author order.  Never empty.
    pub(crate) ops: Vec<(OpId, Arc<Operation>)>,
    pub(crate) iteration_cap: usize,
    pub(crate) resolved: OnceLock<GroupOrder>,
}

impl Cluster {
    pub fn id(&self) -> ClusterId {
        self.id
    }

    /// Cluster name; `None` for an implicit group of bare leg operations.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn is_implicit(&self) -> bool {
        self.name.is_none()
    }

    /// Effective strategy (cluster, else leg, else sequential).
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn has_explicit_order(&self) -> bool {
        self.explicit_order
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Operations in author order.
    pub fn authored(&self) -> impl Iterator<Item = (OpId, &Operation)> {
        self.ops.iter().map(|(id, op)| (*id, op.as_ref()))
    }

    /// Internal visiting order, resolved on first call.
    pub fn resolved_order(&self) -> &GroupOrder {
        self.resolved.get_or_init(|| {
            if self.explicit_order {
                return GroupOrder::identity(self.ops.len());
            }
            let stops: Vec<Stop> = self
                .ops
                .iter()
                .map(|(_, op)| Stop::new(op.entry_point(), op.exit_point()))
                .collect();
            order_group(self.strategy, &stops, &NearestNeighborSolver::new(self.iteration_cap))
        })
    }

    /// Operations in resolved visiting order.
    pub fn ordered(&self) -> impl Iterator<Item = (OpId, &Operation)> {
        self.resolved_order()
            .order
            .iter()
            .map(|&i| (self.ops[i].0, self.ops[i].1.as_ref()))
    }

    fn first(&self) -> &Operation {
        let i = self.resolved_order().order[0];
        &self.ops[i].1
    }

    fn last(&self) -> &Operation {
        let order = &self.resolved_order().order;
        &self.ops[order[order.len() - 1]].1
    }
}

impl Waypoints for Cluster {
    fn entry_point(&self) -> GeoPoint {
        self.first().entry_point()
    }

    fn exit_point(&self) -> GeoPoint {
        self.last().exit_point()
    }
}
