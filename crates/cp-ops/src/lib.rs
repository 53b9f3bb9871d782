//! `cp-ops` — the operation abstraction.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`operation`] | `Operation` (Point / Line / Area), `Waypoints`, tag enums  |
//! | [`duration`]  | `DurationContext`, `Duration`, depth/route/manual rules    |
//! | [`resolve`]   | first-non-null override resolution                         |
//!
//! # Contract
//!
//! Every operation has exactly one entry point and one exit point (equal
//! for points and areas) and a duration computed from a
//! [`DurationContext`] that already holds the inherited leg/cruise values.
//! Durations are never negative.

pub mod duration;
pub mod operation;
pub mod resolve;

#[cfg(test)]
mod tests;

pub use duration::{Duration, DurationContext, DurationSource, MissingDuration};
pub use operation::{
    Action, AreaOperation, LineOperation, OpMeta, Operation, OperationKind, OperationType,
    PointOperation, Waypoints, Window,
};
pub use resolve::resolve;
