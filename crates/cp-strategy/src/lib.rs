//! `cp-strategy` — how operations inside a leg or cluster are ordered and
//! timed.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`strategy`] | `Strategy` tag (`sequential`, `day_night_split`, …)       |
//! | [`daylight`] | `DayWindow` and the wait-time rule                        |
//! | [`tsp`]      | `PathSolver` trait, `NearestNeighborSolver`, `Tour`       |
//! | [`order`]    | `order_group`: strategy → permutation of a group          |
//! | [`error`]    | `StrategyError`                                           |
//!
//! # Pluggability
//!
//! Spatial ordering goes through the [`PathSolver`] trait, so a better
//! heuristic can replace [`NearestNeighborSolver`] without touching the
//! hierarchy or the scheduler.  Every function here is pure.

pub mod daylight;
pub mod error;
pub mod order;
pub mod strategy;
pub mod tsp;

#[cfg(test)]
mod tests;

pub use daylight::DayWindow;
pub use error::StrategyError;
pub use order::{GroupOrder, order_group};
pub use strategy::Strategy;
pub use tsp::{NearestNeighborSolver, PathSolver, Stop, Tour, solve_open_path};
