//! `cp-plan` — the organizational hierarchy: cruise → leg → cluster.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`cruise`]  | `Cruise`: defaults, start time, catalog, legs                |
//! | [`leg`]     | `Leg`, `Port`, `Layout`, effective-parameter resolution      |
//! | [`cluster`] | `Cluster`: a strategically ordered group of operations       |
//! | [`builder`] | `CruiseBuilder`, `LegSpec`, `ClusterSpec`, validation        |
//! | [`error`]   | `ConfigurationError`, `PlanResult<T>`                        |
//!
//! # Lifecycle
//!
//! The graph is built once by [`CruiseBuilder::build`], which resolves
//! every name reference and rejects anything the scheduler could trip over
//! later.  After that it is immutable; only the lazily computed internal
//! order of each cluster is filled in on first use.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `serde`   | Propagates serde derives to the tag and config types.    |

pub mod builder;
pub mod cluster;
pub mod cruise;
pub mod error;
pub mod leg;

#[cfg(test)]
mod tests;

pub use builder::{ClusterSpec, CruiseBuilder, LegSpec};
pub use cluster::Cluster;
pub use cruise::Cruise;
pub use error::{ConfigurationError, PlanResult};
pub use leg::{Layout, Leg, Port};
