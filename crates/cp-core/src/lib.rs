//! `cp-core` — foundational types for the cruiseplan scheduling engine.
//!
//! This crate is a dependency of every other `cp-*` crate.  It has no `cp-*`
//! dependencies and minimal external ones (`chrono` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `OpId`, `LegId`, `ClusterId`                            |
//! | [`geo`]       | `GeoPoint`, haversine, route distance, centroid         |
//! | [`units`]     | knots / km / nautical-mile conversions                  |
//! | [`time`]      | `Timestamp`, minute ↔ `TimeDelta` helpers               |
//! | [`config`]    | `CruiseDefaults` (global parameter defaults)            |
//! | [`error`]     | `CalculationError`, `CalcResult`                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;
pub mod units;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::CruiseDefaults;
pub use error::{CalcResult, CalculationError};
pub use geo::{GeoPoint, centroid, haversine_distance, route_distance};
pub use ids::{ClusterId, LegId, OpId};
pub use time::Timestamp;
pub use units::{KM_PER_NM, knots_to_kmh, km_to_nm, nm_to_km};
