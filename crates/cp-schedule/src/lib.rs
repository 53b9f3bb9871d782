//! `cp-schedule` — turns a validated [`Cruise`][cp_plan::Cruise] into a
//! timed activity timeline.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`scheduler`] | `calculate_schedule`, `schedule_with`, `Schedule`            |
//! | [`record`]    | `ActivityRecord`, `RecordKind`                               |
//! | [`warning`]   | `SchedulingWarning` and the "unusual value" thresholds       |
//! | [`summary`]   | `LegSummary`, `CruiseSummary` (sums over records)            |
//! | [`observer`]  | `ScheduleObserver`, `NoopObserver`                           |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                         |
//!
//! # Failure model
//!
//! Errors abort the run and produce nothing.  Warnings never stop it: they
//! are logged, handed to the observer, and returned with the records.
//!
//! # Cargo features
//!
//! | Feature | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | `Serialize` on records, warnings, summaries and `Schedule`.  |

pub mod error;
pub mod observer;
pub mod record;
pub mod scheduler;
pub mod summary;
pub mod warning;


pub use error::{ScheduleError, ScheduleResult};
pub use observer::{NoopObserver, ScheduleObserver};
pub use record::{ActivityRecord, RecordKind};
pub use scheduler::{Schedule, calculate_schedule, schedule_with};
pub use summary::{CruiseSummary, LegSummary};
pub use warning::SchedulingWarning;
