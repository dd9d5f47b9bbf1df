//! timeline-rs: date-to-coordinate mapping and drag/resize engine for
//! release timelines.
//!
//! `core` holds the pure layout functions (range, axis, bar positions, today
//! marker), `interaction` the gesture state machine, and `api` the engine
//! facade consumed by UI shells.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{TimelineConfig, TimelineEngine};
pub use error::{TimelineError, TimelineResult};
