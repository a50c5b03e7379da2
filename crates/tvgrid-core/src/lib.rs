//! tvgrid-core: tvgrid core library.
//!
//! This crate exposes the schedule pipeline layers as public modules, plus
//! the shared types used across all layers.
//!
//! # Architecture
//!
//! ```text
//! RawEntry batch ──► Normalizer ──► ScheduleIndex ──► lookups
//!                        │
//!                        └──► store (exchange file)
//! ```
//!
//! Everything here is synchronous. The index publishes immutable snapshots,
//! so lookups can run from any thread while a rebuild is in progress.

pub mod config;
pub mod index;
pub mod normalizer;
pub mod store;
pub mod types;

pub use index::{Schedule, ScheduleIndex};
pub use normalizer::{NormalizeReport, Normalizer, RejectReason, Rejection};
pub use types::{Channel, ProgramEntry, RawEntry};
