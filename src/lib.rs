//! tvgrid: per-channel TV schedules from scraped listing text.
//!
//! Re-exports the workspace crates so integration tests and embedding
//! applications can depend on one crate.
//!
//! # Architecture
//!
//! ```text
//! page text ──► listings ──► Normalizer ──► ScheduleIndex ──► lookups
//!                                │
//!                                └──► store (schedule.json)
//! ```

pub use tvgrid_core::{config, index, normalizer, store, types};
pub use tvgrid_core::{
    Channel, NormalizeReport, Normalizer, ProgramEntry, RawEntry, RejectReason, Rejection,
    Schedule, ScheduleIndex,
};
pub use tvgrid_listings as listings;
