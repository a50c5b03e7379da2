//! Test builders: ergonomic constructors for raw batches and program entries.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use chrono::{DateTime, NaiveDate, Utc};
use tvgrid_core::{Channel, ProgramEntry, RawEntry};

// ---------------------------------------------------------------------------
// RawBatchBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a batch of [`RawEntry`] values.
///
/// # Example
///
/// ```rust
/// let raw = RawBatchBuilder::channel("11")
///     .listing("08:00", "News")
///     .listing("09:00", "Movie")
///     .channel_switch("12")
///     .listing("08:30", "Cooking")
///     .build();
/// ```
pub struct RawBatchBuilder {
    channel: Channel,
    entries: Vec<RawEntry>,
}

impl RawBatchBuilder {
    pub fn channel(channel: &str) -> Self {
        Self {
            channel: Channel::new(channel),
            entries: Vec::new(),
        }
    }

    /// Subsequent listings go to `channel`.
    pub fn channel_switch(mut self, channel: &str) -> Self {
        self.channel = Channel::new(channel);
        self
    }

    pub fn listing(mut self, clock: &str, title: &str) -> Self {
        self.entries.push(RawEntry {
            channel: self.channel.clone(),
            clock_time: clock.to_string(),
            title: title.to_string(),
        });
        self
    }

    pub fn build(self) -> Vec<RawEntry> {
        self.entries
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Parse an RFC 3339 instant.
pub fn utc(s: &str) -> DateTime<Utc> {
    s.parse()
        .unwrap_or_else(|e| panic!("bad instant {s:?} in test: {e}"))
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// The reference day most harnesses use.
pub fn new_year() -> NaiveDate {
    day(2024, 1, 1)
}

/// Build a normalised entry directly, bypassing the normalizer.
pub fn program(channel: &str, title: &str, start: &str, end: &str) -> ProgramEntry {
    ProgramEntry {
        channel: Channel::new(channel),
        title: title.to_string(),
        start_time: utc(start),
        end_time: utc(end),
    }
}
