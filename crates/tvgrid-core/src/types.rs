//! Core types for tvgrid-core.
//!
//! This module defines the data structures shared across all layers: the
//! [`Channel`] identifier, the unvalidated [`RawEntry`] produced by listing
//! extraction, and the normalised [`ProgramEntry`] that the index serves.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;

/// Broadcaster channel identifier, e.g. `"11"`.
///
/// Ordered lexicographically. Borrows as `&str` so maps keyed by `Channel`
/// can be queried with a plain string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Channel(String);

impl Channel {
    pub fn new(id: impl Into<String>) -> Self {
        Channel(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Borrow<str> for Channel {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Channel {
    fn from(id: &str) -> Self {
        Channel::new(id)
    }
}

impl From<String> for Channel {
    fn from(id: String) -> Self {
        Channel(id)
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scraped batches carry the channel as either `"11"` or `11`.
fn channel_from_text_or_number<'de, D>(deserializer: D) -> Result<Channel, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(i64),
    }

    Ok(match Repr::deserialize(deserializer)? {
        Repr::Text(id) => Channel(id),
        Repr::Number(id) => Channel(id.to_string()),
    })
}

/// An unvalidated `(channel, clock time, title)` triple as scraped.
///
/// Nothing about it is trusted: the clock may be garbage and the title may be
/// empty. The normalizer decides what survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntry {
    #[serde(deserialize_with = "channel_from_text_or_number")]
    pub channel: Channel,
    /// Wall-clock start, `H:MM` or `HH:MM`, no date.
    #[serde(alias = "time")]
    pub clock_time: String,
    pub title: String,
}

impl RawEntry {
    pub fn new(
        channel: impl Into<Channel>,
        clock_time: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            clock_time: clock_time.into(),
            title: title.into(),
        }
    }
}

/// A validated program with an absolute, half-open airing range
/// `[start_time, end_time)`.
///
/// This is also the record written verbatim to the exchange file, which is
/// why the JSON keys are camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramEntry {
    pub channel: Channel,
    pub title: String,
    pub start_time: DateTime<Utc>,
    /// Exclusive.
    pub end_time: DateTime<Utc>,
}

impl ProgramEntry {
    /// `true` when `at` falls inside `[start_time, end_time)`.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start_time <= at && at < self.end_time
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

impl std::fmt::Display for ProgramEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} ({} .. {})",
            self.channel,
            self.title,
            self.start_time.to_rfc3339(),
            self.end_time.to_rfc3339()
        )
    }
}
