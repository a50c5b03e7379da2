//! Schedule index: point-in-time program lookups over normalised entries.
//!
//! A [`Schedule`] is an immutable per-channel view. [`ScheduleIndex`] holds
//! the current one behind an `Arc` and replaces it wholesale on
//! [`rebuild`](ScheduleIndex::rebuild); there is no partial update. Readers
//! that grabbed a [`snapshot`](ScheduleIndex::snapshot) keep a consistent view
//! for as long as they hold it.

use crate::types::{Channel, ProgramEntry};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Immutable channel → programs map. Each channel's programs are sorted by
/// `start_time`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    by_channel: BTreeMap<Channel, Vec<ProgramEntry>>,
}

impl Schedule {
    /// Group `entries` by channel and sort each group by start time. The sort
    /// is stable, so already-sorted normalizer output is kept as is.
    pub fn from_entries(entries: impl IntoIterator<Item = ProgramEntry>) -> Self {
        let mut by_channel: BTreeMap<Channel, Vec<ProgramEntry>> = BTreeMap::new();
        for entry in entries {
            by_channel
                .entry(entry.channel.clone())
                .or_default()
                .push(entry);
        }
        for programs in by_channel.values_mut() {
            programs.sort_by_key(|p| p.start_time);
        }
        Self { by_channel }
    }

    /// The program airing on `channel` at `at`: `start_time <= at < end_time`.
    pub fn find_active(&self, channel: &str, at: DateTime<Utc>) -> Option<&ProgramEntry> {
        let programs = self.by_channel.get(channel)?;
        // Last program that started at or before `at`.
        let started = programs.partition_point(|p| p.start_time <= at);
        let candidate = programs.get(started.checked_sub(1)?)?;
        candidate.contains(at).then_some(candidate)
    }

    /// Programs for one channel, in start order. Empty for unknown channels.
    pub fn programs(&self, channel: &str) -> &[ProgramEntry] {
        self.by_channel
            .get(channel)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.by_channel.keys()
    }

    /// All programs in `(channel, start_time)` order.
    pub fn entries(&self) -> impl Iterator<Item = &ProgramEntry> {
        self.by_channel.values().flatten()
    }

    /// Program count per channel, in channel order.
    pub fn channel_counts(&self) -> Vec<(Channel, usize)> {
        self.by_channel
            .iter()
            .map(|(channel, programs)| (channel.clone(), programs.len()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_channel.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_channel.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ScheduleIndex
// ---------------------------------------------------------------------------

/// What is on every requested channel at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineupRow {
    pub channel: Channel,
    /// `None` when nothing is known to air on the channel at that instant.
    pub program: Option<ProgramEntry>,
}

/// Shared, swappable holder of the current [`Schedule`].
#[derive(Debug, Default)]
pub struct ScheduleIndex {
    current: RwLock<Arc<Schedule>>,
}

impl ScheduleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = ProgramEntry>) -> Self {
        Self {
            current: RwLock::new(Arc::new(Schedule::from_entries(entries))),
        }
    }

    /// Replace the whole schedule. The new one is built before the lock is
    /// taken; the lock only covers the pointer swap.
    pub fn rebuild(&self, entries: impl IntoIterator<Item = ProgramEntry>) {
        let next = Arc::new(Schedule::from_entries(entries));
        tracing::debug!(
            channels = next.by_channel.len(),
            programs = next.len(),
            "schedule index rebuilt"
        );
        *self.current.write() = next;
    }

    /// The schedule as of now. Later rebuilds do not affect the returned value.
    pub fn snapshot(&self) -> Arc<Schedule> {
        self.current.read().clone()
    }

    /// The program airing on `channel` at `at`, or `None`.
    pub fn find_active_program(&self, channel: &str, at: DateTime<Utc>) -> Option<ProgramEntry> {
        self.current.read().find_active(channel, at).cloned()
    }

    /// One row per channel in `channels`, in that order, all answered from
    /// the same snapshot.
    pub fn lineup<I, C>(&self, channels: I, at: DateTime<Utc>) -> Vec<LineupRow>
    where
        I: IntoIterator<Item = C>,
        C: Into<Channel>,
    {
        let schedule = self.snapshot();
        channels
            .into_iter()
            .map(|channel| {
                let channel = channel.into();
                let program = schedule.find_active(channel.as_str(), at).cloned();
                LineupRow { channel, program }
            })
            .collect()
    }

    pub fn channel_counts(&self) -> Vec<(Channel, usize)> {
        self.current.read().channel_counts()
    }

    /// Flattened copy of every held program, in `(channel, start_time)` order.
    pub fn entries(&self) -> Vec<ProgramEntry> {
        self.current.read().entries().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
