//! Domain-specific assertions for tvgrid harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! schedule invariant was violated and *where* in the entry list.

use chrono::Duration;
use std::collections::BTreeMap;
use tvgrid_core::normalizer::DEFAULT_DURATION_MINUTES;
use tvgrid_core::ProgramEntry;

// ---------------------------------------------------------------------------
// Lookup assertions
// ---------------------------------------------------------------------------

/// Assert that a lookup found a program with the expected title.
///
/// ```rust
/// assert_airing!(index.find_active_program("11", at), "News");
/// ```
#[macro_export]
macro_rules! assert_airing {
    ($found:expr, $title:expr) => {{
        let found: Option<tvgrid_core::ProgramEntry> = $found;
        let expected: &str = $title;
        match found {
            Some(p) if p.title == expected => {}
            Some(p) => panic!(
                "assert_airing! failed:\n  expected: {:?}\n  actual:   {:?} ({} .. {})",
                expected, p.title, p.start_time, p.end_time
            ),
            None => panic!("assert_airing! failed: nothing airing, expected {:?}", expected),
        }
    }};
}

/// Assert that a lookup found nothing.
#[macro_export]
macro_rules! assert_nothing_airing {
    ($found:expr) => {{
        let found: Option<tvgrid_core::ProgramEntry> = $found;
        if let Some(p) = found {
            panic!(
                "assert_nothing_airing! failed: found {:?} ({} .. {})",
                p.title, p.start_time, p.end_time
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Schedule invariants
// ---------------------------------------------------------------------------

/// Group normalised entries by channel, keeping their order.
pub fn by_channel(entries: &[ProgramEntry]) -> BTreeMap<&str, Vec<&ProgramEntry>> {
    let mut map: BTreeMap<&str, Vec<&ProgramEntry>> = BTreeMap::new();
    for e in entries {
        map.entry(e.channel.as_str()).or_default().push(e);
    }
    map
}

/// Assert every invariant the normalizer promises for its output:
///
/// - `end_time > start_time` for every entry
/// - per channel, strictly increasing `start_time`
/// - per channel, `end_time[i] == start_time[i + 1]`
/// - per channel, the last entry lasts exactly the placeholder duration
/// - channels appear as contiguous runs in channel order
pub fn assert_schedule_invariants(entries: &[ProgramEntry]) {
    for (i, e) in entries.iter().enumerate() {
        assert!(
            e.end_time > e.start_time,
            "entry #{i} has an empty or inverted range: {e}"
        );
    }

    for pair in entries.windows(2) {
        assert!(
            pair[0].channel <= pair[1].channel,
            "channels out of order: {} then {}",
            pair[0].channel,
            pair[1].channel
        );
    }

    for (channel, programs) in by_channel(entries) {
        for pair in programs.windows(2) {
            assert!(
                pair[0].start_time < pair[1].start_time,
                "channel {channel}: starts not strictly increasing: {} then {}",
                pair[0],
                pair[1]
            );
            assert_eq!(
                pair[0].end_time, pair[1].start_time,
                "channel {channel}: gap or overlap between {} and {}",
                pair[0], pair[1]
            );
        }
        let last = programs.last().expect("grouped channel has entries");
        assert_eq!(
            last.duration(),
            Duration::minutes(DEFAULT_DURATION_MINUTES),
            "channel {channel}: last entry should keep the placeholder duration: {last}"
        );
    }
}

/// Titles in output order.
pub fn titles(entries: &[ProgramEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.title.as_str()).collect()
}
