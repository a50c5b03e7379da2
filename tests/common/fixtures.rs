//! Static listing corpora used across harnesses.
//!
//! The page-text fixtures imitate what the broadcasters' schedule pages look
//! like once rendered to text: clock lines, titles, and navigation chrome in
//! between.

use super::builders::RawBatchBuilder;
use tvgrid_core::RawEntry;

/// Channel 11 page text: Hebrew navigation chrome that the channel's
/// stop-words must filter out, plus an after-midnight tail.
pub const PAGE_CH11: &str = "
לוח שידורים
תוכניות
06:00
מהדורת בוקר
07:30
abc
סדרה דוקומנטרית
22:00
סרט הלילה
01:15
שידורים חוזרים
02:00
תוכנית לילה
";

/// Channel 12 page text: pipe-separated menu rows and one orphan clock.
pub const PAGE_CH12: &str = "
Home | Live | VOD
06:30
Morning Magazine
12:00
13:00
Midday News
20:00
Prime Time Drama
";

/// Channel 14 page text: no stop-words configured, so every long enough
/// line after a clock counts.
pub const PAGE_CH14: &str = "
19:00
Evening Report
21:00
Debate Night
";

/// A typical evening: two channels, interleaved, crossing midnight.
pub fn evening_batch() -> Vec<RawEntry> {
    RawBatchBuilder::channel("11")
        .listing("20:00", "Evening News")
        .channel_switch("12")
        .listing("19:30", "Quiz Show")
        .channel_switch("11")
        .listing("21:00", "Feature Film")
        .listing("23:30", "Late Talk")
        .listing("00:45", "Night Replay")
        .channel_switch("12")
        .listing("21:00", "Reality Hour")
        .build()
}

/// Five listings for channel 11, one with a broken clock.
pub fn batch_with_one_malformed() -> Vec<RawEntry> {
    RawBatchBuilder::channel("11")
        .listing("08:00", "News")
        .listing("abc", "Broken Clock")
        .listing("09:00", "Movie")
        .listing("10:30", "Cartoons")
        .listing("12:00", "Noon Report")
        .build()
}
