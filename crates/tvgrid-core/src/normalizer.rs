//! Normalizer: turns raw listing triples into dated, gapless [`ProgramEntry`] values.
//!
//! The pass runs in a fixed order:
//!
//! 1. validate each [`RawEntry`] (channel, clock, title); failures become
//!    [`Rejection`]s instead of errors
//! 2. date the clock with the midnight-crossover rule and resolve it in the
//!    broadcast time zone
//! 3. stable sort by `(channel, start_time)` and drop repeated starts
//! 4. close every entry at its same-channel successor's start
//!
//! The last entry of each channel keeps the [`DEFAULT_DURATION_MINUTES`]
//! placeholder end.

use crate::types::{Channel, ProgramEntry, RawEntry};
use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, Offset, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::LazyLock;

/// Listings start around 06:00; a clock hour below this airs after midnight.
pub const CROSSOVER_HOUR: u32 = 6;

/// Placeholder length for a program with no known successor.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

static CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2})$").expect("clock pattern is valid"));

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

/// Why a raw entry was left out of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("unparsable clock time {0:?}")]
    UnparsableClock(String),
    #[error("empty title")]
    EmptyTitle,
    #[error("empty channel identifier")]
    EmptyChannel,
    /// The record could not be read as a raw entry at all (wrong JSON shape).
    #[error("malformed record: {0}")]
    Malformed(String),
    #[error("no calendar day follows {0}")]
    DateOutOfRange(NaiveDate),
    #[error("channel {channel} already has a program starting at {start}")]
    DuplicateStart {
        channel: Channel,
        start: DateTime<Utc>,
    },
}

/// A rejected raw entry, identified by its position in the input batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub index: usize,
    pub reason: RejectReason,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entry #{}: {}", self.index, self.reason)
    }
}

/// Accepted entries plus the diagnostics for everything that was omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Sorted by `(channel, start_time)`, gapless per channel.
    pub entries: Vec<ProgramEntry>,
    /// Sorted by input index.
    pub rejected: Vec<Rejection>,
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Converts raw listings into absolute program ranges.
///
/// Clock times are wall-clock times in the broadcaster's zone; the output is
/// always UTC. [`Normalizer::default`] uses UTC as the broadcast zone too.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    tz: Tz,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(chrono_tz::UTC)
    }
}

impl Normalizer {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Normalise `raw` against `reference_day`, returning only the accepted
    /// entries. Never fails: bad entries are skipped.
    pub fn normalize(&self, raw: &[RawEntry], reference_day: NaiveDate) -> Vec<ProgramEntry> {
        self.normalize_with_report(raw, reference_day).entries
    }

    /// Like [`normalize`](Self::normalize) with today's date in the broadcast
    /// zone as the reference day. Prefer passing an explicit day.
    pub fn normalize_today(&self, raw: &[RawEntry]) -> Vec<ProgramEntry> {
        let today = Utc::now().with_timezone(&self.tz).date_naive();
        self.normalize(raw, today)
    }

    /// Normalise `raw` and keep the reason for every omitted entry.
    pub fn normalize_with_report(
        &self,
        raw: &[RawEntry],
        reference_day: NaiveDate,
    ) -> NormalizeReport {
        let mut rejected = Vec::new();
        let mut dated = Vec::with_capacity(raw.len());

        for (index, item) in raw.iter().enumerate() {
            match self.validate(item, reference_day) {
                Ok(entry) => dated.push((index, entry)),
                Err(reason) => {
                    tracing::debug!(
                        index,
                        channel = %item.channel,
                        clock = %item.clock_time,
                        %reason,
                        "raw entry rejected"
                    );
                    rejected.push(Rejection { index, reason });
                }
            }
        }

        // Stable: equal keys keep input order, so the first listing wins below.
        dated.sort_by(|(_, a), (_, b)| {
            a.channel
                .cmp(&b.channel)
                .then_with(|| a.start_time.cmp(&b.start_time))
        });

        let mut entries: Vec<ProgramEntry> = Vec::with_capacity(dated.len());
        for (index, entry) in dated {
            let duplicate = entries.last().is_some_and(|prev| {
                prev.channel == entry.channel && prev.start_time == entry.start_time
            });
            if duplicate {
                let reason = RejectReason::DuplicateStart {
                    channel: entry.channel.clone(),
                    start: entry.start_time,
                };
                tracing::debug!(index, title = %entry.title, %reason, "raw entry rejected");
                rejected.push(Rejection { index, reason });
                continue;
            }
            entries.push(entry);
        }

        close_ranges(&mut entries);
        rejected.sort_by_key(|r| r.index);

        tracing::info!(
            %reference_day,
            accepted = entries.len(),
            rejected = rejected.len(),
            "normalized listing batch"
        );

        NormalizeReport { entries, rejected }
    }

    /// Absolute start of a program listed at `clock` on `reference_day`'s
    /// schedule, applying the midnight-crossover rule.
    pub fn resolve_start(
        &self,
        reference_day: NaiveDate,
        clock: NaiveTime,
    ) -> Result<DateTime<Utc>, RejectReason> {
        let date = if clock.hour() < CROSSOVER_HOUR {
            reference_day
                .succ_opt()
                .ok_or(RejectReason::DateOutOfRange(reference_day))?
        } else {
            reference_day
        };

        let local = date.and_time(clock);
        match self.tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
            // Fall-back hour: the first occurrence.
            LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
            // Spring-forward gap: read the clock with the offset in force
            // before the jump, which lands the same distance past it.
            LocalResult::None => {
                let before = local.checked_sub_signed(Duration::days(1)).unwrap_or(local);
                let offset = self.tz.offset_from_utc_datetime(&before).fix();
                let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
                Ok(Utc.from_utc_datetime(&utc))
            }
        }
    }

    fn validate(
        &self,
        raw: &RawEntry,
        reference_day: NaiveDate,
    ) -> Result<ProgramEntry, RejectReason> {
        if raw.channel.is_empty() {
            return Err(RejectReason::EmptyChannel);
        }
        let clock = parse_clock(&raw.clock_time)?;
        let title = clean_title(&raw.title);
        if title.is_empty() {
            return Err(RejectReason::EmptyTitle);
        }

        let start_time = self.resolve_start(reference_day, clock)?;
        Ok(ProgramEntry {
            channel: Channel::new(raw.channel.as_str().trim()),
            title,
            start_time,
            end_time: start_time + Duration::minutes(DEFAULT_DURATION_MINUTES),
        })
    }
}

/// Free-function form of [`Normalizer::normalize`] with UTC as the broadcast zone.
pub fn normalize(raw: &[RawEntry], reference_day: NaiveDate) -> Vec<ProgramEntry> {
    Normalizer::default().normalize(raw, reference_day)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse `H:MM` / `HH:MM` (surrounding whitespace ignored), hours 0–23 and
/// minutes 0–59.
pub fn parse_clock(s: &str) -> Result<NaiveTime, RejectReason> {
    let unparsable = || RejectReason::UnparsableClock(s.to_string());
    let caps = CLOCK.captures(s.trim()).ok_or_else(unparsable)?;
    let hour: u32 = caps[1].parse().map_err(|_| unparsable())?;
    let minute: u32 = caps[2].parse().map_err(|_| unparsable())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(unparsable)
}

/// Trim surrounding whitespace; the title itself is kept verbatim.
pub fn clean_title(s: &str) -> String {
    s.trim().to_string()
}

/// Close each entry at its same-channel successor. Expects `(channel, start)` order.
fn close_ranges(entries: &mut [ProgramEntry]) {
    for i in 1..entries.len() {
        let next_start = entries[i].start_time;
        if entries[i - 1].channel == entries[i].channel {
            entries[i - 1].end_time = next_start;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
