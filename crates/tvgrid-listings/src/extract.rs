//! Clock/title pairing over page text.
//!
//! Pages list a schedule as alternating lines: a bare clock (`20:00`) followed
//! somewhere below by the program title, with navigation chrome mixed in. The
//! scan keeps one pending clock; the next acceptable line becomes its title.

use regex::Regex;
use std::sync::LazyLock;
use tvgrid_core::config::ListingConfig;
use tvgrid_core::{Channel, RawEntry};

static CLOCK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}:[0-9]{2}$").expect("clock line pattern is valid"));

/// Which lines count as titles for one channel's page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRules {
    /// Shortest accepted title, in characters.
    pub min_title_chars: usize,
    /// A line containing any of these is page chrome, not a title.
    pub stopwords: Vec<String>,
}

impl Default for ListingRules {
    fn default() -> Self {
        Self {
            min_title_chars: 4,
            stopwords: Vec::new(),
        }
    }
}

impl ListingRules {
    pub fn for_channel(config: &ListingConfig, channel: &str) -> Self {
        Self {
            min_title_chars: config.min_title_chars,
            stopwords: config.stopwords_for(channel).to_vec(),
        }
    }

    fn accepts_title(&self, line: &str) -> bool {
        line.chars().count() >= self.min_title_chars
            && !self.stopwords.iter().any(|w| line.contains(w.as_str()))
    }
}

/// Pair clock lines with the next acceptable title line.
///
/// A clock that is never followed by a title is dropped; a second clock
/// replaces a pending one. Clock strings are passed through untouched, so
/// range checking is left to the normalizer.
pub fn extract_entries(channel: &Channel, text: &str, rules: &ListingRules) -> Vec<RawEntry> {
    let mut entries = Vec::new();
    let mut pending: Option<&str> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if CLOCK_LINE.is_match(line) {
            pending = Some(line);
            continue;
        }
        if let Some(clock) = pending {
            if rules.accepts_title(line) {
                entries.push(RawEntry {
                    channel: channel.clone(),
                    clock_time: clock.to_string(),
                    title: line.to_string(),
                });
                pending = None;
            }
        }
    }

    tracing::debug!(channel = %channel, found = entries.len(), "listing text scanned");
    entries
}
