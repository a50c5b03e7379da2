//! Listing sources: where page text comes from.

use crate::extract::{extract_entries, ListingRules};
use anyhow::Context;
use std::path::PathBuf;
use tvgrid_core::{Channel, RawEntry};

/// Trait implemented by each listing source.
pub trait ListingSource {
    fn channel(&self) -> &Channel;

    /// Raw entries found in the source. Errors mean the source could not be
    /// read at all; unusable lines inside it are skipped silently.
    fn raw_entries(&self) -> anyhow::Result<Vec<RawEntry>>;
}

/// Page text already held in memory.
#[derive(Debug, Clone)]
pub struct TextListing {
    channel: Channel,
    text: String,
    rules: ListingRules,
}

impl TextListing {
    pub fn new(channel: impl Into<Channel>, text: impl Into<String>, rules: ListingRules) -> Self {
        Self {
            channel: channel.into(),
            text: text.into(),
            rules,
        }
    }
}

impl ListingSource for TextListing {
    fn channel(&self) -> &Channel {
        &self.channel
    }

    fn raw_entries(&self) -> anyhow::Result<Vec<RawEntry>> {
        Ok(extract_entries(&self.channel, &self.text, &self.rules))
    }
}

/// A saved page-text dump on disk.
#[derive(Debug, Clone)]
pub struct FileListing {
    channel: Channel,
    path: PathBuf,
    rules: ListingRules,
}

impl FileListing {
    pub fn new(channel: impl Into<Channel>, path: impl Into<PathBuf>, rules: ListingRules) -> Self {
        Self {
            channel: channel.into(),
            path: path.into(),
            rules,
        }
    }
}

impl ListingSource for FileListing {
    fn channel(&self) -> &Channel {
        &self.channel
    }

    fn raw_entries(&self) -> anyhow::Result<Vec<RawEntry>> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading listing text {}", self.path.display()))?;
        Ok(extract_entries(&self.channel, &text, &self.rules))
    }
}
