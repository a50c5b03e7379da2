//! Store: the JSON exchange format shared with downstream readers.
//!
//! A schedule is persisted as a flat array of [`ProgramEntry`] objects with
//! `channel`, `title`, `startTime` and `endTime` keys (RFC 3339, UTC). This
//! module only encodes and decodes that format; where the file lives is the
//! caller's business.
//!
//! Raw batches coming from listing extraction are read leniently with
//! [`parse_raw_batch`]: a broken element is reported and skipped, the rest of
//! the batch still goes through.

use crate::normalizer::{RejectReason, Rejection};
use crate::types::{ProgramEntry, RawEntry};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid schedule JSON")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of entries, found {0}")]
    NotAnArray(&'static str),
}

// ---------------------------------------------------------------------------
// Schedule exchange file
// ---------------------------------------------------------------------------

/// Pretty-printed (2-space) exchange JSON.
pub fn to_json(entries: &[ProgramEntry]) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(entries)?)
}

pub fn from_json(json: &str) -> Result<Vec<ProgramEntry>, StoreError> {
    Ok(serde_json::from_str(json)?)
}

/// Write `entries` to `path`, replacing whatever was there.
pub fn save(path: impl AsRef<Path>, entries: &[ProgramEntry]) -> Result<(), StoreError> {
    let path = path.as_ref();
    let json = to_json(entries)?;
    std::fs::write(path, json).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), programs = entries.len(), "schedule saved");
    Ok(())
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<ProgramEntry>, StoreError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = from_json(&json)?;
    tracing::debug!(path = %path.display(), programs = entries.len(), "schedule loaded");
    Ok(entries)
}

// ---------------------------------------------------------------------------
// Raw batches
// ---------------------------------------------------------------------------

/// Raw entries read from a batch, plus the elements that could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBatch {
    pub entries: Vec<RawEntry>,
    pub rejected: Vec<Rejection>,
}

/// Read a JSON array of `{channel, clockTime | time, title}` objects.
///
/// The channel may be a string or an integer. Elements of the wrong shape are
/// collected as [`RejectReason::Malformed`] with their array index. Only a
/// non-array document is an error.
pub fn parse_raw_batch(json: &str) -> Result<RawBatch, StoreError> {
    let doc: Value = serde_json::from_str(json)?;
    let items = match doc {
        Value::Array(items) => items,
        other => return Err(StoreError::NotAnArray(json_kind(&other))),
    };

    let mut batch = RawBatch::default();
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<RawEntry>(item) {
            Ok(entry) => batch.entries.push(entry),
            Err(err) => {
                let reason = RejectReason::Malformed(err.to_string());
                tracing::debug!(index, %reason, "raw batch element skipped");
                batch.rejected.push(Rejection { index, reason });
            }
        }
    }
    Ok(batch)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
