//! tvgrid-listings: listing-text adapters for tvgrid.
//!
//! Each adapter takes the visible text of a broadcaster's schedule page
//! (already fetched and rendered elsewhere) and pairs clock lines with the
//! title lines that follow them, producing [`tvgrid_core::RawEntry`] values
//! for the normalizer.

pub mod extract;
pub mod source;

pub use extract::{extract_entries, ListingRules};
pub use source::{FileListing, ListingSource, TextListing};
