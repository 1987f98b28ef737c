//! Scan result data model
//!
//! `ScanResult` is the root aggregate returned for every scan. It owns every
//! facet by value and serializes to JSON with the field names downstream
//! report templates expect. Every field is always present, possibly `null`
//! or empty.

mod types;

pub use types::{
    BrokenLink, Headings, ImageInfo, Images, KeywordStat, Keywords, LinkStatus, Links, Metadata,
    Performance, ScanResult,
};
