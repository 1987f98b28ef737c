//! URL handling module for SEO Scan
//!
//! This module provides scan-target normalization, link resolution against the
//! scanned page, and the authority comparison used to split internal from
//! external links.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{authority, is_same_site};
pub use normalize::{normalize_target_url, resolve_link, site_root_join};
