//! State module for tracking scan progress
//!
//! A scan walks a fixed pipeline of stages. Only fetching and parsing can end
//! the pipeline early; every later stage degrades in place instead.
//!
//! # Components
//!
//! - `ScanStage`: the stage a scan is currently in
//! - `StageTracker`: validates and logs transitions for a single scan

mod scan_state;

pub use scan_state::{ScanStage, StageTracker};
