//! Dataset loading and report export.

/// JSON dataset loader.
pub mod dataset;
/// CSV export of rendered reports.
pub mod export;
