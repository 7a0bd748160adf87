//! Feeder analysis reporting for transformer load records.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
/// Dataset loading and CSV export.
pub mod io;
pub mod logging;
/// Normalization, classification, filtering and grouping of load records.
pub mod report;

pub use error::{Error, Result};
