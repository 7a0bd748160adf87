//! API query and error types.

use serde::{Deserialize, Serialize};

/// Query parameters of `GET /report`, mirroring the page's filter controls.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Substation key, label or `ALL`.
    pub substation: Option<String>,
    /// Feeder number or `ALL`.
    pub feeder: Option<String>,
    /// Free-text label search.
    pub q: Option<String>,
    /// Minimum combined kVA per displayed transformer.
    pub min_kva: Option<f64>,
    /// Block detail; falls back to the configured default.
    pub blocks: Option<bool>,
}

/// Query parameters of `GET /feeders`.
#[derive(Debug, Default, Deserialize)]
pub struct FeedersQuery {
    pub substation: Option<String>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
