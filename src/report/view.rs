//! Filter selections made by the user.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::classify::{Classifier, SubstationKey};

/// Dropdown value meaning "no restriction".
pub const ALL: &str = "ALL";

fn is_all(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw.eq_ignore_ascii_case(ALL) || raw.eq_ignore_ascii_case("All Substations")
}

/// Substation dropdown selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubstationScope {
    #[default]
    All,
    Only(SubstationKey),
}

impl SubstationScope {
    /// Parses a dropdown value; blank and `"ALL"` mean [`SubstationScope::All`].
    pub fn parse(raw: &str) -> Self {
        if is_all(raw) {
            return Self::All;
        }
        SubstationKey::parse(raw).map_or(Self::All, Self::Only)
    }

    /// Like [`SubstationScope::parse`], but also accepts the configured
    /// display names of named substations.
    pub fn resolve(raw: &str, classifier: &Classifier) -> Self {
        if is_all(raw) {
            return Self::All;
        }
        classifier
            .resolve_substation(raw)
            .map_or(Self::All, Self::Only)
    }
}

impl fmt::Display for SubstationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(key) => write!(f, "{key}"),
        }
    }
}

/// Feeder scope value that is neither `ALL` nor a feeder number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid feeder \"{0}\": expected ALL or a feeder number")]
pub struct FeederScopeError(pub String);

/// Feeder dropdown selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeederScope {
    #[default]
    All,
    Only(u32),
}

impl FromStr for FeederScope {
    type Err = FeederScopeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if is_all(raw) {
            return Ok(Self::All);
        }
        raw.trim()
            .parse::<u32>()
            .map(Self::Only)
            .map_err(|_| FeederScopeError(raw.to_string()))
    }
}

impl fmt::Display for FeederScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(n) => write!(f, "{n}"),
        }
    }
}

/// Everything the user has selected on the report page.
///
/// Computation functions take this by reference; only the caller that
/// owns the page mutates it, through the `with_*` transitions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub substation: SubstationScope,
    pub feeder: FeederScope,
    /// Free-text search against feeder labels.
    pub query: String,
    /// Minimum combined kVA for a record to be displayed.
    pub min_kva: Option<f64>,
}

impl ViewState {
    /// Selects a substation. Clears the feeder selection and the search text.
    pub fn with_substation(self, substation: SubstationScope) -> Self {
        Self {
            substation,
            feeder: FeederScope::All,
            query: String::new(),
            ..self
        }
    }

    pub fn with_feeder(self, feeder: FeederScope) -> Self {
        Self { feeder, ..self }
    }

    pub fn with_query(self, query: &str) -> Self {
        Self {
            query: query.to_string(),
            ..self
        }
    }

    pub fn with_min_kva(self, min_kva: Option<f64>) -> Self {
        Self { min_kva, ..self }
    }

    /// Search text trimmed and lowercased; `None` when blank.
    pub fn normalized_query(&self) -> Option<String> {
        let q = self.query.trim();
        (!q.is_empty()).then(|| q.to_lowercase())
    }
}
