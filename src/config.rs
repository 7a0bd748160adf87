//! TOML-based report configuration and preset definitions.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::report::classify::{Classifier, SubstationKey, normalize_key};

/// Top-level configuration parsed from TOML.
///
/// All tables are optional. Load from TOML with
/// [`AnalysisConfig::from_toml_file`] or pick a built-in preset with
/// [`AnalysisConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Report layout and dataset location.
    #[serde(default)]
    pub report: ReportConfig,
    /// Feeder number → display label overrides.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Substation overrides for irregular feeders.
    #[serde(default)]
    pub substations: SubstationConfig,
}

/// Report layout and dataset location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Split feeder groups into blocks.
    pub show_blocks: bool,
    /// Path of the exported JSON dataset.
    pub dataset: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            show_blocks: true,
            dataset: PathBuf::from("data/feeder_analysis_table.json"),
        }
    }
}

/// Substation overrides for feeders whose substation is not `feeder / 100`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubstationConfig {
    /// Feeder number → substation key.
    pub overrides: BTreeMap<String, String>,
    /// Substation key → display name. Keys without an entry display as themselves.
    pub names: BTreeMap<String, String>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"labels.1203"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn parse_feeder(table: &str, key: &str) -> Result<u32, ConfigError> {
    key.trim().parse::<u32>().map_err(|_| {
        ConfigError::new(
            format!("{table}.{key}"),
            "key must be a non-negative feeder number",
        )
    })
}

impl AnalysisConfig {
    /// Block-detail report without any overrides.
    pub fn analysis() -> Self {
        Self::default()
    }

    /// Foreman view: no block column, THEISS feeders labelled and grouped
    /// under their own substation.
    pub fn foreman() -> Self {
        let labels = BTreeMap::from([
            ("1203".to_string(), "THEISS 3".to_string()),
            ("1209".to_string(), "THEISS 9".to_string()),
        ]);
        let overrides = BTreeMap::from([
            ("1203".to_string(), "THEISS".to_string()),
            ("1209".to_string(), "THEISS".to_string()),
        ]);
        Self {
            report: ReportConfig {
                show_blocks: false,
                ..ReportConfig::default()
            },
            labels,
            substations: SubstationConfig {
                overrides,
                names: BTreeMap::new(),
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["analysis", "foreman"];

    /// Preset used when neither a config file nor a preset is given.
    pub const DEFAULT_PRESET: &str = "foreman";

    /// Loads a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "analysis" => Ok(Self::analysis()),
            "foreman" => Ok(Self::foreman()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (key, label) in &self.labels {
            if let Err(e) = parse_feeder("labels", key) {
                errors.push(e);
            }
            if label.trim().is_empty() {
                errors.push(ConfigError::new(format!("labels.{key}"), "label must not be empty"));
            }
        }

        let subs = &self.substations;
        for (key, target) in &subs.overrides {
            if let Err(e) = parse_feeder("substations.overrides", key) {
                errors.push(e);
            }
            match SubstationKey::parse(target) {
                None => errors.push(ConfigError::new(
                    format!("substations.overrides.{key}"),
                    "substation key must not be empty",
                )),
                Some(SubstationKey::Numbered(_)) => errors.push(ConfigError::new(
                    format!("substations.overrides.{key}"),
                    format!("\"{target}\" collides with a numbered substation; use a name"),
                )),
                Some(SubstationKey::Named(_)) => {}
            }
        }

        for (key, name) in &subs.names {
            let normalized = normalize_key(key);
            if !subs
                .overrides
                .values()
                .any(|target| normalize_key(target) == normalized)
            {
                errors.push(ConfigError::new(
                    format!("substations.names.{key}"),
                    "no feeder override maps to this substation",
                ));
            }
            if name.trim().is_empty() {
                errors.push(ConfigError::new(
                    format!("substations.names.{key}"),
                    "name must not be empty",
                ));
            }
        }

        errors
    }

    /// Builds the label and substation rules from the override tables.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` for a table key that is not a feeder
    /// number. Call [`AnalysisConfig::validate`] first to see all problems.
    pub fn classifier(&self) -> Result<Classifier, ConfigError> {
        let mut rules = Classifier::new();
        for (key, label) in &self.labels {
            rules = rules.with_label(parse_feeder("labels", key)?, label);
        }
        for (key, target) in &self.substations.overrides {
            rules = rules.with_substation_override(parse_feeder("substations.overrides", key)?, target);
        }
        for (key, name) in &self.substations.names {
            rules = rules.with_substation_name(key, name);
        }
        Ok(rules)
    }
}
