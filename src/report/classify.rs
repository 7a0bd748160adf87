//! Feeder labels and substation keys.
//!
//! Both lookups consult a hand-maintained override table first and fall
//! back to the arithmetic/generated form only when no override exists.

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Number of feeder ids per arithmetic substation (`101 / 100 == 1`).
const FEEDERS_PER_SUBSTATION: u32 = 100;

/// Normalizes an override key: trimmed and uppercased.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Identifies a substation.
///
/// Ordering puts numbered substations first, ascending, then named
/// override substations alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubstationKey {
    /// Derived as `feeder / 100`.
    Numbered(u32),
    /// Literal override tag, stored normalized.
    Named(String),
}

impl SubstationKey {
    /// Parses a dropdown value such as `"1"`, `"Substation 3"` or `"theiss"`.
    ///
    /// Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let key = normalize_key(raw);
        if key.is_empty() {
            return None;
        }
        let numeric = key
            .strip_prefix("SUBSTATION")
            .map(str::trim)
            .unwrap_or(&key);
        match numeric.parse::<u32>() {
            Ok(n) => Some(Self::Numbered(n)),
            Err(_) => Some(Self::Named(key)),
        }
    }
}

impl fmt::Display for SubstationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numbered(n) => write!(f, "{n}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl Serialize for SubstationKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Label and substation rules with their override tables.
///
/// # Examples
///
/// ```
/// use feeder_analysis::report::classify::{Classifier, SubstationKey};
///
/// let rules = Classifier::new()
///     .with_label(1203, "THEISS 3")
///     .with_substation_override(1203, "theiss");
///
/// assert_eq!(rules.feeder_label(101), "Feeder 101");
/// assert_eq!(rules.feeder_label(1203), "THEISS 3");
/// assert_eq!(rules.substation_key_for_feeder(142), SubstationKey::Numbered(1));
/// assert_eq!(
///     rules.substation_key_for_feeder(1203),
///     SubstationKey::Named("THEISS".to_string())
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    label_overrides: HashMap<u32, String>,
    substation_overrides: HashMap<u32, String>,
    substation_names: HashMap<String, String>,
}

impl Classifier {
    /// Rules with empty override tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a feeder display-name override.
    pub fn with_label(mut self, feeder: u32, label: &str) -> Self {
        self.label_overrides.insert(feeder, label.trim().to_string());
        self
    }

    /// Assigns a feeder to a named substation.
    pub fn with_substation_override(mut self, feeder: u32, key: &str) -> Self {
        self.substation_overrides.insert(feeder, normalize_key(key));
        self
    }

    /// Sets the display name of a named substation.
    pub fn with_substation_name(mut self, key: &str, name: &str) -> Self {
        self.substation_names
            .insert(normalize_key(key), name.trim().to_string());
        self
    }

    /// Display label for a feeder: the override when present, else `"Feeder {n}"`.
    pub fn feeder_label(&self, feeder: u32) -> String {
        match self.label_overrides.get(&feeder) {
            Some(label) => label.clone(),
            None => format!("Feeder {feeder}"),
        }
    }

    /// Substation a feeder belongs to.
    ///
    /// Override first; otherwise integer floor of `feeder / 100`, so 100 and
    /// 199 both land on substation 1 and feeders below 100 on substation 0.
    pub fn substation_key_for_feeder(&self, feeder: u32) -> SubstationKey {
        match self.substation_overrides.get(&feeder) {
            Some(key) => SubstationKey::Named(key.clone()),
            None => SubstationKey::Numbered(feeder / FEEDERS_PER_SUBSTATION),
        }
    }

    /// Display label for a substation key.
    pub fn substation_label(&self, key: &SubstationKey) -> String {
        match key {
            SubstationKey::Numbered(n) => format!("Substation {n}"),
            SubstationKey::Named(name) => self
                .substation_names
                .get(name)
                .cloned()
                .unwrap_or_else(|| name.clone()),
        }
    }

    /// Resolves a dropdown value to a substation key.
    ///
    /// A configured display name (case-insensitive) resolves to its key;
    /// anything else goes through [`SubstationKey::parse`].
    pub fn resolve_substation(&self, raw: &str) -> Option<SubstationKey> {
        let wanted = normalize_key(raw);
        self.substation_names
            .iter()
            .find(|(_, name)| normalize_key(name) == wanted)
            .map(|(key, _)| SubstationKey::Named(key.clone()))
            .or_else(|| SubstationKey::parse(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theiss_rules() -> Classifier {
        Classifier::new()
            .with_label(1203, "THEISS 3")
            .with_label(1209, "THEISS 9")
            .with_substation_override(1203, "THEISS")
            .with_substation_override(1209, "THEISS")
    }

    #[test]
    fn arithmetic_substation_boundaries() {
        let rules = Classifier::new();
        assert_eq!(rules.substation_key_for_feeder(100), SubstationKey::Numbered(1));
        assert_eq!(rules.substation_key_for_feeder(199), SubstationKey::Numbered(1));
        assert_eq!(rules.substation_key_for_feeder(200), SubstationKey::Numbered(2));
        assert_eq!(rules.substation_key_for_feeder(99), SubstationKey::Numbered(0));
        assert_eq!(rules.substation_key_for_feeder(0), SubstationKey::Numbered(0));
    }

    #[test]
    fn arithmetic_fallback_matches_floor_division() {
        let rules = theiss_rules();
        for n in [1_u32, 101, 142, 250, 301, 323, 999, 1200, 1210, 4711] {
            assert_eq!(rules.substation_key_for_feeder(n), SubstationKey::Numbered(n / 100));
        }
    }

    #[test]
    fn override_wins_over_arithmetic_and_generated_forms() {
        let rules = theiss_rules();
        assert_eq!(
            rules.substation_key_for_feeder(1203),
            SubstationKey::Named("THEISS".to_string())
        );
        assert_eq!(rules.feeder_label(1203), "THEISS 3");
        assert_eq!(rules.feeder_label(1209), "THEISS 9");
        assert_eq!(rules.feeder_label(1204), "Feeder 1204");
    }

    #[test]
    fn substation_labels() {
        let rules = theiss_rules().with_substation_name("theiss", "Theiss Road");
        assert_eq!(rules.substation_label(&SubstationKey::Numbered(3)), "Substation 3");
        assert_eq!(
            rules.substation_label(&SubstationKey::Named("THEISS".to_string())),
            "Theiss Road"
        );
        assert_eq!(
            Classifier::new().substation_label(&SubstationKey::Named("NORTH".to_string())),
            "NORTH"
        );
    }

    #[test]
    fn parse_accepts_numbers_labels_and_names() {
        assert_eq!(SubstationKey::parse("1"), Some(SubstationKey::Numbered(1)));
        assert_eq!(SubstationKey::parse(" Substation 3 "), Some(SubstationKey::Numbered(3)));
        assert_eq!(
            SubstationKey::parse("theiss"),
            Some(SubstationKey::Named("THEISS".to_string()))
        );
        assert_eq!(SubstationKey::parse("   "), None);
    }

    #[test]
    fn display_name_resolves_to_its_key() {
        let rules = theiss_rules().with_substation_name("THEISS", "Theiss Road");
        let theiss = Some(SubstationKey::Named("THEISS".to_string()));
        assert_eq!(rules.resolve_substation("Theiss Road"), theiss);
        assert_eq!(rules.resolve_substation(" theiss road "), theiss);
        assert_eq!(rules.resolve_substation("theiss"), theiss);
        assert_eq!(rules.resolve_substation("Substation 3"), Some(SubstationKey::Numbered(3)));
        assert_eq!(rules.resolve_substation(""), None);
    }

    #[test]
    fn numbered_keys_sort_before_named_keys() {
        let mut keys = vec![
            SubstationKey::Named("THEISS".to_string()),
            SubstationKey::Numbered(12),
            SubstationKey::Numbered(3),
            SubstationKey::Named("ALPHA".to_string()),
        ];
        keys.sort();
        let shown: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(shown, ["3", "12", "ALPHA", "THEISS"]);
    }
}
