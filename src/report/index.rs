//! Substation → feeder index built once per dataset load.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::classify::{Classifier, SubstationKey};
use super::record::LoadRecord;
use super::view::SubstationScope;

/// One entry of the substation dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstationOption {
    pub key: SubstationKey,
    pub label: String,
    pub feeders: Vec<u32>,
}

/// One entry of the feeder dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeederOption {
    pub feeder: u32,
    pub label: String,
}

/// Feeder numbers observed in the dataset, grouped by substation.
///
/// Read-only after [`SubstationIndex::build`]; rebuild it when the dataset
/// changes.
#[derive(Debug, Clone, Default)]
pub struct SubstationIndex {
    feeders: BTreeMap<SubstationKey, BTreeSet<u32>>,
}

impl SubstationIndex {
    /// Scans every record once.
    pub fn build(records: &[LoadRecord], classifier: &Classifier) -> Self {
        let mut feeders: BTreeMap<SubstationKey, BTreeSet<u32>> = BTreeMap::new();
        for r in records {
            feeders
                .entry(classifier.substation_key_for_feeder(r.feeder))
                .or_default()
                .insert(r.feeder);
        }
        tracing::debug!(substations = feeders.len(), "built substation index");
        Self { feeders }
    }

    /// Feeders of one substation, `None` when the key was never observed.
    pub fn feeders(&self, key: &SubstationKey) -> Option<&BTreeSet<u32>> {
        self.feeders.get(key)
    }

    /// Whether `feeder` belongs to the substation `key`.
    pub fn contains(&self, key: &SubstationKey, feeder: u32) -> bool {
        self.feeders.get(key).is_some_and(|set| set.contains(&feeder))
    }

    /// Observed substation keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &SubstationKey> {
        self.feeders.keys()
    }

    /// Feeders within the scope, ascending.
    pub fn feeders_in_scope(&self, scope: &SubstationScope) -> BTreeSet<u32> {
        match scope {
            SubstationScope::All => self.feeders.values().flatten().copied().collect(),
            SubstationScope::Only(key) => self.feeders(key).cloned().unwrap_or_default(),
        }
    }

    pub fn substation_options(&self, classifier: &Classifier) -> Vec<SubstationOption> {
        self.feeders
            .iter()
            .map(|(key, feeders)| SubstationOption {
                key: key.clone(),
                label: classifier.substation_label(key),
                feeders: feeders.iter().copied().collect(),
            })
            .collect()
    }

    pub fn feeder_options(
        &self,
        scope: &SubstationScope,
        classifier: &Classifier,
    ) -> Vec<FeederOption> {
        self.feeders_in_scope(scope)
            .into_iter()
            .map(|feeder| FeederOption {
                feeder,
                label: classifier.feeder_label(feeder),
            })
            .collect()
    }
}
