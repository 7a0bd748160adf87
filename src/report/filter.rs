//! Record selection for the displayed rows and for the bottom total.
//!
//! The two selections differ on purpose: the displayed rows honour every
//! filter, while the bottom total only honours the substation scope.

use std::collections::HashMap;

use super::classify::Classifier;
use super::index::SubstationIndex;
use super::record::LoadRecord;
use super::view::{FeederScope, SubstationScope, ViewState};

fn in_substation(record: &LoadRecord, scope: &SubstationScope, index: &SubstationIndex) -> bool {
    match scope {
        SubstationScope::All => true,
        SubstationScope::Only(key) => index.contains(key, record.feeder),
    }
}

/// Records to display for the current view.
///
/// Applies, in order: substation scope, feeder scope, minimum combined kVA
/// (ignored unless finite) and the free-text query. The query is matched case-insensitively
/// against the feeder's display label, so an override label replaces the
/// generated `"Feeder {n}"` text entirely.
pub fn filter_for_display<'a>(
    records: &'a [LoadRecord],
    view: &ViewState,
    index: &SubstationIndex,
    classifier: &Classifier,
) -> Vec<&'a LoadRecord> {
    let query = view.normalized_query();
    // a non-finite threshold would hide every row
    let min_kva = view.min_kva.filter(|m| m.is_finite());
    let mut label_matches: HashMap<u32, bool> = HashMap::new();

    records
        .iter()
        .filter(|r| in_substation(r, &view.substation, index))
        .filter(|r| match view.feeder {
            FeederScope::All => true,
            FeederScope::Only(feeder) => r.feeder == feeder,
        })
        .filter(|r| min_kva.is_none_or(|min| r.combined_kva() >= min))
        .filter(|r| match &query {
            None => true,
            Some(q) => *label_matches.entry(r.feeder).or_insert_with(|| {
                classifier.feeder_label(r.feeder).to_lowercase().contains(q.as_str())
            }),
        })
        .collect()
}

/// Records covered by the bottom total.
///
/// Only the substation scope applies; feeder, query and kVA threshold are
/// ignored.
pub fn records_for_total_scope<'a>(
    records: &'a [LoadRecord],
    view: &ViewState,
    index: &SubstationIndex,
) -> Vec<&'a LoadRecord> {
    records
        .iter()
        .filter(|r| in_substation(r, &view.substation, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::classify::SubstationKey;

    fn rules() -> Classifier {
        Classifier::new()
            .with_label(1203, "THEISS 3")
            .with_substation_override(1203, "THEISS")
    }

    fn dataset() -> Vec<LoadRecord> {
        vec![
            LoadRecord::new(101).with_kva(10.0, 0.0, 0.0),
            LoadRecord::new(104).with_kva(50.0, 0.0, 0.0),
            LoadRecord::new(301).with_kva(25.0, 0.0, 0.0),
            LoadRecord::new(1203).with_kva(15.0, 0.0, 0.0),
            LoadRecord::new(1204).with_kva(5.0, 0.0, 0.0),
        ]
    }

    fn feeders(records: &[&LoadRecord]) -> Vec<u32> {
        records.iter().map(|r| r.feeder).collect()
    }

    fn run(view: &ViewState) -> Vec<u32> {
        let data = dataset();
        let index = SubstationIndex::build(&data, &rules());
        feeders(&filter_for_display(&data, view, &index, &rules()))
    }

    #[test]
    fn default_view_keeps_everything_in_order() {
        assert_eq!(run(&ViewState::default()), [101, 104, 301, 1203, 1204]);
    }

    #[test]
    fn substation_scope_uses_index() {
        let view = ViewState::default()
            .with_substation(SubstationScope::Only(SubstationKey::Numbered(1)));
        assert_eq!(run(&view), [101, 104]);

        let view = ViewState::default()
            .with_substation(SubstationScope::Only(SubstationKey::Numbered(12)));
        assert_eq!(run(&view), [1204]);

        let view = ViewState::default()
            .with_substation(SubstationScope::Only(SubstationKey::Named("THEISS".into())));
        assert_eq!(run(&view), [1203]);
    }

    #[test]
    fn feeder_scope_keeps_exact_feeder() {
        let view = ViewState::default().with_feeder(FeederScope::Only(104));
        assert_eq!(run(&view), [104]);
    }

    #[test]
    fn feeder_outside_selected_substation_yields_nothing() {
        let view = ViewState::default()
            .with_substation(SubstationScope::Only(SubstationKey::Numbered(3)))
            .with_feeder(FeederScope::Only(101));
        assert!(run(&view).is_empty());
    }

    #[test]
    fn min_kva_threshold_is_inclusive() {
        let view = ViewState::default().with_min_kva(Some(15.0));
        assert_eq!(run(&view), [104, 301, 1203]);
    }

    #[test]
    fn non_finite_threshold_is_ignored() {
        for min in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let view = ViewState::default().with_min_kva(Some(min));
            assert_eq!(run(&view), [101, 104, 301, 1203, 1204]);
        }
    }

    #[test]
    fn query_matches_override_label() {
        let view = ViewState::default().with_query("theiss");
        assert_eq!(run(&view), [1203]);
    }

    #[test]
    fn query_does_not_see_number_behind_override_label() {
        let view = ViewState::default().with_query("1203");
        assert!(run(&view).is_empty());

        // generated labels still contain the number
        let view = ViewState::default().with_query("1204");
        assert_eq!(run(&view), [1204]);
    }

    #[test]
    fn query_is_trimmed_and_case_insensitive() {
        let view = ViewState::default().with_query("  FEEDER 10 ");
        assert_eq!(run(&view), [101, 104]);
    }

    #[test]
    fn total_scope_ignores_feeder_query_and_threshold() {
        let data = dataset();
        let index = SubstationIndex::build(&data, &rules());
        let view = ViewState::default()
            .with_substation(SubstationScope::Only(SubstationKey::Numbered(1)))
            .with_feeder(FeederScope::Only(101))
            .with_query("101")
            .with_min_kva(Some(1000.0));
        assert_eq!(feeders(&records_for_total_scope(&data, &view, &index)), [101, 104]);
        assert_eq!(
            feeders(&records_for_total_scope(&data, &ViewState::default(), &index)),
            [101, 104, 301, 1203, 1204]
        );
    }

    #[test]
    fn filtering_does_not_touch_input() {
        let data = dataset();
        let before = data.clone();
        let index = SubstationIndex::build(&data, &rules());
        let view = ViewState::default().with_query("theiss");
        let _ = filter_for_display(&data, &view, &index, &rules());
        assert_eq!(data, before);
    }
}
