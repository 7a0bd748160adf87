//! Report engine owning the loaded dataset and its derived index.

use super::classify::Classifier;
use super::filter::{filter_for_display, records_for_total_scope};
use super::grouping::{FeederReport, build_report};
use super::index::{FeederOption, SubstationIndex, SubstationOption};
use super::record::LoadRecord;
use super::view::{SubstationScope, ViewState};

/// Immutable dataset plus the rules and index derived from it.
///
/// Every call to [`ReportEngine::render`] recomputes the report from
/// scratch; nothing is cached between views.
#[derive(Debug, Clone)]
pub struct ReportEngine {
    records: Vec<LoadRecord>,
    classifier: Classifier,
    index: SubstationIndex,
}

impl ReportEngine {
    /// Takes ownership of the records and builds the substation index.
    pub fn new(records: Vec<LoadRecord>, classifier: Classifier) -> Self {
        let index = SubstationIndex::build(&records, &classifier);
        Self {
            records,
            classifier,
            index,
        }
    }

    /// Renders the report for one view.
    pub fn render(&self, view: &ViewState, show_blocks: bool) -> FeederReport {
        let displayed = filter_for_display(&self.records, view, &self.index, &self.classifier);
        let total_scope = records_for_total_scope(&self.records, view, &self.index);
        build_report(
            &displayed,
            &total_scope,
            &view.substation,
            show_blocks,
            &self.classifier,
        )
    }

    pub fn substation_options(&self) -> Vec<SubstationOption> {
        self.index.substation_options(&self.classifier)
    }

    pub fn feeder_options(&self, scope: &SubstationScope) -> Vec<FeederOption> {
        self.index.feeder_options(scope, &self.classifier)
    }

    pub fn records(&self) -> &[LoadRecord] {
        &self.records
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn index(&self) -> &SubstationIndex {
        &self.index
    }
}
