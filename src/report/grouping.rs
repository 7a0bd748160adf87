//! Feeder/block grouping and the report handed to renderers.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::aggregate::Aggregate;
use super::classify::Classifier;
use super::record::LoadRecord;
use super::view::SubstationScope;

/// Label of the bottom total when no substation is selected.
pub const SYSTEM_TOTAL_LABEL: &str = "System Total";

/// Totals for one block inside a feeder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockGroup {
    pub block: String,
    pub totals: Aggregate,
}

/// One feeder section of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeederGroup {
    pub feeder: u32,
    pub label: String,
    /// Computed from all feeder records, including those without a block.
    pub totals: Aggregate,
    /// Empty unless block detail is enabled.
    pub blocks: Vec<BlockGroup>,
}

/// The bottom total and what it covers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrandTotal {
    /// `"System Total"` or `"{substation label} Total"`.
    pub label: String,
    pub totals: Aggregate,
}

/// Everything a renderer needs for one view of the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeederReport {
    /// Feeder groups ascending by feeder number.
    pub groups: Vec<FeederGroup>,
    pub grand_total: GrandTotal,
    /// Number of displayed records.
    pub row_count: usize,
    /// Number of displayed feeder groups.
    pub feeder_count: usize,
}

/// Partitions records by feeder number, ascending.
///
/// Records keep their input order inside each feeder.
pub fn group_by_feeder<'a>(records: &[&'a LoadRecord]) -> BTreeMap<u32, Vec<&'a LoadRecord>> {
    let mut groups: BTreeMap<u32, Vec<&'a LoadRecord>> = BTreeMap::new();
    for &r in records {
        groups.entry(r.feeder).or_default().push(r);
    }
    groups
}

/// Partitions records by block, ascending by string comparison.
///
/// Records without a block are left out.
pub fn group_by_block<'a>(records: &[&'a LoadRecord]) -> BTreeMap<String, Vec<&'a LoadRecord>> {
    let mut groups: BTreeMap<String, Vec<&'a LoadRecord>> = BTreeMap::new();
    for &r in records {
        if let Some(block) = r.block() {
            groups.entry(block.to_string()).or_default().push(r);
        }
    }
    groups
}

/// Builds the report.
///
/// # Arguments
///
/// * `displayed` - Records that passed every view filter
/// * `total_scope` - Records covered by the bottom total (substation scope only)
/// * `substation` - Selected substation, decides the bottom-total label
/// * `show_blocks` - Whether feeder groups are split into blocks
/// * `classifier` - Label rules
///
/// With a substation selected the bottom total covers `total_scope`, which
/// may contain records narrowed away from `displayed` by the feeder or
/// search filters. Without one it covers exactly the displayed records.
/// Block detail never changes any total.
pub fn build_report(
    displayed: &[&LoadRecord],
    total_scope: &[&LoadRecord],
    substation: &SubstationScope,
    show_blocks: bool,
    classifier: &Classifier,
) -> FeederReport {
    let groups: Vec<FeederGroup> = group_by_feeder(displayed)
        .into_iter()
        .map(|(feeder, rows)| {
            let blocks = if show_blocks {
                group_by_block(&rows)
                    .into_iter()
                    .map(|(block, block_rows)| BlockGroup {
                        block,
                        totals: Aggregate::from_records(block_rows.iter().copied()),
                    })
                    .collect()
            } else {
                Vec::new()
            };
            FeederGroup {
                feeder,
                label: classifier.feeder_label(feeder),
                totals: Aggregate::from_records(rows.iter().copied()),
                blocks,
            }
        })
        .collect();

    let grand_total = match substation {
        SubstationScope::All => GrandTotal {
            label: SYSTEM_TOTAL_LABEL.to_string(),
            totals: Aggregate::from_records(displayed.iter().copied()),
        },
        SubstationScope::Only(key) => GrandTotal {
            label: format!("{} Total", classifier.substation_label(key)),
            totals: Aggregate::from_records(total_scope.iter().copied()),
        },
    };

    tracing::debug!(
        rows = displayed.len(),
        feeders = groups.len(),
        total_scope = grand_total.totals.transformer_count,
        "built feeder report"
    );

    FeederReport {
        feeder_count: groups.len(),
        row_count: displayed.len(),
        groups,
        grand_total,
    }
}

impl fmt::Display for FeederReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<24} {:>10} {:>10} {:>10} {:>11} {:>6} {:>6}",
            "Feeder / Block", "Phase 1", "Phase 2", "Phase 3", "Total kVA", "Xfmrs", "Cust"
        )?;
        for group in &self.groups {
            writeln!(f, "{:<24} {}", group.label, group.totals)?;
            for block in &group.blocks {
                writeln!(f, "  {:<22} {}", block.block, block.totals)?;
            }
            writeln!(f, "{:<24} {}", format!("{} Total", group.label), group.totals)?;
            writeln!(f)?;
        }
        writeln!(f, "{:<24} {}", self.grand_total.label, self.grand_total.totals)?;
        write!(
            f,
            "Rows: {}  Feeders: {}",
            self.row_count, self.feeder_count
        )
    }
}
