//! Feeder analysis core: normalization, classification, filtering and grouping.

/// Summary totals over record subsets.
pub mod aggregate;
/// Feeder labels and substation keys.
pub mod classify;
pub mod engine;
/// Display and total-scope record selection.
pub mod filter;
/// Feeder/block grouping and report descriptors.
pub mod grouping;
pub mod index;
/// Load records and numeric normalization.
pub mod record;
pub mod view;

pub use aggregate::{Aggregate, aggregate};
pub use classify::{Classifier, SubstationKey};
pub use engine::ReportEngine;
pub use grouping::{BlockGroup, FeederGroup, FeederReport, GrandTotal};
pub use index::SubstationIndex;
pub use record::LoadRecord;
pub use view::{FeederScope, SubstationScope, ViewState};
