//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use feeder_analysis::config::AnalysisConfig;
use feeder_analysis::report::{Classifier, LoadRecord, ReportEngine};

/// Three-record dataset: two rows on feeder 101 (one in block "A") and one
/// all-null row on feeder 301.
pub const EXAMPLE_JSON: &str = r#"[
    {"feeder": 101, "phase1_kva": 10, "phase2_kva": 5, "phase3_kva": 0, "cust_3ph": 2},
    {"feeder": 101, "block": "A", "phase1_kva": 3, "phase1_cust": 1},
    {"feeder": 301, "block": null, "phase1_kva": null, "phase2_kva": null,
     "phase3_kva": null, "phase1_cust": null, "phase2_cust": null,
     "phase3_cust": null, "cust_3ph": null}
]"#;

/// Label and substation rules of the foreman preset (THEISS 1203/1209).
pub fn foreman_rules() -> Classifier {
    AnalysisConfig::foreman()
        .classifier()
        .expect("foreman preset should build")
}

/// Substation 1 (101, 104), substation 3 (301, 302), substation 12 (1204)
/// and THEISS (1203, 1209).
pub fn district_records() -> Vec<LoadRecord> {
    vec![
        LoadRecord::new(104).with_kva(50.0, 0.0, 0.0).with_customers(4.0, 0.0, 0.0, 0.0),
        LoadRecord::new(101).with_kva(10.0, 5.0, 0.0).with_customers(0.0, 0.0, 0.0, 2.0),
        LoadRecord::new(301).with_kva(25.0, 25.0, 25.0).with_customers(3.0, 3.0, 3.0, 0.0),
        LoadRecord::new(101).with_block("A").with_kva(3.0, 0.0, 0.0).with_customers(1.0, 0.0, 0.0, 0.0),
        LoadRecord::new(1203).with_kva(15.0, 0.0, 0.0).with_customers(2.0, 0.0, 0.0, 0.0),
        LoadRecord::new(302).with_kva(0.0, 37.5, 0.0).with_customers(0.0, 5.0, 0.0, 0.0),
        LoadRecord::new(1209).with_kva(0.0, 0.0, 10.0).with_customers(0.0, 0.0, 1.0, 0.0),
        LoadRecord::new(1204).with_kva(5.0, 0.0, 0.0).with_customers(1.0, 0.0, 0.0, 0.0),
    ]
}

/// Engine over [`district_records`] with the foreman rules.
pub fn district_engine() -> ReportEngine {
    ReportEngine::new(district_records(), foreman_rules())
}

/// Writes `content` to a per-process file under the temp directory.
pub fn write_temp(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "feeder-analysis-{}-{name}",
        std::process::id()
    ));
    fs::write(&path, content).expect("temp file should be writable");
    path
}
