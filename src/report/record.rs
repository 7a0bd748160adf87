//! Load records and the numeric normalizer applied to every raw field.

use serde::Serialize;
use serde_json::{Map, Value};

/// Converts any raw field value into a finite number.
///
/// Numbers and numeric strings yield their value when finite. Everything
/// else (null, missing, booleans, arrays, non-numeric text) yields `0.0`.
/// A blank field therefore contributes nothing to totals while the row
/// still counts as a transformer.
///
/// # Examples
///
/// ```
/// use feeder_analysis::report::record::normalize_numeric;
/// use serde_json::json;
///
/// assert_eq!(normalize_numeric(&json!(12.5)), 12.5);
/// assert_eq!(normalize_numeric(&json!(" 7 ")), 7.0);
/// assert_eq!(normalize_numeric(&json!(null)), 0.0);
/// assert_eq!(normalize_numeric(&json!("n/a")), 0.0);
/// ```
pub fn normalize_numeric(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.map_or(0.0, finite_or_zero)
}

/// Maps `NaN` and infinities to zero.
pub fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Extracts a feeder number from a raw value.
///
/// Accepts non-negative integers, integral floats (`101.0`) and numeric
/// strings. Returns `None` when no feeder number can be read.
pub fn feeder_number(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(u) => u32::try_from(u).ok(),
            None => n.as_f64().and_then(integral_u32),
        },
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral_u32))
        }
        _ => None,
    }
}

fn integral_u32(v: f64) -> Option<u32> {
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) {
        Some(v as u32)
    } else {
        None
    }
}

/// Accepted source names per canonical field, in lookup order.
const FEEDER_KEYS: &[&str] = &["feeder", "feeder_number", "feederNumber"];
const BLOCK_KEYS: &[&str] = &["block"];
const PHASE1_KVA_KEYS: &[&str] = &["phase1_kva", "phase1Kva"];
const PHASE2_KVA_KEYS: &[&str] = &["phase2_kva", "phase2Kva"];
const PHASE3_KVA_KEYS: &[&str] = &["phase3_kva", "phase3Kva"];
const PHASE1_CUST_KEYS: &[&str] = &["phase1_cust", "phase1Cust"];
const PHASE2_CUST_KEYS: &[&str] = &["phase2_cust", "phase2Cust"];
const PHASE3_CUST_KEYS: &[&str] = &["phase3_cust", "phase3Cust"];
const THREE_PHASE_CUST_KEYS: &[&str] = &["cust_3ph", "three_phase_cust", "threePhaseCust"];

/// First non-null value among `keys`, or `Null` when none is present.
fn pick(row: &Map<String, Value>, keys: &[&str]) -> Value {
    keys.iter()
        .filter_map(|k| row.get(*k))
        .find(|v| !v.is_null())
        .cloned()
        .unwrap_or(Value::Null)
}

/// A dataset row mapped onto canonical field names, before normalization.
///
/// Accepts the snake_case names of the exported table and the camelCase
/// names used by other exports. When a row carries the same field under
/// several names the first non-null one in lookup order wins. Unknown
/// fields are ignored.
#[derive(Debug, Clone, Default)]
pub struct RawLoadRecord {
    pub feeder: Value,
    pub block: Value,
    pub phase1_kva: Value,
    pub phase2_kva: Value,
    pub phase3_kva: Value,
    pub phase1_cust: Value,
    pub phase2_cust: Value,
    pub phase3_cust: Value,
    pub cust_3ph: Value,
}

impl RawLoadRecord {
    /// Maps one JSON object row. Never fails; absent fields become `Null`.
    pub fn from_row(row: &Map<String, Value>) -> Self {
        Self {
            feeder: pick(row, FEEDER_KEYS),
            block: pick(row, BLOCK_KEYS),
            phase1_kva: pick(row, PHASE1_KVA_KEYS),
            phase2_kva: pick(row, PHASE2_KVA_KEYS),
            phase3_kva: pick(row, PHASE3_KVA_KEYS),
            phase1_cust: pick(row, PHASE1_CUST_KEYS),
            phase2_cust: pick(row, PHASE2_CUST_KEYS),
            phase3_cust: pick(row, PHASE3_CUST_KEYS),
            cust_3ph: pick(row, THREE_PHASE_CUST_KEYS),
        }
    }
}

/// One transformer-feeder assignment with clean numeric fields.
///
/// Built once at load time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LoadRecord {
    /// Feeder identifier.
    pub feeder: u32,
    /// Optional grouping key within the feeder (trimmed, never empty).
    pub block: Option<String>,
    pub phase1_kva: f64,
    pub phase2_kva: f64,
    pub phase3_kva: f64,
    pub phase1_cust: f64,
    pub phase2_cust: f64,
    pub phase3_cust: f64,
    /// Customers served at three-phase.
    pub three_phase_cust: f64,
}

impl LoadRecord {
    /// Creates an all-zero record on the given feeder.
    pub fn new(feeder: u32) -> Self {
        Self {
            feeder,
            ..Self::default()
        }
    }

    /// Sets the block; blank values clear it.
    pub fn with_block(mut self, block: &str) -> Self {
        self.block = clean_block(block);
        self
    }

    /// Sets the three phase kVA values.
    pub fn with_kva(mut self, phase1: f64, phase2: f64, phase3: f64) -> Self {
        self.phase1_kva = phase1;
        self.phase2_kva = phase2;
        self.phase3_kva = phase3;
        self
    }

    /// Sets the four customer counts.
    pub fn with_customers(mut self, phase1: f64, phase2: f64, phase3: f64, three_phase: f64) -> Self {
        self.phase1_cust = phase1;
        self.phase2_cust = phase2;
        self.phase3_cust = phase3;
        self.three_phase_cust = three_phase;
        self
    }

    /// Normalizes a raw dataset row.
    ///
    /// A row without a usable feeder number is kept on feeder `0`.
    pub fn from_raw(raw: &RawLoadRecord) -> Self {
        let feeder = feeder_number(&raw.feeder).unwrap_or_else(|| {
            tracing::warn!(value = %raw.feeder, "load record has no usable feeder number, using 0");
            0
        });
        let block = match &raw.block {
            Value::String(s) => clean_block(s),
            Value::Number(n) => clean_block(&n.to_string()),
            _ => None,
        };
        Self {
            feeder,
            block,
            phase1_kva: normalize_numeric(&raw.phase1_kva),
            phase2_kva: normalize_numeric(&raw.phase2_kva),
            phase3_kva: normalize_numeric(&raw.phase3_kva),
            phase1_cust: normalize_numeric(&raw.phase1_cust),
            phase2_cust: normalize_numeric(&raw.phase2_cust),
            phase3_cust: normalize_numeric(&raw.phase3_cust),
            three_phase_cust: normalize_numeric(&raw.cust_3ph),
        }
    }

    /// Per-phase kVA, each passed through [`finite_or_zero`].
    pub fn phase_kva(&self) -> [f64; 3] {
        [
            finite_or_zero(self.phase1_kva),
            finite_or_zero(self.phase2_kva),
            finite_or_zero(self.phase3_kva),
        ]
    }

    /// Sum of the three phase kVA values.
    pub fn combined_kva(&self) -> f64 {
        self.phase_kva().iter().sum()
    }

    /// Sum of the four customer counts.
    pub fn customer_total(&self) -> f64 {
        [
            self.phase1_cust,
            self.phase2_cust,
            self.phase3_cust,
            self.three_phase_cust,
        ]
        .into_iter()
        .map(finite_or_zero)
        .sum()
    }

    /// Block key, if the record has a non-blank one.
    pub fn block(&self) -> Option<&str> {
        self.block.as_deref().map(str::trim).filter(|b| !b.is_empty())
    }
}

fn clean_block(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
