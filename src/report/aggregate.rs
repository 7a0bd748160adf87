//! Summary totals over a subset of load records.

use std::fmt;

use serde::Serialize;

use super::record::LoadRecord;

/// Totals for one report scope (block, feeder, substation or system).
///
/// Always computed fresh from records, never updated in place.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Aggregate {
    /// Number of records (rows), not a sum of any field.
    pub transformer_count: usize,
    /// Sum of all customer counts.
    pub customer_total: f64,
    pub phase1_kva_total: f64,
    pub phase2_kva_total: f64,
    pub phase3_kva_total: f64,
    /// Always `phase1 + phase2 + phase3`.
    pub combined_kva_total: f64,
}

impl Aggregate {
    /// Reduces a record subset into totals.
    ///
    /// An empty subset yields all zeros.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a LoadRecord>,
    {
        let mut transformer_count = 0_usize;
        let mut customer_total = 0.0_f64;
        let mut phase = [0.0_f64; 3];

        for r in records {
            transformer_count += 1;
            customer_total += r.customer_total();
            for (total, kva) in phase.iter_mut().zip(r.phase_kva()) {
                *total += kva;
            }
        }

        Self {
            transformer_count,
            customer_total,
            phase1_kva_total: phase[0],
            phase2_kva_total: phase[1],
            phase3_kva_total: phase[2],
            combined_kva_total: phase[0] + phase[1] + phase[2],
        }
    }
}

/// Shorthand for [`Aggregate::from_records`].
pub fn aggregate<'a, I>(records: I) -> Aggregate
where
    I: IntoIterator<Item = &'a LoadRecord>,
{
    Aggregate::from_records(records)
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>10.2} {:>10.2} {:>10.2} {:>11.2} {:>6} {:>6.0}",
            self.phase1_kva_total,
            self.phase2_kva_total,
            self.phase3_kva_total,
            self.combined_kva_total,
            self.transformer_count,
            self.customer_total,
        )
    }
}
