//! CSV export for rendered feeder reports.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::report::aggregate::Aggregate;
use crate::report::grouping::FeederReport;

/// Column header for report CSV export.
const HEADER: &str = "row_kind,feeder,label,block,phase1_kva,phase2_kva,phase3_kva,\
                       total_kva,transformers,customers";

fn row(kind: &str, feeder: Option<u32>, label: &str, block: &str, a: &Aggregate) -> [String; 10] {
    [
        kind.to_string(),
        feeder.map(|f| f.to_string()).unwrap_or_default(),
        label.to_string(),
        block.to_string(),
        format!("{:.2}", a.phase1_kva_total),
        format!("{:.2}", a.phase2_kva_total),
        format!("{:.2}", a.phase3_kva_total),
        format!("{:.2}", a.combined_kva_total),
        a.transformer_count.to_string(),
        format!("{:.0}", a.customer_total),
    ]
}

/// Exports a report to a CSV file at the given path.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created and [`Error::Csv`]
/// if writing fails.
pub fn export_csv(report: &FeederReport, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(report, io::BufWriter::new(file))?;
    Ok(())
}

/// Writes a report as CSV to any writer.
///
/// One row per feeder, then its blocks, then one `grand_total` row.
/// Produces identical output for identical reports.
///
/// # Errors
///
/// Returns a `csv::Error` if writing fails.
pub fn write_csv(report: &FeederReport, writer: impl Write) -> std::result::Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for group in &report.groups {
        wtr.write_record(&row("feeder", Some(group.feeder), &group.label, "", &group.totals))?;
        for block in &group.blocks {
            wtr.write_record(&row(
                "block",
                Some(group.feeder),
                &group.label,
                &block.block,
                &block.totals,
            ))?;
        }
    }
    let total = &report.grand_total;
    wtr.write_record(&row("grand_total", None, &total.label, "", &total.totals))?;

    wtr.flush()?;
    Ok(())
}
