//! The `batch` module is ambient tooling layered on top of the core pipeline: parsing every
//! address line in one column of a CSV file and writing the structured results back out as a
//! second CSV, in parallel. It is not part of the core `parse` contract — a caller wanting a
//! single line parsed should reach for [`crate::address::AddressParser`] directly.
use std::path::Path;

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::address::{AddressParser, AddressResult};
use crate::error::{AddressError, ParseOutcome};

/// One row of batch output: the original input line alongside its parsed components, flattened
/// for CSV serialization.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AddressResultRecord {
    pub input: String,
    pub kind: Option<String>,
    pub street_names: String,
    pub door_unit: Option<String>,
    pub door_value: Option<String>,
    pub floor: Option<String>,
}

impl AddressResultRecord {
    fn from_result(input: &str, result: AddressResult) -> Self {
        Self {
            input: input.to_string(),
            kind: result.kind.map(|k| k.to_string()),
            street_names: result.street_names.join("; "),
            door_unit: result.door_number.as_ref().and_then(|d| d.unit.clone()),
            door_value: result.door_number.map(|d| d.value),
            floor: result.floor,
        }
    }
}

/// Reads every value of `column` from the CSV at `source`, parses each as an address line in
/// parallel, and writes an [`AddressResultRecord`] per row to `output`. Each worker constructs
/// its own [`AddressParser`] (no cache is shared across the pool) — per line, the cost of
/// re-parsing is far smaller than the cost of coordinating a shared cache across threads.
pub fn parse_csv_column(source: &Path, column: &str, output: &Path) -> ParseOutcome<()> {
    let mut reader = csv::Reader::from_path(source)?;
    let headers = reader.headers()?.clone();
    let column_index = headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| AddressError::MissingColumn(column.to_string()))?;

    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record?;
        lines.push(record.get(column_index).unwrap_or_default().to_string());
    }

    let bar = ProgressBar::new(lines.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} addresses parsed")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let records: Vec<AddressResultRecord> = lines
        .par_iter()
        .progress_with(bar)
        .map(|line| {
            let mut parser = AddressParser::new();
            AddressResultRecord::from_result(line, parser.parse(line))
        })
        .collect();

    let mut writer = csv::Writer::from_path(output)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    tracing::info!(?source, ?output, "batch parse complete");
    Ok(())
}
