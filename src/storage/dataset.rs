// @file: src/storage/dataset.rs
// @description: Writes stacked feature rows for all symbols to one CSV file.
// @author: LAS.

use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::core::error::StorageError;
use crate::core::models::{FeatureRow, FEATURE_COLUMNS};

pub fn write_dataset(
    path: &Path,
    rows: &[FeatureRow],
    include_symbol: bool,
) -> Result<(), StorageError> {
    let file = File::create(path)?;
    write_dataset_to(file, rows, include_symbol)
}

pub fn write_dataset_to<W: Write>(
    sink: W,
    rows: &[FeatureRow],
    include_symbol: bool,
) -> Result<(), StorageError> {
    let mut writer = Writer::from_writer(sink);

    // #1. Header
    let mut header: Vec<&str> = Vec::with_capacity(FEATURE_COLUMNS.len() + 1);
    if include_symbol {
        header.push("symbol");
    }
    header.extend(FEATURE_COLUMNS);
    writer.write_record(&header)?;

    // #2. Rows
    for row in rows {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        if include_symbol {
            record.push(row.symbol.clone());
        }
        record.extend(row.to_record());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
