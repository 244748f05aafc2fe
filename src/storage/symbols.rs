// @file: src/storage/symbols.rs
// @description: Reads the symbol list (header row skipped, first column used).
// @author: LAS.

use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use crate::core::error::StorageError;

pub fn read_symbols(path: &Path) -> Result<Vec<String>, StorageError> {
    let file = File::open(path)?;
    read_symbols_from(file)
}

pub fn read_symbols_from<R: Read>(reader: R) -> Result<Vec<String>, StorageError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut symbols: Vec<String> = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line: u64 = record.position().map(|p| p.line()).unwrap_or_default();

        match record.get(0) {
            Some(symbol) if !symbol.is_empty() => symbols.push(symbol.to_string()),
            _ => return Err(StorageError::MissingSymbol { line }),
        }
    }

    Ok(symbols)
}
