//! Loading reference tables from a data directory.

use crate::error::FuzzError;
use csv::ReaderBuilder;
use datagen_core::ReferenceTable;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Load every `.csv` file under `dir` as a reference table.
///
/// Each table is read fully into memory and named after its file stem, so
/// `customer.csv` becomes the table behind the `fuzz_customer` pattern. The
/// first record of each file is treated as the header row. Files are loaded
/// in sorted name order and non-CSV entries are skipped.
///
/// A missing directory is not an error: generation without fuzz patterns is
/// still useful, so this logs a warning and returns no tables.
pub fn load_reference_tables(dir: &Path) -> Result<Vec<ReferenceTable>, FuzzError> {
    if !dir.is_dir() {
        warn!(
            "reference data directory {} not found, no fuzz patterns will be available",
            dir.display()
        );
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    paths.sort();

    let mut tables = Vec::with_capacity(paths.len());
    for path in &paths {
        let table = load_table(path)?;
        if table.is_empty() {
            warn!(
                "reference table '{}' has a header but no rows; sampling it will fail",
                table.name()
            );
        }
        debug!(
            "loaded reference table '{}' ({} columns, {} rows)",
            table.name(),
            table.columns().len(),
            table.num_rows()
        );
        tables.push(table);
    }
    Ok(tables)
}

fn load_table(path: &Path) -> Result<ReferenceTable, FuzzError> {
    let csv_err = |source| FuzzError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("table")
        .to_string();

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(csv_err)?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(ReferenceTable::new(name, columns, rows))
}
