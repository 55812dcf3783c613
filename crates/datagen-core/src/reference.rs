//! Reference tables backing the `fuzz_*` patterns.

/// Error type for reference-table sampling.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceTableError {
    /// Table has no data rows to sample from
    #[error("reference table '{0}' has no rows")]
    Empty(String),

    /// Output column position has no counterpart in the table
    #[error("reference table '{table}' has {columns} columns, column index {index} is out of range")]
    ColumnOutOfRange {
        table: String,
        columns: usize,
        index: usize,
    },
}

/// An in-memory CSV corpus sampled by the `fuzz_<name>` pattern.
///
/// Loaded once before generation begins and read-only for the run. The
/// header row is kept as column names for diagnostics; it is never sampled.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ReferenceTable {
    /// Create a reference table from already-parsed CSV content.
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Table name (the source file's stem).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names from the header row.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sample the cell for output column `col` using `seed mod num_rows`.
    ///
    /// The correspondence is positional, declared by the order of `--col`
    /// flags: output column `col` samples this table's column `col`, with no
    /// name-based inference. Row selection wraps modulo the corpus size, so
    /// runs longer than the corpus reuse its rows cyclically.
    pub fn sample(&self, col: usize, seed: u64) -> Result<&str, ReferenceTableError> {
        if self.rows.is_empty() {
            return Err(ReferenceTableError::Empty(self.name.clone()));
        }
        if col >= self.columns.len() {
            return Err(ReferenceTableError::ColumnOutOfRange {
                table: self.name.clone(),
                columns: self.columns.len(),
                index: col,
            });
        }

        let row = (seed % self.rows.len() as u64) as usize;
        // Rows parsed by the loader are rectangular; a hand-built short row
        // reads as an empty cell rather than a panic.
        Ok(self.rows[row].get(col).map(String::as_str).unwrap_or(""))
    }
}
