//! Table and column specifications.
//!
//! A [`TableSpec`] is built once from parsed CLI arguments and is immutable
//! for the rest of the run. Column order here is column order everywhere:
//! in the header row and in every generated row.

/// Seed-range multiplier for per-cell draws.
///
/// Keeps the seed domain wide enough that modulo selection over small value
/// sets (country lists and the like) still varies from row to row.
pub const SEED_RANGE_MULTIPLIER: u64 = 42;

/// Error type for table specification construction.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// `--col` values did not arrive in name/pattern pairs
    #[error("column arguments must form NAME PATTERN pairs, got {0} values")]
    UnpairedColumnArgs(usize),

    /// A table with zero columns is degenerate
    #[error("at least one column is required")]
    NoColumns,
}

/// A single output column: its header name and the pattern filling it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name as it appears in the header row
    pub name: String,

    /// Name of the registered pattern producing this column's values
    pub pattern: String,
}

impl ColumnSpec {
    /// Create a new column spec.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }

    /// Pair up a flattened `--col NAME PATTERN` argument list.
    ///
    /// clap hands repeated two-value occurrences over as one flat list, so
    /// `--col id index --col country eu_countries` arrives as four strings.
    /// An odd length means a name without a pattern.
    pub fn from_pairs(args: &[String]) -> Result<Vec<Self>, SpecError> {
        if args.len() % 2 != 0 {
            return Err(SpecError::UnpairedColumnArgs(args.len()));
        }
        Ok(args
            .chunks_exact(2)
            .map(|pair| Self::new(&pair[0], &pair[1]))
            .collect())
    }
}

/// Full description of one generated table: row count plus ordered columns.
#[derive(Debug, Clone)]
pub struct TableSpec {
    num_rows: u64,
    columns: Vec<ColumnSpec>,
}

impl TableSpec {
    /// Create a table spec.
    ///
    /// `num_rows` may be zero (the run emits the header only); an empty
    /// column list is rejected.
    pub fn new(num_rows: u64, columns: Vec<ColumnSpec>) -> Result<Self, SpecError> {
        if columns.is_empty() {
            return Err(SpecError::NoColumns);
        }
        Ok(Self { num_rows, columns })
    }

    /// Number of data rows to generate.
    pub fn num_rows(&self) -> u64 {
        self.num_rows
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Number of output columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Upper bound for per-cell seed draws:
    /// `num_rows * num_columns * SEED_RANGE_MULTIPLIER`.
    pub fn seed_bound(&self) -> u64 {
        self.num_rows
            .saturating_mul(self.columns.len() as u64)
            .saturating_mul(SEED_RANGE_MULTIPLIER)
    }
}
