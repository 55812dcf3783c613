//! Pattern lookup by name, with explicit failure on a miss.

use crate::builtin::{EU_COUNTRIES, MORE_COUNTRIES, NULL_COUNTRIES};
use datagen_core::{ReferenceTable, ReferenceTableError};
use std::collections::HashMap;
use std::sync::Arc;

/// Error type for pattern resolution and evaluation.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// Column references a pattern name nobody registered
    #[error("unknown pattern: {0}")]
    Unknown(String),

    /// Reference-table sampling failed
    #[error("reference table error: {0}")]
    Reference(#[from] ReferenceTableError),
}

/// A named, pure value-producing capability.
///
/// The closed set of things a cell can be filled with. Each variant maps
/// `(row, col, seed)` to a string with no hidden state, so identical inputs
/// always produce the identical cell.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// The 1-based row number as a decimal string; ignores seed and column.
    Index,

    /// One entry of a fixed candidate list, selected by `seed mod len`.
    Choice(&'static [&'static str]),

    /// A cell sampled from a loaded reference table at the output column's
    /// position.
    Fuzz(Arc<ReferenceTable>),
}

impl Pattern {
    /// Produce the cell value for `(row, col, seed)`.
    pub fn cell(&self, row: u64, col: usize, seed: u64) -> Result<String, PatternError> {
        match self {
            Pattern::Index => Ok((row + 1).to_string()),

            Pattern::Choice(values) => {
                if values.is_empty() {
                    return Ok(String::new());
                }
                let idx = (seed % values.len() as u64) as usize;
                Ok(values[idx].to_string())
            }

            Pattern::Fuzz(table) => Ok(table.sample(col, seed)?.to_string()),
        }
    }
}

/// Registry mapping pattern names to [`Pattern`]s.
///
/// Built once before any row is generated (built-ins plus one `fuzz_<name>`
/// entry per loaded reference table) and immutable thereafter.
pub struct PatternRegistry {
    patterns: HashMap<String, Pattern>,
}

impl PatternRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            patterns: HashMap::new(),
        }
    }

    /// Create a registry holding the four built-in patterns.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("index", Pattern::Index);
        registry.register("eu_countries", Pattern::Choice(&EU_COUNTRIES));
        registry.register("more_countries", Pattern::Choice(&MORE_COUNTRIES));
        registry.register("null_countries", Pattern::Choice(&NULL_COUNTRIES));
        registry
    }

    /// Insert a pattern, replacing any existing entry under the same name.
    pub fn register(&mut self, name: impl Into<String>, pattern: Pattern) {
        self.patterns.insert(name.into(), pattern);
    }

    /// Register one `fuzz_<name>` pattern per reference table.
    pub fn register_reference_tables<I>(&mut self, tables: I)
    where
        I: IntoIterator<Item = ReferenceTable>,
    {
        for table in tables {
            let name = format!("fuzz_{}", table.name());
            self.register(name, Pattern::Fuzz(Arc::new(table)));
        }
    }

    /// Look up a pattern by name.
    pub fn resolve(&self, name: &str) -> Result<&Pattern, PatternError> {
        self.patterns
            .get(name)
            .ok_or_else(|| PatternError::Unknown(name.to_string()))
    }

    /// Number of registered patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Registered pattern names, sorted for stable output.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.patterns.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}
