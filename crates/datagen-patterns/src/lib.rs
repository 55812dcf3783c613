//! Value-pattern registry for the datagen table generator.
//!
//! A pattern is a pure value producer `(row, col, seed) -> String`:
//! identical inputs always yield the identical cell, with no hidden state
//! and no wall-clock or environment dependence. Patterns are registered
//! under unique names and looked up per cell while rows are generated.
//!
//! # Built-in patterns
//!
//! - `index` - the 1-based row number, ignoring seed and column
//! - `eu_countries` - one of 5 EU countries, selected by `seed mod 5`
//! - `more_countries` - one of 9 countries, selected by `seed mod 9`
//! - `null_countries` - the 9 countries plus an empty string (`seed mod 10`)
//! - `fuzz_<table>` - a cell sampled from a loaded reference table; one such
//!   entry is registered per table found in the data directory
//!
//! # Example
//!
//! ```rust
//! use datagen_patterns::PatternRegistry;
//!
//! let registry = PatternRegistry::builtin();
//! let pattern = registry.resolve("index").unwrap();
//! assert_eq!(pattern.cell(2, 0, 999).unwrap(), "3");
//! ```

pub mod builtin;
pub mod registry;

// Re-exports for convenience
pub use builtin::{EU_COUNTRIES, MORE_COUNTRIES, NULL_COUNTRIES};
pub use registry::{Pattern, PatternError, PatternRegistry};
