//! Core types for the datagen table generator.
//!
//! This crate provides the foundational vocabulary shared by the pattern
//! registry, the fuzz engine, and the emitter:
//!
//! - [`ColumnSpec`] / [`TableSpec`] - What to generate, parsed once from the CLI
//! - [`SeedSequence`] - The deterministic pseudo-random stream every run draws from
//! - [`ReferenceTable`] - An in-memory CSV corpus sampled by `fuzz_*` patterns
//!
//! # Architecture
//!
//! ```text
//! datagen-core (this crate)
//!    │
//!    ├─── datagen-patterns  (pattern registry; samples ReferenceTable)
//!    ├─── datagen-fuzz      (loads ReferenceTables, corrupts/reorders rows)
//!    └─── datagen-emitter   (drives SeedSequence, writes CSV to a sink)
//! ```

pub mod reference;
pub mod seed;
pub mod spec;

// Re-exports for convenience
pub use reference::{ReferenceTable, ReferenceTableError};
pub use seed::{SeedSequence, DEFAULT_SEED};
pub use spec::{ColumnSpec, SpecError, TableSpec, SEED_RANGE_MULTIPLIER};
