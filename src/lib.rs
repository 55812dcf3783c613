//! Datagen Library
//!
//! A deterministic generator for synthetic CSV table data. Columns are
//! described as name/pattern pairs; every cell value derives from a single
//! seeded stream, so runs with the same arguments and seed produce identical
//! bytes.
//!
//! # Features
//!
//! - Deterministic output: one seed stream drives every cell
//! - Pattern registry: built-in `index` and country-list patterns plus
//!   `fuzz_<table>` patterns sampling reference CSV corpora
//! - Fuzz transformations: probabilistic cell corruption and windowed row
//!   shuffling for testing downstream consumers
//! - Streaming sinks: stdout or a Unix domain socket, flushed per row
//!
//! # Member Crates
//!
//! - `datagen-core` - table specs, seed sequence, reference tables
//! - `datagen-patterns` - pattern registry and built-in value sets
//! - `datagen-fuzz` - reference-table loading and the fuzz engine
//! - `datagen-emitter` - the emission loop, metrics and output sinks
//!
//! # CLI Usage
//!
//! ```bash
//! # Three rows with a sequential id and a country column
//! datagen --num-rows 3 --col id index --col country eu_countries
//!
//! # Stream to a listening Unix domain socket instead of stdout
//! datagen --num-rows 1000000 --col id index --col country more_countries \
//!   --stream /tmp/datagen.sock
//! ```

use clap::Parser;

pub use datagen_core::{
    ColumnSpec, ReferenceTable, SeedSequence, SpecError, TableSpec, DEFAULT_SEED,
};
pub use datagen_emitter::{EmitMetrics, OutputSink, SinkError, SinkTarget, TableEmitter};
pub use datagen_fuzz::{load_reference_tables, FuzzConfig, FuzzEngine, DEFAULT_WINDOW};
pub use datagen_patterns::{
    Pattern, PatternError, PatternRegistry, EU_COUNTRIES, MORE_COUNTRIES, NULL_COUNTRIES,
};

/// Fuzz knobs shared by the CLI surface.
#[derive(Parser, Clone)]
pub struct FuzzOpts {
    /// Probability in [0, 1] that a generated cell is replaced with a corrupted value
    #[arg(long, value_name = "P", default_value_t = 0.0)]
    pub fuzz_value_probability: f64,

    /// Probability in [0, 1] that a buffered window of rows is emitted in shuffled order
    #[arg(long, value_name = "P", default_value_t = 0.0)]
    pub fuzz_shuffle_probability: f64,

    /// Number of rows buffered per shuffle decision
    #[arg(long, value_name = "N", default_value_t = DEFAULT_WINDOW)]
    pub fuzz_window: usize,
}

impl FuzzOpts {
    /// Whether a fuzz engine should be attached. Non-zero covers negative and
    /// NaN values too, so malformed probabilities still reach validation.
    pub fn enabled(&self) -> bool {
        self.fuzz_value_probability != 0.0 || self.fuzz_shuffle_probability != 0.0
    }
}

// CLI flags → fuzz engine configuration
impl From<&FuzzOpts> for FuzzConfig {
    fn from(opts: &FuzzOpts) -> Self {
        Self {
            value_probability: opts.fuzz_value_probability,
            shuffle_probability: opts.fuzz_shuffle_probability,
            window: opts.fuzz_window,
        }
    }
}
