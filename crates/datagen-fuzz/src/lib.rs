//! Fuzz support for datagen: reference-table loading and seed-derived
//! data-quality perturbations.
//!
//! Reference tables are plain CSV files loaded from a data directory; each one
//! backs a `fuzz_<name>` pattern that samples real rows. The [`FuzzEngine`]
//! layers two optional transformations on top of generated output:
//!
//! - cell corruption: replaces a cell with a truncated, reversed, or
//!   out-of-domain value
//! - row shuffling: emits a buffered window of rows in permuted order
//!
//! Both transformations are pure functions of seeds that were already drawn
//! for the affected cells, so enabling them never changes which seeds are
//! drawn, and a rerun with the same top-level seed perturbs the same cells
//! and windows the same way.

pub mod engine;
pub mod error;
pub mod load;

pub use engine::{window_key, FuzzConfig, FuzzEngine, DEFAULT_WINDOW};
pub use error::FuzzError;
pub use load::load_reference_tables;
