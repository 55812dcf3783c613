//! Command-line interface for datagen
//!
//! # Usage Examples
//!
//! ## Basic Generation
//! ```bash
//! # Three rows with a sequential id and a country column
//! datagen --num-rows 3 --col id index --col country eu_countries
//!
//! # Reproducible variants of the same table
//! datagen --num-rows 1000 --col id index --col country null_countries --seed 7
//! ```
//!
//! ## Streaming
//! ```bash
//! # Stream rows to a listening Unix domain socket instead of stdout
//! datagen --num-rows 1000000 \
//!   --col id index \
//!   --col country more_countries \
//!   --stream /tmp/datagen.sock
//! ```
//!
//! ## Fuzzing
//! ```bash
//! # Sample the first two columns of data/customer.csv, corrupting 5% of
//! # cells and occasionally shuffling row windows
//! datagen --num-rows 1000 \
//!   --col id fuzz_customer \
//!   --col name fuzz_customer \
//!   --fuzz-value-probability 0.05 \
//!   --fuzz-shuffle-probability 0.1
//! ```
//!
//! Diagnostics go to stderr (`RUST_LOG=debug` for detail); stdout carries
//! only the generated rows.

use anyhow::Context;
use clap::Parser;
use datagen::{
    load_reference_tables, ColumnSpec, FuzzEngine, FuzzOpts, PatternRegistry, SeedSequence,
    SinkTarget, TableEmitter, TableSpec, DEFAULT_SEED,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "datagen")]
#[command(about = "Deterministic pattern-based CSV test-data generator")]
#[command(long_about = None)]
struct Cli {
    /// Number of data rows to generate
    #[arg(long)]
    num_rows: u64,

    /// Output column as a NAME PATTERN pair, repeated once per column
    #[arg(long, num_args = 2, value_names = ["NAME", "PATTERN"], required = true)]
    col: Vec<String>,

    /// Stream rows to the Unix domain socket at this path instead of stdout
    #[arg(long, value_name = "PATH")]
    stream: Option<PathBuf>,

    /// Top-level seed for the deterministic generation stream
    #[arg(long, default_value_t = DEFAULT_SEED, env = "DATAGEN_SEED")]
    seed: u64,

    /// Directory of reference CSV files backing the fuzz_* patterns
    #[arg(long, value_name = "DIR", default_value = "data", env = "DATAGEN_DATA_DIR")]
    data_dir: PathBuf,

    /// Fuzz transformation knobs
    #[command(flatten)]
    fuzz: FuzzOpts,
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing on stderr; stdout is the data channel
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let columns = ColumnSpec::from_pairs(&cli.col)?;
    let spec = TableSpec::new(cli.num_rows, columns)?;

    let mut registry = PatternRegistry::builtin();
    let tables = load_reference_tables(&cli.data_dir)
        .with_context(|| format!("Failed to load reference tables from {:?}", cli.data_dir))?;
    registry.register_reference_tables(tables);
    info!("{} patterns registered", registry.len());

    let mut emitter = TableEmitter::new(spec, registry, SeedSequence::new(cli.seed));
    if cli.fuzz.enabled() {
        emitter = emitter.with_fuzz(FuzzEngine::new((&cli.fuzz).into())?);
    }

    let target = match cli.stream {
        Some(path) => SinkTarget::UnixSocket(path),
        None => SinkTarget::Stdout,
    };
    info!("Writing to {target}");
    let mut sink = target.open()?;

    let metrics = emitter.emit(&mut sink)?;
    info!(
        "Done: {} rows, {} bytes in {:?}",
        metrics.rows_written, metrics.bytes_written, metrics.total_duration
    );
    Ok(())
}
