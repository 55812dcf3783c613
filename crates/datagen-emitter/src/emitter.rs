//! Deterministic row emission.

use crate::error::EmitError;
use datagen_core::{SeedSequence, TableSpec};
use datagen_fuzz::{window_key, FuzzEngine};
use datagen_patterns::PatternRegistry;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Metrics from an emit run.
#[derive(Debug, Clone, Default)]
pub struct EmitMetrics {
    /// Number of data rows written (header excluded).
    pub rows_written: u64,
    /// Total bytes pushed into the sink, header included.
    pub bytes_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent producing cell values.
    pub generation_duration: Duration,
    /// Time spent writing and flushing.
    pub write_duration: Duration,
}

impl EmitMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.bytes_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Emits one CSV table: header first, then `num_rows` deterministic rows.
///
/// Each row draws one seed per cell from the sequence, resolves the column's
/// pattern by name and writes the finished line followed by a flush, so a
/// streaming consumer sees rows as they are produced. The terminator goes
/// between rows only; the last row ends the stream without one.
pub struct TableEmitter {
    spec: TableSpec,
    registry: PatternRegistry,
    seq: SeedSequence,
    fuzz: Option<FuzzEngine>,
}

impl TableEmitter {
    /// Create a new emitter.
    ///
    /// # Arguments
    ///
    /// * `spec` - Row count and ordered column definitions
    /// * `registry` - Patterns resolvable by the columns of `spec`
    /// * `seq` - Seed sequence all cell draws come from
    pub fn new(spec: TableSpec, registry: PatternRegistry, seq: SeedSequence) -> Self {
        Self {
            spec,
            registry,
            seq,
            fuzz: None,
        }
    }

    /// Attach a fuzz engine; without one the output is the clean reference
    /// data.
    pub fn with_fuzz(mut self, fuzz: FuzzEngine) -> Self {
        self.fuzz = Some(fuzz);
        self
    }

    /// Number of seeds drawn so far.
    pub fn seeds_drawn(&self) -> u64 {
        self.seq.draws()
    }

    /// Generate the table into `sink`.
    ///
    /// Aborts on the first cell failure; the header and rows flushed before
    /// the failure remain in the sink.
    pub fn emit<W: Write>(&mut self, sink: &mut W) -> Result<EmitMetrics, EmitError> {
        let start_time = Instant::now();
        let mut metrics = EmitMetrics::default();
        let mut generation_time = Duration::ZERO;
        let mut write_time = Duration::ZERO;

        let num_rows = self.spec.num_rows();
        let num_columns = self.spec.num_columns();
        let seed_bound = self.spec.seed_bound();
        // Rows are buffered only when reordering can actually trigger.
        let window = match &self.fuzz {
            Some(engine) if engine.reorders_rows() => engine.window(),
            _ => 1,
        };

        info!(
            "Generating {} rows x {} columns (seed {})",
            num_rows,
            num_columns,
            self.seq.seed()
        );

        let write_start = Instant::now();
        let header = self
            .spec
            .columns()
            .iter()
            .map(|col| escape_field(&col.name))
            .collect::<Vec<_>>()
            .join(",");
        sink.write_all(header.as_bytes())?;
        sink.write_all(b"\n")?;
        sink.flush()?;
        metrics.bytes_written += header.len() as u64 + 1;
        write_time += write_start.elapsed();

        let mut pending: Vec<String> = Vec::with_capacity(window);
        let mut pending_seeds: Vec<u64> = Vec::with_capacity(window * num_columns);

        for row in 0..num_rows {
            let gen_start = Instant::now();
            let mut fields = Vec::with_capacity(num_columns);
            for (col, column) in self.spec.columns().iter().enumerate() {
                let seed = self.seq.next_in_range(seed_bound);
                pending_seeds.push(seed);

                let pattern = self.registry.resolve(&column.pattern)?;
                let mut value = pattern.cell(row, col, seed)?;
                if let Some(engine) = &self.fuzz {
                    if let Some(corrupted) = engine.corrupt_cell(&value, seed) {
                        value = corrupted;
                    }
                }
                fields.push(escape_field(&value));
            }
            pending.push(fields.join(","));
            generation_time += gen_start.elapsed();

            if pending.len() == window {
                let write_start = Instant::now();
                drain_window(
                    sink,
                    &mut pending,
                    &mut pending_seeds,
                    self.fuzz.as_ref(),
                    num_rows,
                    &mut metrics,
                )?;
                write_time += write_start.elapsed();
            }
        }

        // Final partial window (only when num_rows is not a window multiple).
        if !pending.is_empty() {
            let write_start = Instant::now();
            drain_window(
                sink,
                &mut pending,
                &mut pending_seeds,
                self.fuzz.as_ref(),
                num_rows,
                &mut metrics,
            )?;
            write_time += write_start.elapsed();
        }

        metrics.total_duration = start_time.elapsed();
        metrics.generation_duration = generation_time;
        metrics.write_duration = write_time;

        info!(
            "Generation complete: {} rows, {} bytes in {:?} ({:.2} rows/sec)",
            metrics.rows_written,
            metrics.bytes_written,
            metrics.total_duration,
            metrics.rows_per_second()
        );

        Ok(metrics)
    }
}

/// Write out buffered rows, permuting them first when a fuzz engine decides
/// to. Every row is terminated (except the table's last) and flushed
/// individually.
fn drain_window<W: Write>(
    sink: &mut W,
    pending: &mut Vec<String>,
    pending_seeds: &mut Vec<u64>,
    fuzz: Option<&FuzzEngine>,
    num_rows: u64,
    metrics: &mut EmitMetrics,
) -> Result<(), EmitError> {
    if let Some(engine) = fuzz {
        let key = window_key(pending_seeds.drain(..));
        engine.shuffle_window(pending, key);
    } else {
        pending_seeds.clear();
    }

    for line in pending.drain(..) {
        sink.write_all(line.as_bytes())?;
        metrics.bytes_written += line.len() as u64;
        metrics.rows_written += 1;
        if metrics.rows_written < num_rows {
            sink.write_all(b"\n")?;
            metrics.bytes_written += 1;
        }
        sink.flush()?;

        if metrics.rows_written % 10000 == 0 {
            debug!("Written {} rows", metrics.rows_written);
        }
    }
    Ok(())
}

/// Quote a field only when it contains the separator, a quote or a line
/// break; inner quotes are doubled. Built-in pattern values pass through
/// untouched.
fn escape_field(field: &str) -> String {
    let needs_quoting = field
        .chars()
        .any(|ch| matches!(ch, ',' | '"' | '\n' | '\r'));
    if !needs_quoting {
        return field.to_string();
    }

    let mut escaped = String::with_capacity(field.len() + 2);
    escaped.push('"');
    for ch in field.chars() {
        if ch == '"' {
            escaped.push('"');
        }
        escaped.push(ch);
    }
    escaped.push('"');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use datagen_core::{ColumnSpec, ReferenceTable, SeedSequence, TableSpec, DEFAULT_SEED};
    use datagen_fuzz::{FuzzConfig, FuzzEngine};
    use datagen_patterns::{PatternError, PatternRegistry, EU_COUNTRIES};
    use std::io;

    fn table(num_rows: u64, cols: &[(&str, &str)]) -> TableSpec {
        let columns = cols
            .iter()
            .map(|(name, pattern)| ColumnSpec::new(*name, *pattern))
            .collect();
        TableSpec::new(num_rows, columns).unwrap()
    }

    fn emit_to_string(emitter: &mut TableEmitter) -> String {
        let mut sink = Vec::new();
        emitter.emit(&mut sink).unwrap();
        String::from_utf8(sink).unwrap()
    }

    fn fuzz(value_p: f64, shuffle_p: f64, window: usize) -> FuzzEngine {
        FuzzEngine::new(FuzzConfig {
            value_probability: value_p,
            shuffle_probability: shuffle_p,
            window,
        })
        .unwrap()
    }

    #[test]
    fn test_metrics() {
        let metrics = EmitMetrics {
            rows_written: 1000,
            bytes_written: 100000,
            total_duration: Duration::from_secs(10),
            generation_duration: Duration::from_secs(2),
            write_duration: Duration::from_secs(8),
        };

        assert_eq!(metrics.rows_per_second(), 100.0);
        assert_eq!(metrics.bytes_per_second(), 10000.0);
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("Germany"), "Germany");
        assert_eq!(escape_field(""), "");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_emit_header_and_rows() {
        let spec = table(3, &[("id", "index"), ("country", "eu_countries")]);
        let mut emitter = TableEmitter::new(
            spec,
            PatternRegistry::builtin(),
            SeedSequence::new(DEFAULT_SEED),
        );
        let output = emit_to_string(&mut emitter);

        assert!(!output.ends_with('\n'));
        let lines: Vec<&str> = output.split('\n').collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "id,country");

        for (i, line) in lines[1..].iter().enumerate() {
            let fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields[0], (i + 1).to_string());
            assert!(EU_COUNTRIES.contains(&fields[1]));
        }
    }

    #[test]
    fn test_emit_zero_rows_is_header_only() {
        let spec = table(0, &[("id", "index"), ("country", "eu_countries")]);
        let mut emitter = TableEmitter::new(
            spec,
            PatternRegistry::builtin(),
            SeedSequence::new(DEFAULT_SEED),
        );

        assert_eq!(emit_to_string(&mut emitter), "id,country\n");
    }

    #[test]
    fn test_emit_is_deterministic() {
        let spec = table(50, &[("id", "index"), ("country", "more_countries")]);

        let mut first = TableEmitter::new(
            spec.clone(),
            PatternRegistry::builtin(),
            SeedSequence::new(42),
        );
        let mut second = TableEmitter::new(spec, PatternRegistry::builtin(), SeedSequence::new(42));

        assert_eq!(emit_to_string(&mut first), emit_to_string(&mut second));
    }

    #[test]
    fn test_different_seeds_diverge() {
        let spec = table(20, &[("country", "eu_countries")]);

        let mut first = TableEmitter::new(
            spec.clone(),
            PatternRegistry::builtin(),
            SeedSequence::new(1),
        );
        let mut second = TableEmitter::new(spec, PatternRegistry::builtin(), SeedSequence::new(2));

        assert_ne!(emit_to_string(&mut first), emit_to_string(&mut second));
    }

    #[test]
    fn test_one_seed_drawn_per_cell() {
        let spec = table(5, &[("id", "index"), ("country", "eu_countries")]);
        let mut emitter = TableEmitter::new(
            spec,
            PatternRegistry::builtin(),
            SeedSequence::new(DEFAULT_SEED),
        );
        emit_to_string(&mut emitter);

        assert_eq!(emitter.seeds_drawn(), 10);
    }

    #[test]
    fn test_unknown_pattern_fails_with_header_flushed() {
        let spec = table(3, &[("id", "index"), ("oops", "no_such_pattern")]);
        let mut emitter = TableEmitter::new(
            spec,
            PatternRegistry::builtin(),
            SeedSequence::new(DEFAULT_SEED),
        );

        let mut sink = Vec::new();
        let err = emitter.emit(&mut sink).unwrap_err();
        assert!(matches!(
            err,
            EmitError::Pattern(PatternError::Unknown(name)) if name == "no_such_pattern"
        ));

        // Fail-fast at a row boundary: header reached the sink, no partial row.
        assert_eq!(String::from_utf8(sink).unwrap(), "id,oops\n");
    }

    #[test]
    fn test_empty_reference_table_fails() {
        let mut registry = PatternRegistry::builtin();
        registry.register_reference_tables([ReferenceTable::new(
            "customer",
            vec!["name".to_string()],
            Vec::new(),
        )]);

        let spec = table(2, &[("name", "fuzz_customer")]);
        let mut emitter =
            TableEmitter::new(spec, registry, SeedSequence::new(DEFAULT_SEED));

        let mut sink = Vec::new();
        assert!(emitter.emit(&mut sink).is_err());
        assert_eq!(String::from_utf8(sink).unwrap(), "name\n");
    }

    #[test]
    fn test_flushes_header_and_every_row() {
        struct FlushCounter {
            inner: Vec<u8>,
            flushes: usize,
        }

        impl Write for FlushCounter {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.inner.write(buf)
            }

            fn flush(&mut self) -> io::Result<()> {
                self.flushes += 1;
                Ok(())
            }
        }

        let spec = table(5, &[("id", "index")]);
        let mut emitter = TableEmitter::new(
            spec,
            PatternRegistry::builtin(),
            SeedSequence::new(DEFAULT_SEED),
        );

        let mut sink = FlushCounter {
            inner: Vec::new(),
            flushes: 0,
        };
        emitter.emit(&mut sink).unwrap();

        // One flush for the header plus one per row.
        assert!(sink.flushes >= 6);
    }

    #[test]
    fn test_write_error_aborts() {
        struct FailingSink {
            writes_left: usize,
        }

        impl Write for FailingSink {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                if self.writes_left == 0 {
                    return Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer closed"));
                }
                self.writes_left -= 1;
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let spec = table(10, &[("id", "index")]);
        let mut emitter = TableEmitter::new(
            spec,
            PatternRegistry::builtin(),
            SeedSequence::new(DEFAULT_SEED),
        );

        // Header takes two writes; the first row write fails.
        let mut sink = FailingSink { writes_left: 2 };
        let err = emitter.emit(&mut sink).unwrap_err();
        assert!(matches!(err, EmitError::Io(_)));
    }

    #[test]
    fn test_metrics_reflect_output() {
        let spec = table(4, &[("id", "index"), ("country", "null_countries")]);
        let mut emitter = TableEmitter::new(
            spec,
            PatternRegistry::builtin(),
            SeedSequence::new(DEFAULT_SEED),
        );

        let mut sink = Vec::new();
        let metrics = emitter.emit(&mut sink).unwrap();

        assert_eq!(metrics.rows_written, 4);
        assert_eq!(metrics.bytes_written, sink.len() as u64);
    }

    #[test]
    fn test_full_corruption_replaces_every_cell() {
        let spec = table(10, &[("country", "eu_countries")]);
        let mut emitter = TableEmitter::new(
            spec,
            PatternRegistry::builtin(),
            SeedSequence::new(DEFAULT_SEED),
        )
        .with_fuzz(fuzz(1.0, 0.0, 16));

        let output = emit_to_string(&mut emitter);
        for line in output.split('\n').skip(1) {
            // Truncated, reversed or out-of-domain: never a clean country.
            assert!(!EU_COUNTRIES.contains(&line));
        }
    }

    #[test]
    fn test_zero_probabilities_leave_output_clean() {
        let spec = table(20, &[("id", "index"), ("country", "eu_countries")]);

        let mut clean = TableEmitter::new(
            spec.clone(),
            PatternRegistry::builtin(),
            SeedSequence::new(7),
        );
        let mut fuzzed = TableEmitter::new(spec, PatternRegistry::builtin(), SeedSequence::new(7))
            .with_fuzz(fuzz(0.0, 0.0, 16));

        assert_eq!(emit_to_string(&mut clean), emit_to_string(&mut fuzzed));
    }

    #[test]
    fn test_shuffled_output_is_a_permutation() {
        let spec = table(16, &[("id", "index")]);

        let mut emitter = TableEmitter::new(
            spec,
            PatternRegistry::builtin(),
            SeedSequence::new(DEFAULT_SEED),
        )
        .with_fuzz(fuzz(0.0, 1.0, 16));

        let output = emit_to_string(&mut emitter);
        let mut ids: Vec<&str> = output.split('\n').skip(1).collect();
        assert_eq!(ids.len(), 16);

        ids.sort_by_key(|id| id.parse::<u64>().unwrap());
        let expected: Vec<String> = (1..=16).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_fuzzed_runs_are_deterministic() {
        let spec = table(40, &[("id", "index"), ("country", "more_countries")]);
        let engine = fuzz(0.3, 0.5, 8);

        let mut first = TableEmitter::new(
            spec.clone(),
            PatternRegistry::builtin(),
            SeedSequence::new(99),
        )
        .with_fuzz(engine.clone());
        let mut second =
            TableEmitter::new(spec, PatternRegistry::builtin(), SeedSequence::new(99))
                .with_fuzz(engine);

        assert_eq!(emit_to_string(&mut first), emit_to_string(&mut second));
    }

    #[test]
    fn test_fuzz_draws_no_extra_seeds() {
        let spec = table(12, &[("id", "index"), ("country", "eu_countries")]);

        let mut clean = TableEmitter::new(
            spec.clone(),
            PatternRegistry::builtin(),
            SeedSequence::new(5),
        );
        let mut fuzzed = TableEmitter::new(spec, PatternRegistry::builtin(), SeedSequence::new(5))
            .with_fuzz(fuzz(0.7, 0.9, 4));

        emit_to_string(&mut clean);
        emit_to_string(&mut fuzzed);
        assert_eq!(clean.seeds_drawn(), fuzzed.seeds_drawn());
    }

    #[test]
    fn test_reference_table_cells_are_quoted_when_needed() {
        let mut registry = PatternRegistry::builtin();
        registry.register_reference_tables([ReferenceTable::new(
            "notes",
            vec!["note".to_string()],
            vec![vec!["contains, comma".to_string()]],
        )]);

        let spec = table(1, &[("note", "fuzz_notes")]);
        let mut emitter =
            TableEmitter::new(spec, registry, SeedSequence::new(DEFAULT_SEED));

        let output = emit_to_string(&mut emitter);
        assert_eq!(output, "note\n\"contains, comma\"");
    }
}
