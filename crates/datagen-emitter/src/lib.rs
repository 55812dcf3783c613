//! CSV row emission for datagen.
//!
//! [`TableEmitter`] runs the generation loop: header first, then one
//! deterministic row per iteration, each flushed to the sink as soon as it is
//! complete so streaming consumers observe rows incrementally. Rows go to an
//! [`OutputSink`], either standard output or a connected Unix domain socket;
//! the emitter itself only sees [`std::io::Write`].
//!
//! Output is comma-separated with a `\n` terminator between rows and none
//! after the last row. Fields are quoted only when they contain a separator,
//! a quote, or a line break.

pub mod emitter;
pub mod error;
pub mod sink;

pub use emitter::{EmitMetrics, TableEmitter};
pub use error::EmitError;
pub use sink::{OutputSink, SinkError, SinkTarget};
