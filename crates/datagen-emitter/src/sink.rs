//! Output sinks for generated rows.

use std::fmt;
use std::io::{self, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to open the requested sink.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The Unix domain socket could not be connected.
    #[error("cannot connect to stream socket {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where generated rows go, selected once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkTarget {
    /// Write rows to standard output.
    Stdout,
    /// Connect to a listening Unix domain socket and write rows to it.
    UnixSocket(PathBuf),
}

impl SinkTarget {
    /// Open the sink.
    ///
    /// Connecting happens before any generation, so a missing or refusing
    /// socket fails the run with [`SinkError::Unavailable`] while the sink is
    /// still empty.
    pub fn open(&self) -> Result<OutputSink, SinkError> {
        match self {
            SinkTarget::Stdout => Ok(OutputSink::Stdout(io::stdout())),
            SinkTarget::UnixSocket(path) => {
                let stream =
                    UnixStream::connect(path).map_err(|source| SinkError::Unavailable {
                        path: path.clone(),
                        source,
                    })?;
                Ok(OutputSink::Unix(stream))
            }
        }
    }
}

impl fmt::Display for SinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkTarget::Stdout => write!(f, "stdout"),
            SinkTarget::UnixSocket(path) => write!(f, "unix socket {}", path.display()),
        }
    }
}

/// An open sink. Rows pass through the [`Write`] impl; both variants carry
/// identical write/flush semantics so the emitter never branches on them.
#[derive(Debug)]
pub enum OutputSink {
    Stdout(io::Stdout),
    Unix(UnixStream),
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputSink::Stdout(out) => out.write(buf),
            OutputSink::Unix(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Stdout(out) => out.flush(),
            OutputSink::Unix(stream) => stream.flush(),
        }
    }
}
