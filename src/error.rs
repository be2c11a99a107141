//! Crate error types

use std::fmt;
use std::io;

/// Convenience alias for results in this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for server operations
///
/// The catalog itself has no domain errors; absent keys are `None`. The only
/// failures surface at the transport edge.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while binding or serving
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
