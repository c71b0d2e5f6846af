use std::fmt;
use std::io;

/// Custom error type for sqlperf operations
#[derive(Debug)]
pub enum Error {
    /// Error reported by SQLite through rusqlite
    Sqlite(rusqlite::Error),
    /// I/O error from database file housekeeping
    Io(io::Error),
    /// Rejected benchmark configuration
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Sqlite(err) => write!(f, "SQLite error: {err}"),
            Error::Io(err) => write!(f, "I/O error: {err}"),
            Error::Config(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Sqlite(err) => Some(err),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Sqlite(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

/// Result type for sqlperf operations
pub type Result<T> = std::result::Result<T, Error>;
