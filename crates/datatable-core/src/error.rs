use crate::config::ConfigError;
use derive_more::Display;
use thiserror::Error as ThisError;

///
/// Error
///
/// Public error type for the fallible edges of the crate: configuration,
/// document input, and query execution. Parsing and compilation never fail;
/// they report through diagnostics and degenerate statements instead.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("no datatable directive found")]
    NoDirective,

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl Error {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::NoDirective => ErrorKind::Input,
            Self::Sqlite(_) => ErrorKind::Execution,
        }
    }

    #[must_use]
    pub fn display_with_kind(&self) -> String {
        format!("{}: {self}", self.kind())
    }
}

///
/// ErrorKind
/// Stable classification callers can branch on.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ErrorKind {
    /// Configuration failed to load or validate.
    #[display("config")]
    Config,

    /// The caller handed over unusable input.
    #[display("input")]
    Input,

    /// The store rejected or failed the compiled statement.
    #[display("execution")]
    Execution,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_origin() {
        assert_eq!(Error::NoDirective.kind(), ErrorKind::Input);
        assert_eq!(
            Error::Sqlite(rusqlite::Error::InvalidQuery).kind(),
            ErrorKind::Execution
        );
        assert_eq!(
            Error::NoDirective.display_with_kind(),
            "input: no datatable directive found"
        );
    }
}
