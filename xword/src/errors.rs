//! Definition of errors.

use std::error::Error;
use std::fmt;

/// A specialized `Result` type for this crate.
pub type Result<T, E = XwordError> = std::result::Result<T, E>;

/// The error type for the crossword toolkit.
#[derive(Debug)]
pub enum XwordError {
    /// A word or pattern was shorter than [`crate::common::MINLEN`] or not
    /// shorter than [`crate::common::MAXLEN`].
    TooShortOrLong(InvalidArgumentError),

    /// A dictionary or grid file was truncated (a line had no terminating
    /// newline before EOF).
    Corrupt(InvalidArgumentError),

    /// A column index passed to [`crate::dance::DanceMatrix::add_row`] was out
    /// of range.
    InvalidColumn(InvalidArgumentError),

    /// A grid row's length disagreed with the first row's.
    RaggedGrid(InvalidArgumentError),

    /// The error variant for [`std::io::Error`].
    Io(std::io::Error),
}

impl XwordError {
    pub(crate) fn too_short_or_long<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::TooShortOrLong(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn corrupt<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::Corrupt(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn invalid_column<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidColumn(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn ragged_grid<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::RaggedGrid(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// Maps this error onto a stable integer error code, for callers (such
    /// as CLI binaries choosing a process exit status) that want one.
    pub const fn as_code(&self) -> i32 {
        match self {
            Self::TooShortOrLong(_) | Self::InvalidColumn(_) => -1,
            Self::Corrupt(_) => -2,
            Self::RaggedGrid(_) => -1,
            Self::Io(_) => -1,
        }
    }
}

impl fmt::Display for XwordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::TooShortOrLong(e) => e.fmt(f),
            Self::Corrupt(e) => e.fmt(f),
            Self::InvalidColumn(e) => e.fmt(f),
            Self::RaggedGrid(e) => e.fmt(f),
            Self::Io(e) => e.fmt(f),
        }
    }
}

impl Error for XwordError {}

/// Error used when an argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

impl From<std::io::Error> for XwordError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}
