//! A validated dictionary entry.

use std::fmt;
use std::ops::Deref;

use crate::common::{MAXLEN, MINLEN};
use crate::errors::{Result, XwordError};

/// An ASCII lowercase alphabetic string of length `MINLEN..MAXLEN`.
///
/// Construction validates length and alphabet up front so every other
/// component can assume a `Word` is well-formed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word(String);

impl Word {
    /// Validates and wraps `s` as a [`Word`].
    ///
    /// Fails with [`XwordError::TooShortOrLong`] if `s.len()` is outside
    /// `MINLEN..MAXLEN`, or if `s` contains a non-lowercase-ASCII-letter.
    pub fn new<S: Into<String>>(s: S) -> Result<Self> {
        let s = s.into();
        if s.len() < MINLEN || s.len() >= MAXLEN {
            return Err(XwordError::too_short_or_long(
                "word",
                format!("length {} outside {}..{}", s.len(), MINLEN, MAXLEN),
            ));
        }
        if !s.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(XwordError::too_short_or_long(
                "word",
                format!("'{s}' is not purely lowercase ASCII"),
            ));
        }
        Ok(Self(s))
    }

    /// Returns the word's length.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the word as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes `self`, returning the underlying `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for Word {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
