//! Two-digit chapter identifiers

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a chapter identifier is not exactly two digits
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid chapter '{0}': expected two digits such as 01")]
pub struct ChapterIdError(pub String);

/// A book chapter, written zero-padded as `"01"`..`"99"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChapterId(u8);

impl ChapterId {
    pub fn new(number: u8) -> Result<Self, ChapterIdError> {
        if number > 99 {
            return Err(ChapterIdError(number.to_string()));
        }
        Ok(Self(number))
    }

    /// Numeric chapter value, used as the rotation seed
    pub fn number(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl FromStr for ChapterId {
    type Err = ChapterIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        match bytes {
            [tens, ones] if tens.is_ascii_digit() && ones.is_ascii_digit() => {
                Ok(Self((tens - b'0') * 10 + (ones - b'0')))
            }
            _ => Err(ChapterIdError(s.to_string())),
        }
    }
}
