use crate::errors::{AppError, AppResult};
use std::fmt;
use std::str::FromStr;

/// Card identifier as read from the reader: exactly ten ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    pub const LEN: usize = 10;

    /// Returns `Some` only when `s` is purely numeric and exactly ten characters long.
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() == Self::LEN && s.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Identifier {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Self::parse(s).ok_or_else(|| AppError::InvalidIdentifier(s.to_string()))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
