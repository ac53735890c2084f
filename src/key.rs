use crate::{Error, Result};
use std::convert::TryFrom;
use std::fmt;

/// Number of leading bytes of each line used as its key.
///
/// Always within `[KeyLength::MIN, KeyLength::MAX]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyLength(usize);

impl KeyLength {
    pub const MIN: usize = 1;
    pub const MAX: usize = 24;

    pub fn new(len: usize) -> Result<Self> {
        if len < Self::MIN || len > Self::MAX {
            return Err(invalid_length(len));
        }
        Ok(Self(len))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Returns the key prefix of `line`, which is the whole line if it is
    /// shorter than the key length.
    pub fn extract(self, line: &[u8]) -> &[u8] {
        &line[..self.0.min(line.len())]
    }

    /// Returns what follows the key prefix of `line`.
    pub fn payload(self, line: &[u8]) -> &[u8] {
        &line[self.0.min(line.len())..]
    }
}

fn invalid_length<T: fmt::Display>(len: T) -> Error {
    Error::InvalidArgument(format!(
        "invalid key length {}, expected a length between {} and {}",
        len,
        KeyLength::MIN,
        KeyLength::MAX
    ))
}

impl TryFrom<i64> for KeyLength {
    type Error = Error;

    fn try_from(len: i64) -> Result<Self> {
        usize::try_from(len)
            .map_err(|_| invalid_length(len))
            .and_then(Self::new)
    }
}

impl fmt::Display for KeyLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
