//! Compression CLI Helpers

use crate::Compression;
use crate::error::Error;
use std::str::FromStr;

/// Raw shape of an optional-value flag such as `--compression[=METHOD]`.
pub type Flag = Option<Option<String>>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Preference {
    /// Compression method was specified on the command-line
    Explicit(Compression),
    /// Compression flag was enabled on the command-line, but no method was specified
    Implicit,
    /// Compression was omitted from the command-line
    NotSpecified,
}
impl TryFrom<Flag> for Preference {
    type Error = Error;
    fn try_from(value: Flag) -> Result<Self, Self::Error> {
        match value {
            Some(Some(s)) if s.is_empty() => Ok(Self::Implicit),
            Some(Some(s)) => Ok(Self::Explicit(Compression::from_str(&s)?)),
            Some(None) => Ok(Self::Implicit),
            None => Ok(Self::NotSpecified),
        }
    }
}
impl Preference {
    /// An explicit method always wins; a bare flag asks for the default
    /// method; otherwise the configured method applies.
    pub fn resolve(&self, configured: &Compression) -> Compression {
        match self {
            Self::Explicit(c) => *c,
            Self::Implicit => Compression::default(),
            Self::NotSpecified => *configured,
        }
    }
}
