//! RIL error types

use core::fmt;

use crate::protocol::response::FailureCause;

/// RIL operation result
pub type RilResult<T> = Result<T, RilError>;

/// Errors surfaced by the RIL wrappers and dispatchers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RilError {
    /// The modem answered with `ERROR`, `+CME ERROR` or `+CMS ERROR`
    Protocol(FailureCause),
    /// An argument was rejected before anything was sent
    InvalidArgument,
    /// A data line was missing its delimiters, or the expected data never arrived
    Malformed,
    /// No final result code arrived before the deadline
    Timeout,
    /// The UART reported an error
    Transport,
    /// A line or field did not fit its buffer
    Overflow,
}

impl fmt::Display for RilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Protocol(cause) => write!(f, "modem reported {cause}"),
            Self::InvalidArgument => f.write_str("invalid argument"),
            Self::Malformed => f.write_str("malformed response"),
            Self::Timeout => f.write_str("timed out waiting for final result code"),
            Self::Transport => f.write_str("uart transport error"),
            Self::Overflow => f.write_str("buffer overflow"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RilError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Protocol(cause) => defmt::write!(f, "Protocol({})", cause),
            Self::InvalidArgument => defmt::write!(f, "InvalidArgument"),
            Self::Malformed => defmt::write!(f, "Malformed"),
            Self::Timeout => defmt::write!(f, "Timeout"),
            Self::Transport => defmt::write!(f, "Transport"),
            Self::Overflow => defmt::write!(f, "Overflow"),
        }
    }
}
