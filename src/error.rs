use crate::timestamp::Timestamp;

pub type Result<T = (), E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum Error {
    /// Start is not strictly before the end after normalization.
    #[error("invalid range: start `{start}` is not before end `{end}`")]
    InvalidRange { start: Timestamp, end: Timestamp },

    #[error("index {index} is out of range for {len} period(s)")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("invalid calendar date: {0}")]
    InvalidDate(String),

    #[error("invalid bounds notation `{0}`, expected one of `[)`, `(]`, `[]`, `()`")]
    InvalidBounds(String),
}
